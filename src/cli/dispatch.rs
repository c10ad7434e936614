//! Dispatch 命令 - 发送一条通知到渲染端
//!
//! 通知 JSON 可以来自参数、文件或 stdin。

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use super::output::{format_json, or_dash};
use super::SinkArgs;
use crate::notification::{DispatchOutcome, NotificationDispatcher, ResolvedPayload};

/// Dispatch 命令参数
#[derive(Args, Debug, Clone)]
pub struct DispatchArgs {
    /// 通知 JSON（省略或为 "-" 时从 stdin 读取）
    pub payload: Option<String>,

    /// 从文件读取通知 JSON
    #[arg(long, short, conflicts_with = "payload")]
    pub file: Option<PathBuf>,

    /// 只解析不写入
    #[arg(long)]
    pub dry_run: bool,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

/// 单次分发的结果报告
#[derive(Debug, Serialize)]
pub struct DispatchReport {
    pub accepted: bool,
    /// published / dry_run / malformed_input / unsupported_type / sink_failure
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sink: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<ResolvedPayload>,
}

impl DispatchReport {
    /// 执行一次分发并生成报告
    pub fn run(dispatcher: &NotificationDispatcher, input: String) -> Self {
        match dispatcher.dispatch(input) {
            Ok(DispatchOutcome::Published { sink, sequence }) => Self {
                accepted: true,
                outcome: "published".to_string(),
                sink: Some(sink),
                sequence: Some(sequence),
                from_source: None,
                detail: None,
                payload: None,
            },
            Ok(DispatchOutcome::DryRun(payload)) => Self {
                accepted: true,
                outcome: "dry_run".to_string(),
                sink: Some(dispatcher.sink_name().to_string()),
                sequence: None,
                from_source: Some(payload.from_source.clone()),
                detail: None,
                payload: Some(payload),
            },
            Err(reason) => Self {
                accepted: false,
                outcome: reason.kind().to_string(),
                sink: None,
                sequence: None,
                from_source: reason.from_source().map(|s| s.to_string()),
                detail: Some(reason.to_string()),
                payload: None,
            },
        }
    }

    /// 人类可读的单行描述
    pub fn summary(&self) -> String {
        match self.outcome.as_str() {
            "published" => format!(
                "✓ Published to {} (sequence {})",
                self.sink.as_deref().unwrap_or("-"),
                self.sequence.unwrap_or(0)
            ),
            "dry_run" => format!(
                "✓ [DRY-RUN] Would publish to {} (fromSource {})",
                self.sink.as_deref().unwrap_or("-"),
                or_dash(self.from_source.as_deref().unwrap_or(""))
            ),
            _ => format!(
                "✗ Rejected ({}): {}",
                self.outcome,
                self.detail.as_deref().unwrap_or("")
            ),
        }
    }
}

/// 读取通知输入
pub fn read_input(args: &DispatchArgs) -> Result<String> {
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("read notification file {}", path.display()));
    }

    match args.payload.as_deref() {
        Some(payload) if payload != "-" => Ok(payload.to_string()),
        _ => std::io::read_to_string(std::io::stdin()).context("read notification from stdin"),
    }
}

/// 处理 dispatch 命令，返回通知是否被接受
pub fn handle_dispatch(args: DispatchArgs, sink: &SinkArgs) -> Result<bool> {
    let input = read_input(&args)?;
    let dispatcher = sink.builder().dry_run(args.dry_run).build()?;

    let report = DispatchReport::run(&dispatcher, input);

    if args.json {
        println!("{}", format_json(&report));
    } else {
        println!("{}", report.summary());
        if let Some(payload) = &report.payload {
            println!("{}", format_json(payload));
        }
    }

    Ok(report.accepted)
}
