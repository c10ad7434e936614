//! Show / Watch 命令 - 以渲染端视角查看当前通知

use anyhow::Result;
use clap::Args;
use std::time::Duration;
use tracing::warn;

use super::output::{format_json, or_dash};
use super::SinkArgs;
use crate::notification::{read_slot, SlotRecord, SlotWatcher};

/// Show 命令参数
#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

/// Watch 命令参数
#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    /// 轮询间隔（秒）
    #[arg(long, short, default_value = "1")]
    pub interval: u64,
}

/// 格式化一条槽记录
pub fn describe_record(record: &SlotRecord) -> String {
    let payload = &record.payload;
    let mut lines = vec![
        format!(
            "#{} {} from {}",
            record.sequence,
            record.published_at.format("%Y-%m-%d %H:%M:%S UTC"),
            or_dash(&payload.from_source)
        ),
        format!("  headline: {}", or_dash(&payload.notification.headline)),
        format!("  info:     {}", or_dash(&payload.notification.info)),
        format!("  media:    {}", or_dash(&payload.notification.media)),
    ];
    if !payload.notification.seemore.is_empty() {
        lines.push(format!("  see more: {}", payload.notification.seemore));
    }
    lines.push(format!("  config:   {}", payload.config.describe()));
    lines.join("\n")
}

/// 处理 show 命令
pub fn handle_show(args: ShowArgs, sink: &SinkArgs) -> Result<()> {
    let path = sink.slot_path();
    match read_slot(&path)? {
        Some(record) if args.json => println!("{}", format_json(&record)),
        Some(record) => println!("{}", describe_record(&record)),
        None => println!("No notification in {}", path.display()),
    }
    Ok(())
}

/// 处理 watch 命令（Ctrl-C 退出）
pub async fn handle_watch(args: WatchArgs, sink: &SinkArgs) -> Result<()> {
    let mut watcher = SlotWatcher::new(sink.slot_path());
    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval.max(1)));

    println!("Watching {} ...", watcher.path().display());
    loop {
        ticker.tick().await;
        match watcher.poll() {
            Ok(Some(record)) => println!("{}\n", describe_record(&record)),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to read notification slot"),
        }
    }
}
