//! CLI command handling

pub mod configs;
pub mod demo;
pub mod dispatch;
pub mod output;
pub mod slot;

pub use configs::*;
pub use demo::*;
pub use dispatch::*;
pub use output::*;
pub use slot::*;

use clap::Args;
use std::path::PathBuf;

use crate::notification::{DispatcherBuilder, FileSlotSink, WebhookConfig};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Sink 相关的全局参数
#[derive(Args, Debug, Clone)]
pub struct SinkArgs {
    /// 槽文件路径（默认 ~/.config/pod-notify/current_notification.json）
    #[arg(long, global = true)]
    pub slot: Option<PathBuf>,

    /// 改为 POST 到该 URL
    #[arg(long, global = true)]
    pub webhook: Option<String>,

    /// Webhook 超时（秒，最小 1）
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl Default for SinkArgs {
    fn default() -> Self {
        Self {
            slot: None,
            webhook: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SinkArgs {
    pub fn slot_path(&self) -> PathBuf {
        self.slot.clone().unwrap_or_else(FileSlotSink::default_path)
    }

    /// 按参数配置分发器构建器
    pub fn builder(&self) -> DispatcherBuilder {
        match &self.webhook {
            Some(url) => DispatcherBuilder::new().webhook(WebhookConfig {
                url: url.clone(),
                // 0 秒超时会让每次请求立即失败
                timeout_secs: self.timeout.max(1),
            }),
            None => DispatcherBuilder::new().slot_path(self.slot_path()),
        }
    }
}
