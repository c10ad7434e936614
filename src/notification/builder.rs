//! 分发器构建器 - 根据设置选择 Sink 并组装分发器

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use super::dispatcher::NotificationDispatcher;
use super::registry::ConfigRegistry;
use super::sink::NotificationSink;
use super::sinks::{FileSlotSink, WebhookConfig, WebhookSink};

/// Sink 选择
#[derive(Debug, Clone)]
pub enum SinkSettings {
    /// 本地单槽文件
    FileSlot { path: PathBuf },
    /// HTTP Webhook
    Webhook(WebhookConfig),
}

impl Default for SinkSettings {
    fn default() -> Self {
        SinkSettings::FileSlot {
            path: FileSlotSink::default_path(),
        }
    }
}

/// 分发器构建器
pub struct DispatcherBuilder {
    registry: Option<Arc<ConfigRegistry>>,
    sink: SinkSettings,
    custom_sink: Option<Arc<dyn NotificationSink>>,
    dry_run: bool,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self {
            registry: None,
            sink: SinkSettings::default(),
            custom_sink: None,
            dry_run: false,
        }
    }

    /// 注入注册表（默认使用内置注册表）
    pub fn registry(mut self, registry: Arc<ConfigRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// 使用指定路径的文件槽
    pub fn slot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sink = SinkSettings::FileSlot { path: path.into() };
        self
    }

    /// 使用 Webhook 交付
    pub fn webhook(mut self, config: WebhookConfig) -> Self {
        self.sink = SinkSettings::Webhook(config);
        self
    }

    /// 直接注入 Sink（优先于 slot_path/webhook）
    pub fn sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.custom_sink = Some(sink);
        self
    }

    /// 设置 dry-run 模式
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn sink_settings(&self) -> &SinkSettings {
        &self.sink
    }

    pub fn build(self) -> Result<NotificationDispatcher> {
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(ConfigRegistry::baseline()));

        let sink: Arc<dyn NotificationSink> = match (self.custom_sink, self.sink) {
            (Some(sink), _) => sink,
            (None, SinkSettings::FileSlot { path }) => {
                info!(channel = "file_slot", path = %path.display(), "Using file slot sink");
                Arc::new(FileSlotSink::new(path))
            }
            (None, SinkSettings::Webhook(config)) => {
                info!(
                    channel = "webhook",
                    url = %config.url,
                    timeout_secs = config.timeout_secs,
                    "Using webhook sink"
                );
                Arc::new(WebhookSink::new(config)?)
            }
        };

        Ok(NotificationDispatcher::new(registry, sink).with_dry_run(self.dry_run))
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
