//! Webhook Sink - 把槽记录 POST 给远端渲染服务
//!
//! 网络交付必须有超时，避免一次分发无限阻塞。

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use crate::notification::payload::{ResolvedPayload, SlotRecord};
use crate::notification::sink::NotificationSink;

/// Webhook 配置
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// 接收端 URL（如 http://pod.local:8080/notification）
    pub url: String,
    /// 超时时间 (秒)
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 10,
        }
    }
}

/// Webhook Sink
///
/// 序号只在同一个 `WebhookSink` 实例内单调递增，不落盘：
/// 每次 `podnotify dispatch` 都是新进程，发出的 `sequence` 都从 1 开始。
/// 接收端判断新旧应以 `publishedAt` 为准。
#[derive(Debug)]
pub struct WebhookSink {
    client: Client,
    config: WebhookConfig,
    /// 本实例已发出的序号
    sequence: AtomicU64,
}

impl WebhookSink {
    pub fn new(config: WebhookConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            bail!("webhook url is required");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            sequence: AtomicU64::new(0),
        })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }
}

impl NotificationSink for WebhookSink {
    fn name(&self) -> &str {
        "webhook"
    }

    fn publish(&self, payload: &ResolvedPayload) -> Result<u64> {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let record = SlotRecord::new(sequence, payload.clone());

        let response = self
            .client
            .post(&self.config.url)
            .json(&record)
            .send()
            .with_context(|| format!("POST {}", self.config.url))?;

        let status = response.status();
        if !status.is_success() {
            warn!(channel = "webhook", url = %self.config.url, %status, "Webhook rejected notification");
            bail!("webhook returned {}", status);
        }

        debug!(channel = "webhook", url = %self.config.url, sequence, "Notification delivered");
        Ok(sequence)
    }
}
