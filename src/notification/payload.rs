//! 交付载荷 - 渲染端读取的数据结构
//!
//! `ResolvedPayload` 只由输入和注册表决定；Sink 发布时再包一层
//! `SlotRecord`，附加递增序号和发布时间，渲染端据此判断内容是否更新。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::display_config::DisplayConfig;
use super::envelope::{NotificationData, ValidatedEnvelope};

/// 解析完成、可直接渲染的通知
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPayload {
    pub notification: NotificationData,
    pub config: DisplayConfig,
    pub from_source: String,
}

impl ResolvedPayload {
    pub fn new(envelope: ValidatedEnvelope, config: DisplayConfig) -> Self {
        Self {
            notification: envelope.data,
            config,
            from_source: envelope.from_source,
        }
    }
}

/// Sink 中保存的单槽记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRecord {
    /// 同一个槽内严格递增
    pub sequence: u64,
    pub published_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: ResolvedPayload,
}

impl SlotRecord {
    pub fn new(sequence: u64, payload: ResolvedPayload) -> Self {
        Self {
            sequence,
            published_at: Utc::now(),
            payload,
        }
    }
}
