//! 内存单槽 Sink - 进程内渲染端或测试使用

use anyhow::{anyhow, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::debug;

use crate::notification::payload::{ResolvedPayload, SlotRecord};
use crate::notification::sink::NotificationSink;

/// 内存单槽 Sink，序号即版本号
#[derive(Debug, Default)]
pub struct MemorySlotSink {
    slot: Mutex<Option<SlotRecord>>,
    publish_count: AtomicUsize,
}

impl MemorySlotSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前槽内容
    pub fn current(&self) -> Option<SlotRecord> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// 当前版本号（空槽为 0）
    pub fn version(&self) -> u64 {
        self.current().map(|r| r.sequence).unwrap_or(0)
    }

    /// 被调用发布的次数
    pub fn publish_count(&self) -> usize {
        self.publish_count.load(Ordering::SeqCst)
    }
}

impl NotificationSink for MemorySlotSink {
    fn name(&self) -> &str {
        "memory"
    }

    fn publish(&self, payload: &ResolvedPayload) -> Result<u64> {
        self.publish_count.fetch_add(1, Ordering::SeqCst);

        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow!("memory slot lock poisoned"))?;
        let sequence = slot.as_ref().map(|r| r.sequence).unwrap_or(0) + 1;
        *slot = Some(SlotRecord::new(sequence, payload.clone()));

        debug!(channel = "memory", sequence, "Slot replaced");
        Ok(sequence)
    }
}
