//! Pod Notify - 通知校验、显示配置解析与渲染端交付

pub mod cli;
pub mod notification;

pub use notification::{
    validate, ConfigRegistry, ConfigResolver, DispatchOutcome, DispatcherBuilder, DisplayConfig,
    read_slot, FileSlotSink, MediaSize, MemorySlotSink, NotificationData, NotificationDispatcher,
    NotificationSink, RawNotification, RejectionReason, ResolvedPayload, SlotRecord, SlotWatcher,
    TextSize, ValidatedEnvelope, WebhookConfig, WebhookSink,
};
