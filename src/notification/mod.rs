//! 通知处理 - 校验入站通知、解析显示配置并交给渲染端
//!
//! # 流程
//! 1. `validate`：原始输入 → `ValidatedEnvelope`（或 `RejectionReason`）
//! 2. `ConfigResolver`：按 `fromSource` 从 `ConfigRegistry` 取显示配置
//! 3. `NotificationDispatcher`：组装 `ResolvedPayload` 并交给 `NotificationSink`
//! 4. 渲染端读取单槽（`SlotWatcher` / `read_slot`）
//!
//! # 使用示例
//! ```ignore
//! use pod_notify::notification::DispatcherBuilder;
//!
//! let dispatcher = DispatcherBuilder::new()
//!     .slot_path("/tmp/current_notification.json")
//!     .build()?;
//!
//! dispatcher.dispatch(r#"{"notifType":"base","fromSource":"NASA","data":{}}"#)?;
//! ```

pub mod builder;
pub mod dispatcher;
pub mod display_config;
pub mod envelope;
pub mod payload;
pub mod registry;
pub mod rejection;
pub mod resolver;
pub mod sink;
pub mod sinks;
pub mod watcher;

pub use builder::{DispatcherBuilder, SinkSettings};
pub use dispatcher::{DispatchOutcome, NotificationDispatcher};
pub use display_config::{DisplayConfig, MediaSize, TextSize};
pub use envelope::{validate, NotifType, NotificationData, RawNotification, ValidatedEnvelope};
pub use payload::{ResolvedPayload, SlotRecord};
pub use registry::{ConfigRegistry, RegistryBuilder};
pub use rejection::RejectionReason;
pub use resolver::ConfigResolver;
pub use sink::NotificationSink;
pub use sinks::{read_slot, FileSlotSink, MemorySlotSink, WebhookConfig, WebhookSink};
pub use watcher::SlotWatcher;
