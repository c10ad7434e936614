//! 具体 Sink 实现

pub mod file_slot;
pub mod memory;
pub mod webhook;

pub use file_slot::{read_slot, FileSlotSink};
pub use memory::MemorySlotSink;
pub use webhook::{WebhookConfig, WebhookSink};
