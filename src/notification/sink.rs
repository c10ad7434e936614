//! Sink trait 定义 - 把解析好的通知交给渲染端

use anyhow::Result;

use super::payload::ResolvedPayload;

/// 交付渠道
///
/// 单槽语义：每次发布都整体替换上一条，不排队、不保留历史，
/// 也不确认渲染端是否已读。
pub trait NotificationSink: Send + Sync {
    /// 渠道名称（用于日志和错误信息）
    fn name(&self) -> &str;

    /// 发布载荷，成功时返回本次写入的序号
    fn publish(&self, payload: &ResolvedPayload) -> Result<u64>;
}
