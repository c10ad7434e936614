//! 通知分发器 - 校验、解析配置、组装载荷并交给 Sink
//!
//! 每次 `dispatch` 都是一次独立的同步尝试，不重试。
//! 校验失败时 Sink 不会被调用，渲染端继续显示上一条通知。

use std::sync::Arc;
use tracing::{info, warn};

use super::envelope::{validate, RawNotification};
use super::payload::ResolvedPayload;
use super::registry::ConfigRegistry;
use super::rejection::RejectionReason;
use super::resolver::ConfigResolver;
use super::sink::NotificationSink;

/// 分发结果
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// 已写入 Sink
    Published { sink: String, sequence: u64 },
    /// dry-run：只解析，不写入
    DryRun(ResolvedPayload),
}

/// 通知分发器
pub struct NotificationDispatcher {
    resolver: ConfigResolver,
    sink: Arc<dyn NotificationSink>,
    /// 是否为 dry-run 模式
    dry_run: bool,
}

impl NotificationDispatcher {
    /// 创建分发器（注册表和 Sink 由调用方注入）
    pub fn new(registry: Arc<ConfigRegistry>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            resolver: ConfigResolver::new(registry),
            sink,
            dry_run: false,
        }
    }

    /// 设置 dry-run 模式
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// 校验并解析，不发布
    pub fn resolve(
        &self,
        raw: impl Into<RawNotification>,
    ) -> Result<ResolvedPayload, RejectionReason> {
        let raw = raw.into();
        let envelope = match validate(&raw) {
            Ok(envelope) => envelope,
            Err(reason) => {
                warn!(
                    reason = reason.kind(),
                    source = reason.from_source().unwrap_or("-"),
                    detail = %reason,
                    "Notification rejected"
                );
                return Err(reason);
            }
        };

        if envelope.is_blank() {
            warn!(source = envelope.source_label(), "Notification has no headline or info");
        }

        let config = self.resolver.resolve_config(&envelope);
        info!(
            source = envelope.source_label(),
            custom = self.resolver.registry().contains(&envelope.from_source),
            config = %config.describe(),
            "Resolved display config"
        );

        Ok(ResolvedPayload::new(envelope, config))
    }

    /// 分发一条通知
    pub fn dispatch(
        &self,
        raw: impl Into<RawNotification>,
    ) -> Result<DispatchOutcome, RejectionReason> {
        let payload = self.resolve(raw)?;

        if self.dry_run {
            info!(sink = self.sink.name(), "[DRY-RUN] Would publish notification");
            return Ok(DispatchOutcome::DryRun(payload));
        }

        match self.sink.publish(&payload) {
            Ok(sequence) => {
                info!(
                    sink = self.sink.name(),
                    source = %payload.from_source,
                    sequence,
                    "Notification published"
                );
                Ok(DispatchOutcome::Published {
                    sink: self.sink.name().to_string(),
                    sequence,
                })
            }
            Err(e) => {
                warn!(
                    sink = self.sink.name(),
                    source = %payload.from_source,
                    error = %e,
                    "Sink publish failed"
                );
                Err(RejectionReason::SinkFailure {
                    sink: self.sink.name().to_string(),
                    from_source: payload.from_source,
                    detail: format!("{:#}", e),
                })
            }
        }
    }

    pub fn sink_name(&self) -> &str {
        self.sink.name()
    }

    pub fn registry(&self) -> &ConfigRegistry {
        self.resolver.registry()
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::display_config::{DisplayConfig, MediaSize, TextSize};
    use crate::notification::sinks::MemorySlotSink;
    use anyhow::Result;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// 可切换失败的 Sink，成功时写入内部内存槽
    struct FlakySink {
        inner: MemorySlotSink,
        fail: AtomicBool,
    }

    impl FlakySink {
        fn new() -> Self {
            Self {
                inner: MemorySlotSink::new(),
                fail: AtomicBool::new(false),
            }
        }
    }

    impl NotificationSink for FlakySink {
        fn name(&self) -> &str {
            "flaky"
        }

        fn publish(&self, payload: &ResolvedPayload) -> Result<u64> {
            if self.fail.load(Ordering::SeqCst) {
                anyhow::bail!("device busy");
            }
            self.inner.publish(payload)
        }
    }

    fn base(source: &str, headline: &str) -> serde_json::Value {
        json!({
            "notifType": "base",
            "fromSource": source,
            "data": {
                "timestamp": "2026-02-17T10:30:00Z",
                "media": "",
                "headline": headline,
                "info": "",
                "seemore": ""
            }
        })
    }

    fn memory_dispatcher() -> (NotificationDispatcher, Arc<MemorySlotSink>) {
        let sink = Arc::new(MemorySlotSink::new());
        let dispatcher =
            NotificationDispatcher::new(Arc::new(ConfigRegistry::baseline()), sink.clone());
        (dispatcher, sink)
    }

    #[test]
    fn test_dispatch_publishes() {
        let (dispatcher, sink) = memory_dispatcher();

        let outcome = dispatcher.dispatch(base("NASA", "Galaxy")).unwrap();
        assert_eq!(
            outcome,
            DispatchOutcome::Published {
                sink: "memory".to_string(),
                sequence: 1,
            }
        );

        let record = sink.current().unwrap();
        assert_eq!(record.payload.from_source, "NASA");
        assert_eq!(record.payload.config.media_size, MediaSize::FULL);
    }

    #[test]
    fn test_rejections_never_reach_sink() {
        let (dispatcher, sink) = memory_dispatcher();

        let err = dispatcher.dispatch(json!({"notifType": "alert"})).unwrap_err();
        assert_eq!(err.kind(), "unsupported_type");

        let err = dispatcher.dispatch("[]").unwrap_err();
        assert_eq!(err.kind(), "malformed_input");

        assert_eq!(sink.publish_count(), 0);
        assert!(sink.current().is_none());
    }

    #[test]
    fn test_dispatcher_dry_run() {
        let (dispatcher, sink) = memory_dispatcher();
        let dispatcher = dispatcher.with_dry_run(true);
        assert!(dispatcher.is_dry_run());

        let outcome = dispatcher.dispatch(base("NFL", "Kickoff")).unwrap();
        match outcome {
            DispatchOutcome::DryRun(payload) => assert_eq!(payload.from_source, "NFL"),
            other => panic!("expected dry-run, got {:?}", other),
        }
        assert_eq!(sink.publish_count(), 0); // 不应该实际发送
    }

    #[test]
    fn test_sink_failure_keeps_previous_payload() {
        let sink = Arc::new(FlakySink::new());
        let dispatcher =
            NotificationDispatcher::new(Arc::new(ConfigRegistry::baseline()), sink.clone());

        dispatcher.dispatch(base("NFL", "first")).unwrap();
        sink.fail.store(true, Ordering::SeqCst);

        let err = dispatcher.dispatch(base("NASA", "second")).unwrap_err();
        assert_eq!(
            err,
            RejectionReason::SinkFailure {
                sink: "flaky".to_string(),
                from_source: "NASA".to_string(),
                detail: "device busy".to_string(),
            }
        );

        let current = sink.inner.current().unwrap();
        assert_eq!(current.payload.notification.headline, "first");

        // 失败后仍可继续分发
        sink.fail.store(false, Ordering::SeqCst);
        dispatcher.dispatch(base("NASA", "third")).unwrap();
        assert_eq!(sink.inner.current().unwrap().sequence, 2);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let (dispatcher, _sink) = memory_dispatcher();
        let envelope = base("NFL", "Chiefs Win Super Bowl!");

        let first = dispatcher.resolve(envelope.clone()).unwrap();
        let second = dispatcher.resolve(envelope.to_string()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_injected_registry() {
        let sink = Arc::new(MemorySlotSink::new());
        let weather = DisplayConfig::new(MediaSize::SMALL, TextSize::MEDIUM, TextSize::SMALL);
        let registry = ConfigRegistry::builder().source("WeatherAPI", weather).build();
        let dispatcher = NotificationDispatcher::new(Arc::new(registry), sink.clone());

        dispatcher.dispatch(base("WeatherAPI", "Storm warning")).unwrap();
        assert_eq!(sink.current().unwrap().payload.config, weather);
        assert_eq!(dispatcher.sink_name(), "memory");
        assert_eq!(dispatcher.registry().len(), 1);
    }
}
