//! 分发失败原因

/// 通知被拒绝或未能交付的原因
///
/// 三种情况都可恢复：调用方记录原因后继续处理下一条通知。
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// 输入不是结构化记录（JSON 解析失败或不是对象）
    MalformedInput { detail: String },
    /// 记录合法但 notifType 不受支持或缺失
    UnsupportedType {
        /// 收到的 notifType（缺失时为 None）
        received: Option<String>,
        /// 可读取时附带来源，便于排查
        from_source: Option<String>,
    },
    /// Sink 写入未完成
    SinkFailure {
        sink: String,
        from_source: String,
        detail: String,
    },
}

impl RejectionReason {
    /// 稳定的类别标签（日志/CLI 输出用）
    pub fn kind(&self) -> &'static str {
        match self {
            RejectionReason::MalformedInput { .. } => "malformed_input",
            RejectionReason::UnsupportedType { .. } => "unsupported_type",
            RejectionReason::SinkFailure { .. } => "sink_failure",
        }
    }

    /// 相关来源（如果能识别）
    pub fn from_source(&self) -> Option<&str> {
        match self {
            RejectionReason::MalformedInput { .. } => None,
            RejectionReason::UnsupportedType { from_source, .. } => from_source.as_deref(),
            RejectionReason::SinkFailure { from_source, .. } => Some(from_source),
        }
    }

    /// 是否在到达 Sink 之前就被拒绝
    pub fn is_validation(&self) -> bool {
        !matches!(self, RejectionReason::SinkFailure { .. })
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::MalformedInput { detail } => {
                write!(f, "malformed input: {}", detail)
            }
            RejectionReason::UnsupportedType { received, from_source } => {
                match received {
                    Some(t) => write!(f, "unsupported notifType {:?}", t)?,
                    None => write!(f, "missing notifType")?,
                }
                if let Some(source) = from_source {
                    write!(f, " (fromSource {:?})", source)?;
                }
                Ok(())
            }
            RejectionReason::SinkFailure { sink, from_source, detail } => {
                write!(
                    f,
                    "sink {} failed for fromSource {:?}: {}",
                    sink, from_source, detail
                )
            }
        }
    }
}

impl std::error::Error for RejectionReason {}
