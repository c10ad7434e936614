//! 通知信封 - 入站数据结构与校验
//!
//! 上游（体育、NASA、天气、本机消息）发来的通知格式：
//!
//! ```json
//! {
//!   "notifType": "base",
//!   "fromSource": "NFL",
//!   "data": {
//!     "timestamp": "2026-02-17T10:30:00Z",
//!     "media": "https://...",
//!     "headline": "Chiefs Win Super Bowl!",
//!     "info": "Kansas City Chiefs defeat the Eagles 31-28 in overtime.",
//!     "seemore": "https://..."
//!   }
//! }
//! ```
//!
//! 下游组件只接触 `ValidatedEnvelope`，不再直接读原始 JSON。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::rejection::RejectionReason;

/// 原始入站通知：已解析的 JSON 或未解析的文本
#[derive(Debug, Clone, PartialEq)]
pub enum RawNotification {
    Text(String),
    Value(Value),
}

impl From<&str> for RawNotification {
    fn from(s: &str) -> Self {
        RawNotification::Text(s.to_string())
    }
}

impl From<String> for RawNotification {
    fn from(s: String) -> Self {
        RawNotification::Text(s)
    }
}

impl From<Value> for RawNotification {
    fn from(v: Value) -> Self {
        RawNotification::Value(v)
    }
}

/// 支持的通知类型
///
/// 目前只有 `base`，保留标签字段以便以后扩展新格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifType {
    Base,
}

impl NotifType {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "base" => Some(NotifType::Base),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotifType::Base => "base",
        }
    }
}

impl std::fmt::Display for NotifType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 通知内容
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    /// ISO-8601 时间戳（不校验格式）
    pub timestamp: String,
    /// 图片/媒体链接，可为空
    pub media: String,
    /// 大字标题
    pub headline: String,
    /// 标题下方的小字
    pub info: String,
    /// 非空时渲染端显示「查看更多」按钮
    pub seemore: String,
}

/// 校验通过的通知
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEnvelope {
    pub notif_type: NotifType,
    /// 来源 ID，空字符串表示本机/未标注
    pub from_source: String,
    pub data: NotificationData,
}

impl ValidatedEnvelope {
    /// 是否显示「查看更多」
    pub fn has_see_more(&self) -> bool {
        !self.data.seemore.is_empty()
    }

    /// 没有任何可显示的文字
    pub fn is_blank(&self) -> bool {
        self.data.headline.is_empty() && self.data.info.is_empty()
    }

    /// 日志用的来源名
    pub fn source_label(&self) -> &str {
        if self.from_source.is_empty() {
            "local"
        } else {
            &self.from_source
        }
    }
}

/// 校验原始通知
///
/// 检查顺序：
/// 1. 必须是 JSON 对象，否则 `MalformedInput`
/// 2. `notifType` 必须为 `"base"`，否则 `UnsupportedType`
/// 3. `fromSource`/`data` 缺失时补默认值，不拒绝
pub fn validate(raw: &RawNotification) -> Result<ValidatedEnvelope, RejectionReason> {
    let parsed;
    let value = match raw {
        RawNotification::Text(text) => {
            parsed = serde_json::from_str::<Value>(text).map_err(|e| {
                RejectionReason::MalformedInput {
                    detail: format!("JSON decode error: {}", e),
                }
            })?;
            &parsed
        }
        RawNotification::Value(value) => value,
    };

    let record = value.as_object().ok_or_else(|| RejectionReason::MalformedInput {
        detail: format!("expected a JSON object, got {}", json_kind(value)),
    })?;

    let notif_type = match record.get("notifType") {
        Some(Value::String(tag)) => NotifType::parse(tag).ok_or_else(|| {
            RejectionReason::UnsupportedType {
                received: Some(tag.clone()),
                from_source: readable_source(record),
            }
        })?,
        None | Some(Value::Null) => {
            return Err(RejectionReason::UnsupportedType {
                received: None,
                from_source: readable_source(record),
            })
        }
        Some(other) => {
            return Err(RejectionReason::UnsupportedType {
                received: Some(other.to_string()),
                from_source: readable_source(record),
            })
        }
    };

    let from_source = text_field(record.get("fromSource"), "fromSource");
    let data = match record.get("data") {
        None | Some(Value::Null) => NotificationData::default(),
        Some(Value::Object(fields)) => normalize_data(fields),
        Some(other) => {
            warn!(
                source = %from_source,
                kind = json_kind(other),
                "Notification data is not an object, using empty data"
            );
            NotificationData::default()
        }
    };

    Ok(ValidatedEnvelope {
        notif_type,
        from_source,
        data,
    })
}

fn normalize_data(fields: &Map<String, Value>) -> NotificationData {
    NotificationData {
        timestamp: text_field(fields.get("timestamp"), "timestamp"),
        media: text_field(fields.get("media"), "media"),
        headline: text_field(fields.get("headline"), "headline"),
        info: text_field(fields.get("info"), "info"),
        seemore: text_field(fields.get("seemore"), "seemore"),
    }
}

/// 读取文本字段：缺失/null 为空，数字和布尔转成文本，数组/对象丢弃
fn text_field(value: Option<&Value>, field: &str) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => {
            warn!(field, kind = json_kind(other), "Ignoring non-text notification field");
            String::new()
        }
    }
}

fn readable_source(record: &Map<String, Value>) -> Option<String> {
    record
        .get("fromSource")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
