//! 通知记录 - 交给 ingest sink 的结构化输出

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::aggregator::AggregatedPayload;
use super::decode::ReasonValue;
use super::escape::escape_json;

/// `event` 字段：字符串或整数 reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventValue {
    Text(String),
    Code(i64),
}

/// 记录字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFields {
    /// 配置的描述
    pub description: String,
    /// 触发原因（只有成功解析时才存在）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventValue>,
    /// 通知名称
    pub rule: String,
    /// 转义后的聚合 JSON
    pub store: String,
}

impl RecordFields {
    /// 组装字段
    ///
    /// `trigger_reason` 是规则给出的 JSON 文本，其中的 `reason` 决定 `event` 字段。
    pub fn build(
        description: &str,
        trigger_reason: &str,
        notification_name: &str,
        payload: &AggregatedPayload,
    ) -> Self {
        let event = match ReasonValue::decode(trigger_reason) {
            ReasonValue::Absent => None,
            ReasonValue::Str(s) => Some(EventValue::Text(s)),
            ReasonValue::Int(code) => Some(EventValue::Code(code)),
            ReasonValue::Invalid(value) => {
                error!(
                    reason = %value,
                    "The reason returned from the rule for delivery is of a bad type"
                );
                None
            }
        };

        Self {
            description: description.to_string(),
            event,
            rule: notification_name.to_string(),
            store: escape_json(&payload.to_compact_json()),
        }
    }
}

/// 通知记录（每次 notify 新建，交给 sink 后不再保留）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// 记录名（配置项 customasset）
    #[serde(rename = "asset")]
    pub asset_name: String,
    /// UTC 时间戳，格式 `YYYY-MM-DD HH:MM:SS.ffffff+00:00`
    pub timestamp: String,
    #[serde(rename = "readings")]
    pub fields: RecordFields,
}

impl NotificationRecord {
    /// 以当前时间创建记录
    pub fn new(asset_name: impl Into<String>, fields: RecordFields) -> Self {
        Self::at(asset_name, fields, Utc::now())
    }

    /// 以指定时间创建记录
    pub fn at(asset_name: impl Into<String>, fields: RecordFields, ts: DateTime<Utc>) -> Self {
        Self {
            asset_name: asset_name.into(),
            timestamp: format_timestamp(ts),
            fields,
        }
    }
}

/// 格式化为带微秒的 UTC 时间
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    format!("{}+00:00", ts.format("%Y-%m-%d %H:%M:%S%.6f"))
}
