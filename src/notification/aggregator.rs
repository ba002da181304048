//! 聚合器 - 把各资产的最新 reading 合并成一个数组

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::decode::ReadingShape;
use crate::storage::ReadingSource;

/// 聚合后的 payload，序列化为 `{"readings": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPayload {
    pub readings: Vec<Value>,
}

impl AggregatedPayload {
    /// 紧凑 JSON 文本
    pub fn to_compact_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"readings":[]}"#.to_string())
    }
}

/// 依次读取每个资产并合并
///
/// 顺序与 `source_names` 一致；单个资产失败只会让它没有贡献，不影响其余资产。
pub fn aggregate(source_names: &[String], reader: &dyn ReadingSource) -> AggregatedPayload {
    let mut payload = AggregatedPayload::default();

    for name in source_names {
        let raw = match reader.fetch_latest(name) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(asset = %name, error = %e, "Skipping asset, fetch failed");
                continue;
            }
        };

        let shape = ReadingShape::decode(&raw);
        match &shape {
            ReadingShape::NotArray => {
                warn!(asset = %name, "Skipping asset, response is not a JSON array");
            }
            ReadingShape::SingleNonObject => {
                debug!(asset = %name, "Skipping asset, single reading is not an object");
            }
            _ => {}
        }

        let readings = shape.into_readings();
        debug!(asset = %name, count = readings.len(), "Aggregated readings");
        payload.readings.extend(readings);
    }

    payload
}
