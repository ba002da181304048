//! 插件配置视图 - 记录名、描述和资产映射
//!
//! 配置 category 是一个 JSON 对象，每个配置项形如
//! `{"value": "...", "default": "..."}`。我们只关心三个配置项：
//! - `customasset`：输出记录的名称
//! - `description`：描述文本
//! - `jsonconfig`：资产名 → datapoint 名列表 的 JSON 对象

use anyhow::{anyhow, Result};
use serde_json::Value;
use tracing::debug;

/// 记录名配置项
pub const ITEM_RECORD_NAME: &str = "customasset";
/// 描述配置项
pub const ITEM_DESCRIPTION: &str = "description";
/// 资产映射配置项
pub const ITEM_JSON_CONFIG: &str = "jsonconfig";

/// 插件配置快照
///
/// 构造后不可变；重新配置时整体替换，保证 notify 看到的字段一致。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginConfig {
    /// 输出记录名
    pub record_name: String,
    /// 描述
    pub description: String,
    /// 原始 jsonconfig 文本
    pub json_config: String,
    /// 从 jsonconfig 派生的资产名（按声明顺序）
    source_names: Vec<String>,
}

impl PluginConfig {
    /// 从三个字段创建配置
    pub fn new(
        record_name: impl Into<String>,
        description: impl Into<String>,
        json_config: impl Into<String>,
    ) -> Self {
        let json_config = json_config.into();
        let source_names = parse_source_names(&json_config);

        Self {
            record_name: record_name.into(),
            description: description.into(),
            json_config,
            source_names,
        }
    }

    /// 从配置 category 文档解析
    ///
    /// 文档本身必须是 JSON 对象；缺失的配置项按空字符串处理。
    pub fn from_category(raw: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(raw)
            .map_err(|e| anyhow!("Invalid configuration category: {}", e))?;

        if !doc.is_object() {
            return Err(anyhow!("Configuration category must be a JSON object"));
        }

        let config = Self::new(
            item_value(&doc, ITEM_RECORD_NAME),
            item_value(&doc, ITEM_DESCRIPTION),
            item_value(&doc, ITEM_JSON_CONFIG),
        );

        debug!(
            record_name = %config.record_name,
            sources = config.source_names.len(),
            "Loaded plugin configuration"
        );

        Ok(config)
    }

    /// 配置的资产名，顺序与 jsonconfig 中的声明顺序一致
    pub fn source_names(&self) -> &[String] {
        &self.source_names
    }

    /// 资产对应的 datapoint 名列表（目前仅作参考，不参与聚合）
    pub fn datapoints(&self, source: &str) -> Vec<String> {
        let doc: Value = match serde_json::from_str(&self.json_config) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        match doc.get(source).and_then(|d| d.as_array()) {
            Some(names) => names
                .iter()
                .filter_map(|n| n.as_str())
                .map(|n| n.to_string())
                .collect(),
            None => Vec::new(),
        }
    }
}

/// 从 jsonconfig 中取出资产名；缺失或格式错误时返回空列表
fn parse_source_names(json_config: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(json_config) {
        Ok(Value::Object(map)) => map.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

/// 读取配置项的值：`value` 优先，其次 `default`，也接受直接写成字符串的配置项
fn item_value(doc: &Value, key: &str) -> String {
    let item = match doc.get(key) {
        Some(item) => item,
        None => return String::new(),
    };

    let value = match item {
        Value::Object(fields) => fields.get("value").or_else(|| fields.get("default")),
        other => Some(other),
    };

    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        // JSON 类型的配置项可能直接内嵌为对象
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_names_follow_declaration_order() {
        let config = PluginConfig::new(
            "alarm1",
            "Overheat",
            r#"{"zeta":[],"alpha":["a"],"mid":["x","y"]}"#,
        );
        assert_eq!(config.source_names(), &["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_source_keys_collapse() {
        let config = PluginConfig::new("r", "d", r#"{"a":[],"b":[],"a":["x"]}"#);
        assert_eq!(config.source_names(), &["a", "b"]);
        // 后出现的定义生效
        assert_eq!(config.datapoints("a"), vec!["x"]);
    }

    #[test]
    fn test_malformed_json_config_yields_no_sources() {
        assert!(PluginConfig::new("r", "d", "").source_names().is_empty());
        assert!(PluginConfig::new("r", "d", "{not json").source_names().is_empty());
        assert!(PluginConfig::new("r", "d", r#"["temp"]"#).source_names().is_empty());
    }

    #[test]
    fn test_datapoints_lookup() {
        let config = PluginConfig::new("r", "d", r#"{"temp":["t1","t2"],"odd":"x"}"#);
        assert_eq!(config.datapoints("temp"), vec!["t1", "t2"]);
        assert!(config.datapoints("odd").is_empty());
        assert!(config.datapoints("missing").is_empty());
    }

    #[test]
    fn test_from_category_value_and_default() {
        let raw = r#"{
            "customasset": {"type": "string", "default": "event", "value": "alarm1"},
            "description": {"type": "string", "default": "Overheat"},
            "jsonconfig": {"type": "JSON", "value": "{\"temp\":[],\"pressure\":[]}"}
        }"#;
        let config = PluginConfig::from_category(raw).unwrap();
        assert_eq!(config.record_name, "alarm1");
        assert_eq!(config.description, "Overheat");
        assert_eq!(config.source_names(), &["temp", "pressure"]);
    }

    #[test]
    fn test_from_category_embedded_object_and_missing_items() {
        let raw = r#"{"jsonconfig": {"value": {"b": [], "a": []}}}"#;
        let config = PluginConfig::from_category(raw).unwrap();
        assert_eq!(config.record_name, "");
        assert_eq!(config.description, "");
        assert_eq!(config.source_names(), &["b", "a"]);
    }

    #[test]
    fn test_from_category_flat_strings() {
        let raw = r#"{"customasset": "alarm1", "description": "d", "jsonconfig": "{\"temp\":[]}"}"#;
        let config = PluginConfig::from_category(raw).unwrap();
        assert_eq!(config.record_name, "alarm1");
        assert_eq!(config.source_names(), &["temp"]);
    }

    #[test]
    fn test_from_category_rejects_non_object() {
        assert!(PluginConfig::from_category("not json").is_err());
        assert!(PluginConfig::from_category("[1,2]").is_err());
    }
}
