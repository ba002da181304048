//! JSON 形态分类 - trigger reason 和资产响应共用的解码步骤

use serde_json::Value;

/// trigger reason 中 `reason` 字段的解码结果
#[derive(Debug, Clone, PartialEq)]
pub enum ReasonValue {
    /// 无法解析或没有 `reason` 字段
    Absent,
    /// 字符串 reason
    Str(String),
    /// 整数 reason（i64 范围内）
    Int(i64),
    /// 存在但类型不支持
    Invalid(Value),
}

impl ReasonValue {
    /// 解析 trigger reason 文本
    pub fn decode(raw: &str) -> Self {
        let doc: Value = match serde_json::from_str(raw) {
            Ok(doc) => doc,
            Err(_) => return Self::Absent,
        };

        match doc.get("reason") {
            None => Self::Absent,
            Some(Value::String(s)) => Self::Str(s.clone()),
            Some(v) => match v.as_i64() {
                Some(code) => Self::Int(code),
                None => Self::Invalid(v.clone()),
            },
        }
    }
}

/// 单个资产响应的形态
#[derive(Debug, Clone, PartialEq)]
pub enum ReadingShape {
    /// 不是 JSON 数组（或无法解析）
    NotArray,
    /// 空数组
    Empty,
    /// 只有一个对象元素
    Single(Value),
    /// 只有一个元素但不是对象
    SingleNonObject,
    /// 多个元素，原样保留
    Many(Vec<Value>),
}

impl ReadingShape {
    /// 解析资产响应文本
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => Self::from_items(items),
            _ => Self::NotArray,
        }
    }

    fn from_items(mut items: Vec<Value>) -> Self {
        match items.len() {
            0 => Self::Empty,
            1 => match items.pop() {
                Some(item @ Value::Object(_)) => Self::Single(item),
                _ => Self::SingleNonObject,
            },
            _ => Self::Many(items),
        }
    }

    /// 该形态贡献给聚合结果的 reading
    pub fn into_readings(self) -> Vec<Value> {
        match self {
            Self::Single(item) => vec![item],
            Self::Many(items) => items,
            Self::NotArray | Self::Empty | Self::SingleNonObject => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reason_string() {
        assert_eq!(
            ReasonValue::decode(r#"{"reason":"sensor-fault"}"#),
            ReasonValue::Str("sensor-fault".to_string())
        );
    }

    #[test]
    fn test_reason_integer() {
        assert_eq!(ReasonValue::decode(r#"{"reason":42}"#), ReasonValue::Int(42));
        assert_eq!(ReasonValue::decode(r#"{"reason":-7}"#), ReasonValue::Int(-7));
    }

    #[test]
    fn test_reason_absent() {
        assert_eq!(ReasonValue::decode("{}"), ReasonValue::Absent);
        assert_eq!(ReasonValue::decode("not json"), ReasonValue::Absent);
        assert_eq!(ReasonValue::decode(""), ReasonValue::Absent);
        assert_eq!(ReasonValue::decode("[1]"), ReasonValue::Absent);
    }

    #[test]
    fn test_reason_invalid_types() {
        assert_eq!(ReasonValue::decode(r#"{"reason":true}"#), ReasonValue::Invalid(json!(true)));
        assert_eq!(ReasonValue::decode(r#"{"reason":1.5}"#), ReasonValue::Invalid(json!(1.5)));
        // 超出 i64 范围
        assert!(matches!(
            ReasonValue::decode(r#"{"reason":18446744073709551615}"#),
            ReasonValue::Invalid(_)
        ));
    }

    #[test]
    fn test_reading_shapes() {
        assert_eq!(ReadingShape::decode("[]"), ReadingShape::Empty);
        assert_eq!(ReadingShape::decode("oops"), ReadingShape::NotArray);
        assert_eq!(ReadingShape::decode(r#"{"a":1}"#), ReadingShape::NotArray);
        assert_eq!(ReadingShape::decode(r#"[{"a":1}]"#), ReadingShape::Single(json!({"a":1})));
        assert_eq!(ReadingShape::decode("[5]"), ReadingShape::SingleNonObject);
        assert_eq!(
            ReadingShape::decode(r#"[{"a":1}, 2, "x"]"#),
            ReadingShape::Many(vec![json!({"a":1}), json!(2), json!("x")])
        );
    }

    #[test]
    fn test_into_readings() {
        assert!(ReadingShape::SingleNonObject.into_readings().is_empty());
        assert_eq!(ReadingShape::Single(json!({"a":1})).into_readings(), vec![json!({"a":1})]);
    }
}
