// 日志消息格式化
// 单值渲染与多值 JSON 数组编码

use serde::ser::{Error as _, Serialize, Serializer};
use std::fmt::Display;

/// 单值渲染：使用 `Display` 的人类可读形式
pub fn render_value<T: Display + ?Sized>(value: &T) -> String {
    value.to_string()
}

/// 把多个值编码为一个 JSON 数组字符串，保持调用顺序
pub fn encode_fields<I, T>(fields: I) -> Result<String, serde_json::Error>
where
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    let values: Vec<T> = fields.into_iter().collect();
    serde_json::to_string(&values)
}

/// 异构日志参数
///
/// `log_info!(a, b, c)` 会把每个参数包装成 `Field`，这样不同类型的值
/// 可以放进同一个数组。序列化失败会被延迟到整个数组编码时报告。
#[derive(Debug)]
pub struct Field(Result<serde_json::Value, serde_json::Error>);

impl Field {
    pub fn of<T: Serialize + ?Sized>(value: &T) -> Self {
        Self(serde_json::to_value(value))
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Ok(value) => value.serialize(serializer),
            Err(err) => Err(S::Error::custom(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_render_value_uses_display() {
        assert_eq!(render_value("plain text"), "plain text");
        assert_eq!(render_value(&42), "42");
        assert_eq!(render_value(&std::net::Ipv4Addr::LOCALHOST), "127.0.0.1");
    }

    #[test]
    fn test_encode_mixed_fields_in_order() {
        let encoded = encode_fields([Field::of("user"), Field::of(&7), Field::of(&true)]).unwrap();
        assert_eq!(encoded, r#"["user",7,true]"#);
    }

    #[test]
    fn test_encode_homogeneous_fields() {
        let encoded = encode_fields(vec!["a", "b"]).unwrap();
        assert_eq!(encoded, r#"["a","b"]"#);
    }

    #[test]
    fn test_invalid_field_fails_whole_array() {
        let mut bad = BTreeMap::new();
        bad.insert((1, 2), "tuple keys are not valid JSON object keys");

        let field = Field::of(&bad);
        assert!(field.0.is_err());
        assert!(encode_fields([Field::of("ok"), field]).is_err());
    }
}
