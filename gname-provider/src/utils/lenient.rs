//! 宽松字段反序列化
//!
//! GNAME 的接口文档把 `id`、`mx`、`ttl` 等字段写成字符串，
//! 实际响应里有时是数字。这里统一收成 `String`。

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    I64(i64),
    U64(u64),
    F64(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
            Self::I64(n) => n.to_string(),
            Self::U64(n) => n.to_string(),
            Self::F64(n) => n.to_string(),
        }
    }
}

/// 反序列化：字符串或数字 -> `String`，`null` 视为空串
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?
        .map(StringOrNumber::into_string)
        .unwrap_or_default())
}

/// 反序列化：字符串或数字 -> `Option<String>`，空串视为缺失
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?
        .map(StringOrNumber::into_string)
        .filter(|s| !s.is_empty()))
}
