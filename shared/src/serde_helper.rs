//! 宽松的反序列化辅助函数
//!
//! 后端对数字字段的编码并不一致（`"12"` 与 `12` 都会出现），
//! 这里统一接受两种写法。

use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum StrOrNumber {
    Str(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

/// 接受字符串或数字，统一转换为 `u32`
pub fn u32_from_str_or_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match StrOrNumber::deserialize(deserializer)? {
        StrOrNumber::Str(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| D::Error::custom(format!("invalid number: {:?}", s))),
        StrOrNumber::Unsigned(n) => u32::try_from(n).map_err(D::Error::custom),
        StrOrNumber::Signed(n) => u32::try_from(n).map_err(D::Error::custom),
        StrOrNumber::Float(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => {
            Ok(f as u32)
        }
        StrOrNumber::Float(f) => Err(D::Error::custom(format!("invalid number: {}", f))),
    }
}

/// 接受字符串或数字，统一转换为 `String`
pub fn string_from_str_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StrOrNumber::deserialize(deserializer)? {
        StrOrNumber::Str(s) => s,
        StrOrNumber::Unsigned(n) => n.to_string(),
        StrOrNumber::Signed(n) => n.to_string(),
        StrOrNumber::Float(f) => f.to_string(),
    })
}
