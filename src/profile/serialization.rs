use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::warn;

/// 反序列化数组字段，处理 null 值
pub(crate) fn deserialize_vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt = Option::<Vec<T>>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// 反序列化标量字段，null 视为默认值（false、0 等）
pub(crate) fn deserialize_default_on_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let opt = Option::<T>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// 反序列化字符串字段，null 视为空字符串
pub(crate) fn deserialize_string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// 反序列化可选的 base64 图片，空字符串视为没有图片
pub(crate) fn deserialize_optional_base64<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.is_empty()))
}

/// 解码 base64 图片数据
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .context("base64 解码失败")
}

/// 把任意 JSON 值解释为列表：不是数组时返回空列表（不视为错误）
///
/// 数组中无法解析成 `T` 的元素会被跳过并记录警告，其余元素保留。
pub fn list_or_empty<T: DeserializeOwned>(value: serde_json::Value) -> Vec<T> {
    let serde_json::Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("[Serialization] 跳过无法解析的列表元素 #{}: {}", index, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Flags {
        #[serde(default, deserialize_with = "deserialize_default_on_null")]
        on: bool,
        #[serde(default, deserialize_with = "deserialize_default_on_null")]
        count: i64,
    }

    #[test]
    fn null_scalars_become_defaults() {
        let flags: Flags = serde_json::from_value(json!({"on": null, "count": null})).unwrap();
        assert_eq!(flags, Flags::default());

        let flags: Flags = serde_json::from_value(json!({"on": true, "count": 3})).unwrap();
        assert_eq!(flags, Flags { on: true, count: 3 });
    }

    #[test]
    fn non_array_values_become_empty_lists() {
        for value in [json!({"posts": []}), json!(null), json!("oops"), json!(42)] {
            let list: Vec<serde_json::Value> = list_or_empty(value);
            assert!(list.is_empty());
        }
    }

    #[test]
    fn arrays_are_kept() {
        let list: Vec<i64> = list_or_empty(json!([1, 2, 3]));
        assert_eq!(list, vec![1, 2, 3]);
    }

    #[test]
    fn bad_elements_are_skipped_not_fatal() {
        let list: Vec<i64> = list_or_empty(json!(["a", 2, null, 4]));
        assert_eq!(list, vec![2, 4]);
    }

    #[test]
    fn base64_decoding() {
        assert_eq!(decode_base64("aGVsbG8=").unwrap(), b"hello");
        assert!(decode_base64("not base64!!").is_err());
    }
}
