//! 个人主页数据模型
//!
//! 结构体可以直接从服务器返回的 JSON 反序列化，缺失的字段使用默认值。

use crate::profile::serialization::{
    decode_base64, deserialize_default_on_null, deserialize_optional_base64,
    deserialize_string_or_null, deserialize_vec_or_null,
};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 实体 ID，服务器可能返回数字或字符串
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

/// 当前登录用户的个人资料
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub username: String,
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub email: String,
    /// 头像（base64 编码的图片），空字符串视为没有头像
    #[serde(default, deserialize_with = "deserialize_optional_base64")]
    pub image: Option<String>,
    /// 是否已是好友
    #[serde(default, deserialize_with = "deserialize_default_on_null")]
    pub friend: bool,
    /// 是否已发送好友申请
    #[serde(default, deserialize_with = "deserialize_default_on_null")]
    pub friend_pending: bool,
}

impl UserProfile {
    /// 解码头像为原始字节，没有头像时返回 `None`
    pub fn image_bytes(&self) -> Result<Option<Vec<u8>>> {
        self.image.as_deref().map(decode_base64).transpose()
    }
}

/// 好友
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub username: String,
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub email: String,
}

/// 帖子，页面不解释其内容，原样交给帖子组件渲染
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_optional_base64")]
    pub image: Option<String>,
    /// 作者引用（对象、ID 或用户名，按服务器原样保留）
    #[serde(default)]
    pub created_by: serde_json::Value,
    /// 创建时间（ISO 字符串或 `[年, 月, 日, 时, 分, 秒]` 数组，原样保留）
    #[serde(default)]
    pub created_at: serde_json::Value,
    #[serde(default, deserialize_with = "deserialize_default_on_null")]
    pub likes_count: i64,
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub comments: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "deserialize_default_on_null")]
    pub liked: bool,
}

impl Post {
    /// 作者显示名
    pub fn author_name(&self) -> Option<String> {
        match &self.created_by {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Object(map) => map
                .get("username")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            _ => None,
        }
    }

    /// 创建时间的显示文本，无法识别的格式按原文输出
    pub fn created_at_display(&self) -> Option<String> {
        match &self.created_at {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(format_timestamp_str(s)),
            serde_json::Value::Array(parts) => {
                let nums: Vec<i64> = parts.iter().filter_map(|v| v.as_i64()).collect();
                Some(format_timestamp_parts(&nums).unwrap_or_else(|| self.created_at.to_string()))
            }
            other => Some(other.to_string()),
        }
    }
}

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

fn format_timestamp_str(s: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.format(DISPLAY_FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DISPLAY_FORMAT).to_string();
    }
    s.to_string()
}

// Jackson 默认把 LocalDateTime 序列化成数组
fn format_timestamp_parts(parts: &[i64]) -> Option<String> {
    if parts.len() < 3 {
        return None;
    }
    let get = |i: usize| parts.get(i).copied().unwrap_or(0);
    let dt = NaiveDate::from_ymd_opt(get(0) as i32, get(1) as u32, get(2) as u32)?
        .and_hms_opt(get(3) as u32, get(4) as u32, get(5) as u32)?;
    Some(dt.format(DISPLAY_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_decodes_camel_case_and_defaults() {
        let profile: UserProfile = serde_json::from_value(json!({
            "username": "alice",
            "email": "alice@example.com",
            "image": null,
            "friendPending": true
        }))
        .unwrap();
        assert_eq!(profile.username, "alice");
        assert_eq!(profile.email, "alice@example.com");
        assert_eq!(profile.image, None);
        assert!(!profile.friend);
        assert!(profile.friend_pending);
    }

    #[test]
    fn null_flags_fall_back_to_defaults() {
        let profile: UserProfile = serde_json::from_value(json!({
            "username": "alice",
            "friend": null,
            "friendPending": null
        }))
        .unwrap();
        assert_eq!(profile.username, "alice");
        assert!(!profile.friend);
        assert!(!profile.friend_pending);
    }

    #[test]
    fn post_with_null_scalars_still_decodes() {
        let post: Post = serde_json::from_value(json!({
            "id": 9,
            "content": "hello",
            "likesCount": null,
            "liked": null,
            "createdBy": null
        }))
        .unwrap();
        assert_eq!(post.content, "hello");
        assert_eq!(post.likes_count, 0);
        assert!(!post.liked);
        assert_eq!(post.author_name(), None);
    }

    #[test]
    fn empty_image_counts_as_missing() {
        let profile: UserProfile =
            serde_json::from_value(json!({"username": "bob", "image": ""})).unwrap();
        assert_eq!(profile.image, None);
        assert_eq!(profile.image_bytes().unwrap(), None);
    }

    #[test]
    fn image_bytes_decodes_base64() {
        let profile: UserProfile =
            serde_json::from_value(json!({"username": "bob", "image": "aGVsbG8="})).unwrap();
        assert_eq!(profile.image_bytes().unwrap(), Some(b"hello".to_vec()));
    }

    #[test]
    fn ids_can_be_numbers_or_strings() {
        let friends: Vec<Friend> = serde_json::from_value(json!([
            {"id": 7, "username": "carol", "email": "c@example.com"},
            {"id": "u-8", "username": "dave", "email": null}
        ]))
        .unwrap();
        assert_eq!(friends[0].id, Some(EntityId::Number(7)));
        assert_eq!(friends[1].id.as_ref().unwrap().to_string(), "u-8");
        assert_eq!(friends[1].email, "");
    }

    #[test]
    fn post_keeps_opaque_fields() {
        let post: Post = serde_json::from_value(json!({
            "id": 1,
            "content": "hi",
            "createdBy": {"id": 3, "username": "alice"},
            "createdAt": [2024, 3, 9, 14, 5, 0],
            "likesCount": 4,
            "comments": null,
            "liked": true
        }))
        .unwrap();
        assert_eq!(post.author_name().as_deref(), Some("alice"));
        assert_eq!(post.created_at_display().as_deref(), Some("2024-03-09 14:05"));
        assert_eq!(post.likes_count, 4);
        assert!(post.comments.is_empty());
        assert!(post.liked);
        assert_eq!(post.created_by["id"], json!(3));
    }

    #[test]
    fn created_at_formats() {
        let mut post = Post {
            created_at: json!("2024-01-02T03:04:05.123"),
            ..Default::default()
        };
        assert_eq!(post.created_at_display().as_deref(), Some("2024-01-02 03:04"));

        post.created_at = json!("2024-01-02T03:04:05Z");
        assert_eq!(post.created_at_display().as_deref(), Some("2024-01-02 03:04"));

        post.created_at = json!("yesterday");
        assert_eq!(post.created_at_display().as_deref(), Some("yesterday"));

        post.created_at = serde_json::Value::Null;
        assert_eq!(post.created_at_display(), None);
    }
}
