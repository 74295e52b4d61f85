//! 页面与数据来源之间的接口
//!
//! `ProfileApi` 是基于 HTTP 的实现；测试中可以替换成内存实现。

use crate::profile::models::{Friend, Post, UserProfile};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;

/// 个人主页数据来源
#[async_trait]
pub trait ProfileBackend: Send + Sync {
    /// 获取个人资料
    async fn fetch_profile(&self) -> Result<UserProfile>;

    /// 获取好友列表
    async fn fetch_friends(&self) -> Result<Vec<Friend>>;

    /// 获取帖子列表，响应不是数组时返回空列表
    async fn fetch_posts(&self) -> Result<Vec<Post>>;

    /// 上传头像；服务器拒绝时返回 `Rejected`，网络异常时返回错误
    async fn upload_avatar(&self, file: &AvatarFile) -> Result<AvatarUploadOutcome>;
}

/// 头像上传结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarUploadOutcome {
    /// 2xx，响应体被忽略
    Accepted,
    /// 非 2xx，携带响应体原文
    Rejected(String),
}

/// 用户选择的头像文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl AvatarFile {
    /// 根据文件名推断 MIME 类型
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = guess_mime_type(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    /// 从磁盘读取文件
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("读取头像文件失败: {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "avatar".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

fn guess_mime_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
