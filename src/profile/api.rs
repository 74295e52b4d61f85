//! 个人主页 HTTP API 客户端
//!
//! 负责所有个人主页相关的 HTTP 请求

use crate::profile::backend::{AvatarFile, AvatarUploadOutcome, ProfileBackend};
use crate::profile::client::ClientConfig;
use crate::profile::models::{Friend, Post, UserProfile};
use crate::profile::serialization::list_or_empty;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub const PROFILE_PATH: &str = "/api/profile/main";
pub const FRIENDS_PATH: &str = "/api/profile/fr";
pub const POSTS_PATH: &str = "/api/profile/post";
pub const AVATAR_PATH: &str = "/api/profile/avatar";

/// 个人主页相关的 HTTP API 客户端
pub struct ProfileApi {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ProfileApi {
    /// 按配置创建带凭证的客户端
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = config.build_http_client()?;
        Ok(Self::with_client(client, config))
    }

    /// 使用外部配置好的 `reqwest::Client`
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    /// GET 一个 JSON 接口，非 2xx 或无法解析时返回错误
    async fn get_json(&self, path: &str, operation_name: &str) -> Result<serde_json::Value> {
        let operation_id = Uuid::new_v4().to_string();
        let url = self.config.endpoint(path);

        info!("[ProfileAPI] 📡 请求{}", operation_name);
        debug!("[ProfileAPI]   请求URL: {}, 操作ID: {}", url, operation_id);

        let response = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .header("operationID", &operation_id)
            .send()
            .await
            .with_context(|| format!("{}请求失败", operation_name))?;

        let status = response.status();
        let body_bytes = response.bytes().await.context("读取响应 body 失败")?;
        let body_str = String::from_utf8_lossy(&body_bytes);
        debug!("[ProfileAPI] {}响应 Body: {}", operation_name, body_str);

        if !status.is_success() {
            error!(
                "[ProfileAPI] {}请求失败，HTTP状态: {}, 响应: {}",
                operation_name, status, body_str
            );
            return Err(anyhow::anyhow!("HTTP 错误 {}: {}", status, body_str));
        }

        serde_json::from_slice(&body_bytes).map_err(|e| {
            error!(
                "[ProfileAPI] {}反序列化失败: {:?}\n原始响应: {}",
                operation_name, e, body_str
            );
            anyhow::anyhow!("反序列化响应失败: {:?}", e)
        })
    }
}

#[async_trait]
impl ProfileBackend for ProfileApi {
    async fn fetch_profile(&self) -> Result<UserProfile> {
        let value = self.get_json(PROFILE_PATH, "个人资料").await?;
        let profile: UserProfile =
            serde_json::from_value(value).context("个人资料反序列化失败")?;
        info!("[ProfileAPI] ✅ 个人资料响应，用户名: {}", profile.username);
        Ok(profile)
    }

    async fn fetch_friends(&self) -> Result<Vec<Friend>> {
        let value = self.get_json(FRIENDS_PATH, "好友列表").await?;
        let friends: Vec<Friend> =
            serde_json::from_value(value).context("好友列表反序列化失败")?;
        info!("[ProfileAPI] ✅ 好友列表响应，好友数: {}", friends.len());
        Ok(friends)
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let value = self.get_json(POSTS_PATH, "帖子列表").await?;
        if !value.is_array() {
            warn!("[ProfileAPI] 帖子列表响应不是数组，按空列表处理");
        }
        let posts: Vec<Post> = list_or_empty(value);
        info!("[ProfileAPI] ✅ 帖子列表响应，帖子数: {}", posts.len());
        Ok(posts)
    }

    async fn upload_avatar(&self, file: &AvatarFile) -> Result<AvatarUploadOutcome> {
        let operation_id = Uuid::new_v4().to_string();
        let url = self.config.endpoint(AVATAR_PATH);

        info!(
            "[ProfileAPI] 📤 上传头像: {} ({} 字节)",
            file.file_name,
            file.bytes.len()
        );
        debug!("[ProfileAPI]   请求URL: {}, 操作ID: {}", url, operation_id);

        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .context("无效的 MIME 类型")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .header("operationID", &operation_id)
            .multipart(form)
            .send()
            .await
            .context("上传头像请求失败")?;

        let status = response.status();
        if status.is_success() {
            info!("[ProfileAPI] ✅ 头像上传成功，HTTP状态: {}", status);
            return Ok(AvatarUploadOutcome::Accepted);
        }

        let text = response.text().await.context("读取响应失败")?;
        error!(
            "[ProfileAPI] 头像上传被拒绝，HTTP状态: {}, 响应: {}",
            status, text
        );
        Ok(AvatarUploadOutcome::Rejected(text))
    }
}
