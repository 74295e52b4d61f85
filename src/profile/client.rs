//! 客户端配置
//!
//! 所有网络操作共享同一个只读配置（API 地址、会话 Cookie、超时等），
//! 并由它构建带凭证的 HTTP 客户端。

use crate::profile::state::LoadStrategy;
use anyhow::{Context, Result};
use reqwest::cookie::Jar;
use std::sync::Arc;
use std::time::Duration;

/// 默认 API 地址
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// 客户端配置
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// HTTP API 基础地址，例如 `http://localhost:8080`
    pub api_base_url: String,
    /// 会话 Cookie（例如 `JSESSIONID=...`），每个请求都会携带
    pub session_cookie: Option<String>,
    /// 单个请求超时
    pub request_timeout: Duration,
    /// 首次加载时三个请求的发起方式
    pub load_strategy: LoadStrategy,
}

impl ClientConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_cookie: None,
            request_timeout: Duration::from_secs(30),
            load_strategy: LoadStrategy::Sequential,
        }
    }

    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        // 去掉末尾的 `/`，避免拼出 `//api/...`
        self.api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_load_strategy(mut self, strategy: LoadStrategy) -> Self {
        self.load_strategy = strategy;
        self
    }

    /// 拼接完整的接口地址
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    /// 创建带凭证的 HTTP 客户端
    ///
    /// 会话 Cookie 预先放进 cookie jar（作用域为 API 地址）；服务器下发的
    /// `Set-Cookie` 写入同一个 jar，后续请求会一起带回。
    pub fn build_http_client(&self) -> Result<reqwest::Client> {
        let jar = Arc::new(self.cookie_jar()?);
        reqwest::ClientBuilder::new()
            .cookie_provider(jar)
            .timeout(self.request_timeout)
            .build()
            .context("创建 HTTP 客户端失败")
    }

    /// 把会话 Cookie（`a=1; b=2` 形式）写入新的 cookie jar
    fn cookie_jar(&self) -> Result<Jar> {
        let jar = Jar::default();
        let Some(cookie) = &self.session_cookie else {
            return Ok(jar);
        };

        reqwest::header::HeaderValue::from_str(cookie).context("无效的会话 Cookie")?;
        let url: reqwest::Url = self
            .api_base_url
            .parse()
            .with_context(|| format!("无效的 API 地址: {}", self.api_base_url))?;
        for pair in cookie.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            jar.add_cookie_str(pair, &url);
        }
        Ok(jar)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
