//! 个人主页视图
//!
//! 挂载时加载资料、好友、帖子；用户可以选择文件并上传头像。
//! 状态只通过 `&mut self` 修改；挂载或上传的 future 被丢弃时，
//! 迟到的响应不会再写入状态。

use crate::profile::api::ProfileApi;
use crate::profile::backend::{AvatarFile, AvatarUploadOutcome, ProfileBackend};
use crate::profile::client::ClientConfig;
use crate::profile::listener::{EmptyProfileListener, ProfileListener};
use crate::profile::models::{Friend, Post, UserProfile};
use crate::profile::render::{
    render_page, DefaultNavbar, DefaultPostView, NavbarRenderer, PostRenderer,
};
use crate::profile::state::{LoadStrategy, ProfileData, UploadStatus, ViewPhase};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 个人主页视图
pub struct ProfileView {
    backend: Arc<dyn ProfileBackend>,
    listener: Arc<dyn ProfileListener>,
    navbar: Box<dyn NavbarRenderer>,
    post_renderer: Box<dyn PostRenderer>,
    load_strategy: LoadStrategy,
    phase: ViewPhase,
    upload: UploadStatus,
    selected_file: Option<AvatarFile>,
    mounted: bool,
}

impl ProfileView {
    /// 按配置创建基于 HTTP 的视图
    pub fn new(config: ClientConfig) -> Result<Self> {
        let strategy = config.load_strategy;
        let api = ProfileApi::new(config)?;
        Ok(Self::with_backend(Arc::new(api), strategy))
    }

    /// 使用自定义数据来源
    pub fn with_backend(backend: Arc<dyn ProfileBackend>, load_strategy: LoadStrategy) -> Self {
        Self {
            backend,
            listener: Arc::new(EmptyProfileListener),
            navbar: Box::new(DefaultNavbar),
            post_renderer: Box::new(DefaultPostView),
            load_strategy,
            phase: ViewPhase::Loading,
            upload: UploadStatus::Idle,
            selected_file: None,
            mounted: false,
        }
    }

    /// 注册监听器
    pub fn set_listener(&mut self, listener: Arc<dyn ProfileListener>) {
        self.listener = listener;
    }

    pub fn set_navbar(&mut self, navbar: Box<dyn NavbarRenderer>) {
        self.navbar = navbar;
    }

    pub fn set_post_renderer(&mut self, post_renderer: Box<dyn PostRenderer>) {
        self.post_renderer = post_renderer;
    }

    pub fn phase(&self) -> &ViewPhase {
        &self.phase
    }

    pub fn upload_status(&self) -> &UploadStatus {
        &self.upload
    }

    /// 当前上传提示文本
    pub fn upload_message(&self) -> Option<String> {
        self.upload.message()
    }

    /// 首次加载，只执行一次；任何失败都只记录日志，不向上抛出
    pub async fn mount(&mut self) {
        if self.mounted {
            debug!("[ProfileView] 已挂载，忽略重复加载");
            return;
        }
        self.mounted = true;

        info!("[ProfileView] 🔄 开始加载个人主页，方式: {:?}", self.load_strategy);
        let phase = match self.load_strategy {
            LoadStrategy::Sequential => self.load_sequential().await,
            LoadStrategy::Concurrent => self.load_concurrent().await,
        };
        self.phase = phase;

        let loaded = self.phase.data().is_some();
        if loaded {
            info!("[ProfileView] ✅ 个人主页加载完成");
        } else {
            warn!("[ProfileView] 个人资料加载失败，显示默认提示");
        }
        self.listener.on_load_finished(loaded).await;
        self.notify_profile_changed().await;
    }

    /// 依次请求；某一步失败后放弃剩余请求，保留已拿到的数据
    async fn load_sequential(&self) -> ViewPhase {
        let profile = match self.backend.fetch_profile().await {
            Ok(profile) => profile,
            Err(e) => {
                error!("[ProfileView] 获取数据失败: {:#}", e);
                return ViewPhase::LoadFailed;
            }
        };

        let mut data = ProfileData::new(profile);
        if let Err(e) = self.load_lists(&mut data).await {
            error!("[ProfileView] 获取数据失败: {:#}", e);
        }
        ViewPhase::Ready(data)
    }

    async fn load_lists(&self, data: &mut ProfileData) -> Result<()> {
        data.friends = self.backend.fetch_friends().await?;
        data.posts = self.backend.fetch_posts().await?;
        Ok(())
    }

    /// 同时请求；好友、帖子的失败互不影响
    async fn load_concurrent(&self) -> ViewPhase {
        let (profile, friends, posts) = tokio::join!(
            self.backend.fetch_profile(),
            self.backend.fetch_friends(),
            self.backend.fetch_posts(),
        );

        let profile: UserProfile = match profile {
            Ok(profile) => profile,
            Err(e) => {
                error!("[ProfileView] 获取个人资料失败: {:#}", e);
                return ViewPhase::LoadFailed;
            }
        };
        let friends: Vec<Friend> = friends.unwrap_or_else(|e| {
            error!("[ProfileView] 获取好友列表失败: {:#}", e);
            Vec::new()
        });
        let posts: Vec<Post> = posts.unwrap_or_else(|e| {
            error!("[ProfileView] 获取帖子列表失败: {:#}", e);
            Vec::new()
        });

        ViewPhase::Ready(ProfileData {
            profile,
            friends,
            posts,
        })
    }

    /// 选择头像文件，`None` 表示清空选择
    pub fn select_file(&mut self, file: Option<AvatarFile>) {
        match &file {
            Some(f) => debug!("[ProfileView] 已选择文件: {}", f.file_name),
            None => debug!("[ProfileView] 已清空文件选择"),
        }
        self.selected_file = file;
    }

    /// 上传已选择的头像；成功后重新获取个人资料
    ///
    /// 不影响加载阶段、好友和帖子。
    pub async fn upload_avatar(&mut self) {
        let Some(file) = self.selected_file.clone() else {
            self.set_upload_status(UploadStatus::MissingFile).await;
            return;
        };

        match self.backend.upload_avatar(&file).await {
            Ok(AvatarUploadOutcome::Accepted) => {
                self.set_upload_status(UploadStatus::Uploaded).await;
                match self.backend.fetch_profile().await {
                    Ok(profile) => self.replace_profile(profile).await,
                    Err(e) => {
                        error!("[ProfileView] 上传头像失败: {:#}", e);
                        self.set_upload_status(UploadStatus::Failed).await;
                    }
                }
            }
            Ok(AvatarUploadOutcome::Rejected(body)) => {
                self.set_upload_status(UploadStatus::Rejected(body)).await;
            }
            Err(e) => {
                error!("[ProfileView] 上传头像失败: {:#}", e);
                self.set_upload_status(UploadStatus::Failed).await;
            }
        }
    }

    /// 整体替换个人资料
    async fn replace_profile(&mut self, profile: UserProfile) {
        if self.phase.is_loading() {
            debug!("[ProfileView] 尚未挂载，忽略刷新的个人资料");
            return;
        }
        if let Some(data) = self.phase.data_mut() {
            data.profile = profile;
        } else {
            // 首次加载没拿到资料时，好友和帖子也没有请求过
            self.phase = ViewPhase::Ready(ProfileData::new(profile));
        }
        info!("[ProfileView] 🔄 个人资料已刷新");
        self.notify_profile_changed().await;
    }

    async fn set_upload_status(&mut self, status: UploadStatus) {
        self.upload = status;
        if let Some(message) = self.upload.message() {
            info!("[ProfileView] 上传提示: {}", message);
            self.listener.on_upload_message(message).await;
        }
    }

    async fn notify_profile_changed(&self) {
        let Some(data) = self.phase.data() else {
            return;
        };
        match serde_json::to_string(&data.profile) {
            Ok(json) => self.listener.on_profile_changed(json).await,
            Err(e) => error!("[ProfileView] 序列化个人资料失败: {:?}", e),
        }
    }

    /// 渲染当前页面
    pub fn render(&self) -> String {
        render_page(
            &self.phase,
            &self.upload,
            self.navbar.as_ref(),
            self.post_renderer.as_ref(),
        )
    }
}
