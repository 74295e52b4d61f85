//! 个人主页模块
//!
//! 获取个人资料、好友、帖子并渲染页面，支持上传头像

pub mod api;
pub mod backend;
pub mod client;
pub mod listener;
pub mod models;
pub mod render;
pub mod serialization;
pub mod state;
pub mod view;

// 重新导出主要类型
pub use api::ProfileApi;
pub use backend::{AvatarFile, AvatarUploadOutcome, ProfileBackend};
pub use client::ClientConfig;
pub use listener::{EmptyProfileListener, ProfileListener};
pub use models::{EntityId, Friend, Post, UserProfile};
pub use render::{DefaultNavbar, DefaultPostView, NavbarRenderer, PostRenderer};
pub use state::{FriendStatus, LoadStrategy, ProfileData, UploadStatus, ViewPhase};
pub use view::ProfileView;
