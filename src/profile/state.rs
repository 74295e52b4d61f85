//! 页面状态
//!
//! 加载阶段（`ViewPhase`）与头像上传状态（`UploadStatus`）相互独立。

use crate::profile::models::{Friend, Post, UserProfile};
use serde::Serialize;

/// 首次加载时三个请求的发起方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStrategy {
    /// 依次请求资料、好友、帖子，任一失败则放弃后续请求
    #[default]
    Sequential,
    /// 同时发起三个请求，资料失败视为加载失败，好友/帖子失败各自留空
    Concurrent,
}

/// 加载成功后的页面数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileData {
    pub profile: UserProfile,
    pub friends: Vec<Friend>,
    pub posts: Vec<Post>,
}

impl ProfileData {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            friends: Vec::new(),
            posts: Vec::new(),
        }
    }

    pub fn friend_status(&self) -> FriendStatus {
        FriendStatus::of(&self.profile)
    }
}

/// 页面加载阶段
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewPhase {
    /// 首次加载尚未结束
    #[default]
    Loading,
    /// 已拿到个人资料（好友、帖子可能因失败而为空）
    Ready(ProfileData),
    /// 个人资料没有拿到
    LoadFailed,
}

impl ViewPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewPhase::Loading)
    }

    pub fn data(&self) -> Option<&ProfileData> {
        match self {
            ViewPhase::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub(crate) fn data_mut(&mut self) -> Option<&mut ProfileData> {
        match self {
            ViewPhase::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// 头像上传状态
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    /// 没有选择文件
    MissingFile,
    /// 上传成功
    Uploaded,
    /// 服务器拒绝，携带响应原文
    Rejected(String),
    /// 网络异常
    Failed,
}

impl UploadStatus {
    /// 展示给用户的提示文本，`Idle` 时没有提示
    pub fn message(&self) -> Option<String> {
        match self {
            UploadStatus::Idle => None,
            UploadStatus::MissingFile => Some("Please select a file".to_string()),
            UploadStatus::Uploaded => Some("Avatar updated successfully!".to_string()),
            UploadStatus::Rejected(body) => Some(format!("Error: {}", body)),
            UploadStatus::Failed => Some("Failed to upload avatar".to_string()),
        }
    }
}

/// 与当前用户的好友关系
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendStatus {
    Friend,
    RequestSent,
    NotFriends,
}

impl FriendStatus {
    /// 已是好友优先于申请中
    pub fn of(profile: &UserProfile) -> Self {
        if profile.friend {
            FriendStatus::Friend
        } else if profile.friend_pending {
            FriendStatus::RequestSent
        } else {
            FriendStatus::NotFriends
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FriendStatus::Friend => "Friend",
            FriendStatus::RequestSent => "Friend Request Sent",
            FriendStatus::NotFriends => "Not Friends",
        }
    }
}
