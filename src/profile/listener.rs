//! 个人主页监听器回调接口

use async_trait::async_trait;

/// 页面状态变化回调，调用方据此重新渲染
#[async_trait]
pub trait ProfileListener: Send + Sync {
    /// 首次加载结束，`profile_loaded` 表示是否拿到了个人资料
    async fn on_load_finished(&self, profile_loaded: bool);

    /// 个人资料被替换（首次加载或上传头像后刷新），参数为 JSON 字符串
    async fn on_profile_changed(&self, profile_json: String);

    /// 上传提示文本变化
    async fn on_upload_message(&self, message: String);
}

/// 默认空实现（无操作）
pub struct EmptyProfileListener;

#[async_trait]
impl ProfileListener for EmptyProfileListener {
    async fn on_load_finished(&self, _profile_loaded: bool) {}

    async fn on_profile_changed(&self, _profile_json: String) {}

    async fn on_upload_message(&self, _message: String) {}
}
