//! 页面渲染
//!
//! 用 dioxus `rsx!` 描述页面，再由 dioxus-ssr 输出 HTML 字符串。
//! 导航栏和单个帖子由外部组件负责，这里只定义接口并提供默认实现。

use crate::profile::models::Post;
use crate::profile::state::{ProfileData, UploadStatus, ViewPhase};
use dioxus::prelude::*;

#[cfg(test)]
pub(crate) const LOADER_HTML: &str = r#"<div class="loader"></div>"#;
#[cfg(test)]
pub(crate) const LOAD_FAILED_HTML: &str = "<div>Unable to load user data.</div>";

/// 导航栏组件
pub trait NavbarRenderer: Send + Sync {
    fn render(&self) -> Element;
}

/// 单个帖子组件，字段原样传入
pub trait PostRenderer: Send + Sync {
    fn render(&self, post: &Post) -> Element;
}

/// 默认导航栏
pub struct DefaultNavbar;

impl NavbarRenderer for DefaultNavbar {
    fn render(&self) -> Element {
        rsx! {
            nav { class: "navbar",
                a { href: "/", "Home" }
                " "
                a { href: "/profile", "Profile" }
            }
        }
    }
}

/// 默认帖子组件
pub struct DefaultPostView;

impl PostRenderer for DefaultPostView {
    fn render(&self, post: &Post) -> Element {
        let id = post.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        let likes_class = if post.liked { "likes liked" } else { "likes" };
        let comment_count = post.comments.len();

        rsx! {
            div { class: "post", "data-id": "{id}",
                if let Some(author) = post.author_name() {
                    span { class: "post-author", "{author}" }
                }
                if let Some(created_at) = post.created_at_display() {
                    span { class: "post-date", "{created_at}" }
                }
                p { "{post.content}" }
                if let Some(image) = &post.image {
                    img {
                        src: "data:image/jpeg;base64,{image}",
                        alt: "Post Image",
                        class: "post-image",
                    }
                }
                div { class: "post-meta",
                    span { class: likes_class, "{post.likes_count} likes" }
                    " "
                    span { class: "comments", "{comment_count} comments" }
                }
            }
        }
    }
}

/// 渲染整页
pub fn render_page(
    phase: &ViewPhase,
    upload: &UploadStatus,
    navbar: &dyn NavbarRenderer,
    post_renderer: &dyn PostRenderer,
) -> String {
    let element = match phase {
        ViewPhase::Loading => rsx! {
            div { class: "loader" }
        },
        ViewPhase::LoadFailed => rsx! {
            div { "Unable to load user data." }
        },
        ViewPhase::Ready(data) => ready_page(data, upload, navbar, post_renderer),
    };
    dioxus_ssr::render_element(element)
}

fn ready_page(
    data: &ProfileData,
    upload: &UploadStatus,
    navbar: &dyn NavbarRenderer,
    post_renderer: &dyn PostRenderer,
) -> Element {
    let profile = &data.profile;
    let friend_status = data.friend_status().label();
    let upload_message = upload.message();

    rsx! {
        div { class: "profile_main-container",
            {navbar.render()}
            div { class: "profile-container",
                div { class: "profile-header",
                    h1 { "{profile.username}" }
                    p { "{profile.email}" }
                    if let Some(image) = &profile.image {
                        img {
                            src: "data:image/jpeg;base64,{image}",
                            alt: "User Avatar",
                            class: "profile-image",
                        }
                    } else {
                        div { class: "default-avatar", "No Image" }
                    }
                    div { class: "profile-avatar-upload",
                        label { r#for: "file-upload", "Choose Avatar" }
                        input { id: "file-upload", r#type: "file", accept: "image/*" }
                        button { "Submit" }
                        if let Some(message) = upload_message {
                            p { "{message}" }
                        }
                    }
                }
                div { class: "friend-status",
                    h3 { "Friend Status" }
                    p { "{friend_status}" }
                }
                div { class: "friends-list",
                    h3 { "Your Friends" }
                    if data.friends.is_empty() {
                        p { "No friends yet" }
                    } else {
                        ul {
                            for friend in &data.friends {
                                li {
                                    span { "{friend.username}" }
                                    " - "
                                    span { "{friend.email}" }
                                }
                            }
                        }
                    }
                }
            }
            div { class: "posts-list",
                h3 { "Your Posts" }
                if data.posts.is_empty() {
                    p { "No posts yet" }
                } else {
                    for post in &data.posts {
                        {post_renderer.render(post)}
                    }
                }
            }
        }
    }
}
