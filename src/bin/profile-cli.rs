//! 个人主页 CLI 客户端
//!
//! 非交互式 CLI：加载个人主页，可选上传头像，输出渲染后的页面

use anyhow::{Context, Result};
use clap::Parser;
use social_profile_client::profile::listener::ProfileListener;
use social_profile_client::{AvatarFile, ClientConfig, LoadStrategy, ProfileView};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// 个人主页 CLI 客户端
#[derive(Parser, Debug)]
#[command(name = "profile-cli")]
#[command(about = "个人主页 CLI 客户端 - 加载资料、好友、帖子并渲染页面", long_about = None)]
struct Args {
    /// API 基础地址
    #[arg(long, env = "PROFILE_API_BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,

    /// 会话 Cookie，例如 JSESSIONID=...
    #[arg(long, env = "PROFILE_SESSION_COOKIE")]
    cookie: Option<String>,

    /// 加载完成后上传的头像文件
    #[arg(short, long)]
    avatar: Option<PathBuf>,

    /// 同时发起三个加载请求
    #[arg(long)]
    concurrent: bool,

    /// 请求超时（秒）
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// 渲染结果输出文件，不指定时输出到 stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 日志级别（默认: info,social_profile_client=debug）
    #[arg(long, default_value = "info,social_profile_client=debug")]
    log_level: String,

    /// 日志文件（追加模式），不指定时只输出到 stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// 初始化日志（输出到 stderr，可选同时输出到文件）
fn init_logger(log_level: &str, log_file: Option<&PathBuf>) -> Result<()> {
    use std::fs::OpenOptions;
    use std::io;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // 优先使用环境变量 RUST_LOG（如果设置了），否则使用命令行参数
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // stdout 留给页面输出，日志写到 stderr
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(true);

    // 文件不需要颜色
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("无法创建日志文件 {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(false)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(path) = log_file {
        info!("[CLI] 📝 日志同时输出到文件: {}", path.display());
    }
    Ok(())
}

/// 输出所有页面事件
struct CliProfileListener;

#[async_trait::async_trait]
impl ProfileListener for CliProfileListener {
    async fn on_load_finished(&self, profile_loaded: bool) {
        if profile_loaded {
            info!("[CLI/Profile] ✅ 加载完成");
        } else {
            error!("[CLI/Profile] ❌ 个人资料加载失败");
        }
    }

    async fn on_profile_changed(&self, profile_json: String) {
        info!("[CLI/Profile] 👤 个人资料: {}", profile_json);
    }

    async fn on_upload_message(&self, message: String) {
        info!("[CLI/Profile] 🖼️ 上传提示: {}", message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(&args.log_level, args.log_file.as_ref())?;

    info!("[CLI] 🚀 个人主页 CLI 客户端");
    info!("[CLI] 🌐 API 地址: {}", args.base_url);

    let strategy = if args.concurrent {
        LoadStrategy::Concurrent
    } else {
        LoadStrategy::Sequential
    };
    let mut config = ClientConfig::new()
        .with_api_base_url(args.base_url.clone())
        .with_request_timeout(Duration::from_secs(args.timeout))
        .with_load_strategy(strategy);
    if let Some(cookie) = &args.cookie {
        config = config.with_session_cookie(cookie.clone());
    }

    let mut view = ProfileView::new(config)?;
    view.set_listener(Arc::new(CliProfileListener));
    view.mount().await;

    if let Some(path) = &args.avatar {
        let file = AvatarFile::from_path(path).await?;
        view.select_file(Some(file));
        view.upload_avatar().await;
        if let Some(message) = view.upload_message() {
            info!("[CLI] {}", message);
        }
    }

    if let Some(data) = view.phase().data() {
        match data.profile.image_bytes() {
            Ok(Some(bytes)) => info!("[CLI] 🖼️ 当前头像: {} 字节", bytes.len()),
            Ok(None) => info!("[CLI] 🖼️ 当前没有头像"),
            Err(e) => warn!("[CLI] ⚠️ 头像数据无法解码: {:?}", e),
        }
    }

    let html = view.render();
    match &args.output {
        Some(path) => {
            tokio::fs::write(path, &html)
                .await
                .with_context(|| format!("写入页面失败: {}", path.display()))?;
            info!("[CLI] 💾 页面已写入: {}", path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}
