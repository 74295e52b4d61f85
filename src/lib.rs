pub mod profile;

// 重新导出常用类型，方便外部使用
pub use profile::{
    api::ProfileApi,
    backend::{AvatarFile, AvatarUploadOutcome, ProfileBackend},
    client::ClientConfig,
    state::{LoadStrategy, UploadStatus, ViewPhase},
    view::ProfileView,
};
