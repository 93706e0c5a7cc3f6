use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported seed file format: {0}")]
    UnsupportedSeedFormat(PathBuf),
    #[error("duplicate conversation id `{0}`")]
    DuplicateConversation(String),
    #[error("duplicate message id `{0}`")]
    DuplicateMessage(String),
    #[error("avatar url {0} is not http(s)")]
    AvatarScheme(url::Url),
    #[error("avatar request failed: {0}")]
    AvatarHttp(#[from] reqwest::Error),
    #[error("avatar request returned HTTP {0}")]
    AvatarStatus(u16),
    #[error("avatar larger than {limit} bytes")]
    AvatarTooLarge { limit: u64 },
}

/// Why a send left the store untouched. The composer swallows these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("nothing to send")]
    EmptyText,
    #[error("no conversation `{0}`")]
    UnknownConversation(String),
}

pub type Result<T, E = ChatError> = std::result::Result<T, E>;
