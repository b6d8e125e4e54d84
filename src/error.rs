use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SiftError>;

#[derive(Debug, Error)]
pub enum SiftError {
    #[error("already at the first image")]
    OutOfRange,

    #[error("the image queue is exhausted")]
    EmptyQueue,

    #[error("this folder has already been added: {}", .0.display())]
    DuplicateFolder(PathBuf),

    #[error("path is not in the current list: {}", .0.display())]
    UnknownPath(PathBuf),

    #[error("a reverse image search is already running")]
    SearchInFlight,

    #[error("upload response did not contain a URL")]
    MissingUploadUrl,

    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("recycle bin operation failed: {0}")]
    Recycle(#[from] trash::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}
