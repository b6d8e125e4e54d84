use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One source image as listed when the image folder was scanned.
/// Immutable once created; the queue drops it on commit-with-delete or when
/// it turns out to be undisplayable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    /// Lowercased, with the leading dot (".png"). Empty when the file has
    /// no extension.
    pub extension: String,
}

impl ImageEntry {
    /// Builds an entry from a path, reading the size from the filesystem.
    /// A file that cannot be stat'ed gets size 0; it will be dropped later
    /// by the display probe anyway.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        Self {
            path: path.to_path_buf(),
            name,
            size,
            extension,
        }
    }
}
