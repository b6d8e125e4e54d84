use std::path::{Path, PathBuf};

/// A candidate destination folder. Plain data; a frontend binds to it by
/// path, never by wrapping it in a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationFolder {
    pub path: PathBuf,
    /// Last path component, used for display and filtering.
    pub name: String,
    /// Marked for inclusion in the next commit.
    pub checked: bool,
    pub ignored: bool,
    pub favorite: bool,
}

impl DestinationFolder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = folder_name(&path);
        Self {
            path,
            name,
            checked: false,
            ignored: false,
            favorite: false,
        }
    }
}

fn folder_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.to_string_lossy().into_owned(), |n| n.to_string_lossy().into_owned())
}
