use crate::error::Result;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const IGNORED_PATHS_FILE: &str = "IgnoredPaths.txt";
pub const FAVORITE_PATHS_FILE: &str = "FavoritePaths.txt";

/// Flat-file list of folder paths, one CRLF-terminated line per path.
///
/// Backs the ignore and favorite lists. `add` appends blindly; callers are
/// expected to check membership first, the file format has no notion of a
/// duplicate. `remove` has to rewrite the whole file since there is no
/// delete marker either. Single-process use assumed.
#[derive(Debug)]
pub struct PathFilterStore {
    file: PathBuf,
    paths: HashSet<String>,
}

impl PathFilterStore {
    /// Reads the backing file, creating it empty when absent. An unreadable
    /// file is treated as "no entries", not as an error.
    pub fn load(file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        let mut paths = HashSet::new();

        if file.exists() {
            match fs::read_to_string(&file) {
                Ok(content) => {
                    paths = content
                        .lines()
                        .filter(|line| !line.is_empty())
                        .map(ToString::to_string)
                        .collect();
                }
                Err(e) => warn!("could not read {}: {e}; treating as empty", file.display()),
            }
        } else if let Err(e) = fs::write(&file, "") {
            warn!("could not create {}: {e}", file.display());
        }

        Self { file, paths }
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(&path_key(path))
    }

    /// Appends one line. Not idempotent on disk by itself; the in-memory set
    /// keeps membership honest for `contains`.
    pub fn add(&mut self, path: &Path) -> Result<()> {
        let key = path_key(path);
        let mut file = fs::OpenOptions::new().create(true).append(true).open(&self.file)?;
        write!(file, "{key}\r\n")?;
        self.paths.insert(key);
        Ok(())
    }

    /// Drops the path and rewrites the whole file.
    pub fn remove(&mut self, path: &Path) -> Result<()> {
        self.paths.remove(&path_key(path));

        let mut content = String::new();
        for line in &self.paths {
            content.push_str(line);
            content.push_str("\r\n");
        }
        fs::write(&self.file, content)?;
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn path_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
