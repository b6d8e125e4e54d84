use crate::core::path_filter::PathFilterStore;
use crate::error::{Result, SiftError};
use crate::models::DestinationFolder;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// The candidate destination folders, with checked/ignored/favorite state.
///
/// Paths are unique within the set. The ignore and favorite flags are backed
/// by [`PathFilterStore`] text files and survive rescans; checked state does
/// not, it belongs to the running session.
#[derive(Debug)]
pub struct DestinationSet {
    folders: Vec<DestinationFolder>,
    filter: String,
    ignored: PathFilterStore,
    favorites: PathFilterStore,
}

impl DestinationSet {
    #[must_use]
    pub fn new(ignored: PathFilterStore, favorites: PathFilterStore) -> Self {
        Self {
            folders: Vec::new(),
            filter: String::new(),
            ignored,
            favorites,
        }
    }

    /// Replaces the set with the subdirectories of `root`, one level deep or
    /// the full tree. Name-sorted so the order is stable for a given
    /// filesystem state.
    pub fn scan(&mut self, root: &Path, recursive: bool) -> Result<usize> {
        self.folders.clear();

        let directories: Vec<PathBuf> = if recursive {
            WalkDir::new(root)
                .min_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_map(std::result::Result::ok)
                .filter(|e| e.file_type().is_dir())
                .map(|e| e.path().to_path_buf())
                .collect()
        } else {
            let mut dirs: Vec<PathBuf> = std::fs::read_dir(root)?
                .filter_map(std::result::Result::ok)
                .filter(|e| e.file_type().ok().is_some_and(|ft| ft.is_dir()))
                .map(|e| e.path())
                .collect();
            dirs.sort();
            dirs
        };

        for dir in directories {
            self.insert(dir);
        }

        info!("destination scan of {} found {} folders", root.display(), self.folders.len());
        Ok(self.folders.len())
    }

    fn insert(&mut self, path: PathBuf) {
        if self.folders.iter().any(|f| f.path == path) {
            return;
        }
        let mut folder = DestinationFolder::new(path);
        folder.ignored = self.ignored.contains(&folder.path);
        folder.favorite = self.favorites.contains(&folder.path);
        self.folders.push(folder);
    }

    /// Adds a single folder chosen by the user.
    pub fn add(&mut self, path: &Path) -> Result<()> {
        if self.folders.iter().any(|f| f.path == path) {
            return Err(SiftError::DuplicateFolder(path.to_path_buf()));
        }
        self.insert(path.to_path_buf());
        Ok(())
    }

    /// Drops the folder from the in-memory set. Persisted ignore/favorite
    /// membership is left alone.
    pub fn remove(&mut self, path: &Path) {
        self.folders.retain(|f| f.path != path);
    }

    /// Flips the ignored flag and mirrors the change into the ignore file.
    /// Returns the new flag value.
    pub fn toggle_ignored(&mut self, path: &Path) -> Result<bool> {
        let Some(folder) = self.folders.iter_mut().find(|f| f.path == path) else {
            return Err(SiftError::UnknownPath(path.to_path_buf()));
        };

        if folder.ignored {
            self.ignored.remove(path)?;
            folder.ignored = false;
        } else {
            if !self.ignored.contains(path) {
                self.ignored.add(path)?;
            }
            folder.ignored = true;
        }
        Ok(folder.ignored)
    }

    /// Same contract as [`toggle_ignored`], against the favorites file.
    ///
    /// [`toggle_ignored`]: DestinationSet::toggle_ignored
    pub fn toggle_favorite(&mut self, path: &Path) -> Result<bool> {
        let Some(folder) = self.folders.iter_mut().find(|f| f.path == path) else {
            return Err(SiftError::UnknownPath(path.to_path_buf()));
        };

        if folder.favorite {
            self.favorites.remove(path)?;
            folder.favorite = false;
        } else {
            if !self.favorites.contains(path) {
                self.favorites.add(path)?;
            }
            folder.favorite = true;
        }
        Ok(folder.favorite)
    }

    pub fn set_checked(&mut self, path: &Path, checked: bool) -> Result<()> {
        let Some(folder) = self.folders.iter_mut().find(|f| f.path == path) else {
            return Err(SiftError::UnknownPath(path.to_path_buf()));
        };
        folder.checked = checked;
        Ok(())
    }

    pub fn clear_checked(&mut self) {
        for folder in &mut self.folders {
            folder.checked = false;
        }
    }

    /// Folders marked for the next commit, in set order. Recomputed on each
    /// call, never cached.
    pub fn checked_folders(&self) -> impl Iterator<Item = &DestinationFolder> {
        self.folders.iter().filter(|f| f.checked)
    }

    #[must_use]
    pub fn checked_count(&self) -> usize {
        self.checked_folders().count()
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Display view: case-insensitive substring match on the display name,
    /// with ignored folders hidden unless asked for.
    #[must_use]
    pub fn filtered(&self, show_ignored: bool) -> Vec<&DestinationFolder> {
        let needle = self.filter.to_lowercase();
        self.folders
            .iter()
            .filter(|f| show_ignored || !f.ignored)
            .filter(|f| needle.is_empty() || f.name.to_lowercase().contains(&needle))
            .collect()
    }

    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&DestinationFolder> {
        self.folders.iter().find(|f| f.path == path)
    }

    #[must_use]
    pub fn folders(&self) -> &[DestinationFolder] {
        &self.folders
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.folders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}
