use crate::error::{Result, SiftError};
use crate::models::ImageEntry;
use std::path::{Path, PathBuf};

/// Ordered list of source images with a cursor.
///
/// The cursor may sit one past the last entry; that position is the
/// "exhausted" state, not an error. The display filter never moves the
/// cursor or reorders entries; it only narrows what [`filtered`] exposes,
/// and a pick from that view resolves back through the unfiltered list.
///
/// [`filtered`]: ImageQueue::filtered
#[derive(Debug, Default)]
pub struct ImageQueue {
    entries: Vec<ImageEntry>,
    cursor: usize,
    filter: String,
}

impl ImageQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the queue with the extension-filtered subset of `paths`,
    /// keeping their order, and rewinds the cursor. Extension matching is a
    /// case-insensitive suffix test against the file name.
    pub fn load(&mut self, paths: impl IntoIterator<Item = PathBuf>, extensions: &[String]) {
        self.entries = paths
            .into_iter()
            .filter(|p| has_enabled_extension(p, extensions))
            .map(|p| ImageEntry::from_path(&p))
            .collect();
        self.cursor = 0;
    }

    /// Entry under the cursor; `None` once the queue is exhausted.
    #[must_use]
    pub fn current(&self) -> Option<&ImageEntry> {
        self.entries.get(self.cursor)
    }

    /// Moves one forward, saturating at the exhausted position.
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1).min(self.entries.len());
    }

    pub fn retreat(&mut self) -> Result<()> {
        if self.cursor == 0 {
            return Err(SiftError::OutOfRange);
        }
        self.cursor -= 1;
        Ok(())
    }

    /// Removes the entry under the cursor. The cursor stays put, so the next
    /// entry slides into the current position.
    pub fn remove_current(&mut self) -> Result<ImageEntry> {
        if self.cursor >= self.entries.len() {
            return Err(SiftError::EmptyQueue);
        }
        Ok(self.entries.remove(self.cursor))
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.cursor != 0
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.entries.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Display view: the subsequence whose file names contain the filter
    /// text, case-insensitively. Recomputed on every call.
    #[must_use]
    pub fn filtered(&self) -> Vec<&ImageEntry> {
        if self.filter.is_empty() {
            return self.entries.iter().collect();
        }
        let needle = self.filter.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Moves the cursor to the entry with this path, resolved against the
    /// unfiltered list. This is how a selection made in a filtered view
    /// lands on the right image.
    pub fn select(&mut self, path: &Path) -> Result<()> {
        match self.entries.iter().position(|e| e.path == path) {
            Some(index) => {
                self.cursor = index;
                Ok(())
            }
            None => Err(SiftError::UnknownPath(path.to_path_buf())),
        }
    }
}

fn has_enabled_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.to_lowercase();
    extensions.iter().any(|ext| name.ends_with(&ext.to_lowercase()))
}
