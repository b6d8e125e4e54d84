use crate::error::Result;
use crate::models::SessionStatistics;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const STATISTICS_FILE: &str = "statistics.json";

/// Keeps the lifetime counters, persists them as JSON next to the other
/// data files, and honors the statistic-tracking switch: with tracking off,
/// every `record_*` call is a no-op.
#[derive(Debug)]
pub struct StatisticsRecorder {
    totals: SessionStatistics,
    enabled: bool,
    file: PathBuf,
}

impl StatisticsRecorder {
    /// Loads previously persisted counters from `data_dir`, starting from
    /// zero when the file is missing or unreadable.
    #[must_use]
    pub fn load(data_dir: &Path, enabled: bool) -> Self {
        let file = data_dir.join(STATISTICS_FILE);
        let totals = fs::read_to_string(&file)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();

        Self { totals, enabled, file }
    }

    #[must_use]
    pub fn totals(&self) -> &SessionStatistics {
        &self.totals
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn record_startup(&mut self) {
        if self.enabled {
            self.totals.startup_count += 1;
        }
    }

    /// One commit that had at least one checked target.
    pub fn record_commit_with_targets(&mut self) {
        if self.enabled {
            self.totals.copied_count += 1;
        }
    }

    /// One successful copy into one target folder.
    pub fn record_copy(&mut self, bytes: u64) {
        if self.enabled {
            self.totals.total_copy_operations += 1;
            self.totals.copied_bytes += bytes;
        }
    }

    pub fn record_delete(&mut self, bytes: u64) {
        if self.enabled {
            self.totals.deleted_count += 1;
            self.totals.deleted_bytes += bytes;
        }
    }

    pub fn save(&self) -> Result<()> {
        fs::write(&self.file, serde_json::to_string_pretty(&self.totals)?)?;
        Ok(())
    }

    /// Zeroes every counter and persists the zeroed record.
    pub fn reset(&mut self) -> Result<()> {
        self.totals.reset();
        self.save()
    }

    pub fn export(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(&self.totals)?)?;
        info!("statistics exported to {}", path.display());
        Ok(())
    }

    /// Replaces all counters from an exported file. Parsing happens before
    /// anything is overwritten, so a bad file leaves the totals untouched.
    pub fn import(&mut self, path: &Path) -> Result<()> {
        let imported: SessionStatistics = serde_json::from_str(&fs::read_to_string(path)?)?;
        self.totals = imported;
        self.save()?;
        info!("statistics imported from {}", path.display());
        Ok(())
    }
}
