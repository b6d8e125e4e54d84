use serde::{Deserialize, Serialize};

/// Lifetime counters for the triage tool. Persisted as JSON and shown in the
/// statistics view; `copied_count` counts commits that had at least one
/// checked target, `total_copy_operations` counts individual target copies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatistics {
    #[serde(default)]
    pub deleted_count: u64,
    #[serde(default)]
    pub deleted_bytes: u64,
    #[serde(default)]
    pub copied_count: u64,
    #[serde(default)]
    pub copied_bytes: u64,
    #[serde(default)]
    pub total_copy_operations: u64,
    #[serde(default)]
    pub startup_count: u64,
}

impl SessionStatistics {
    /// Zeroes every counter. All fields or none; there is no partial reset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
