use crate::error::{Result, SiftError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Key names for the four logical actions a frontend can bind. Stored as
/// plain strings so the core stays independent of any input framework;
/// comparison is case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotkeys {
    #[serde(default = "default_previous_key")]
    pub previous: String,
    #[serde(default = "default_execute_key")]
    pub execute: String,
    #[serde(default = "default_next_key")]
    pub next: String,
    #[serde(default = "default_clear_checked_key")]
    pub clear_checked: String,
}

fn default_previous_key() -> String {
    "Left".to_string()
}
fn default_execute_key() -> String {
    "Return".to_string()
}
fn default_next_key() -> String {
    "Right".to_string()
}
fn default_clear_checked_key() -> String {
    "Escape".to_string()
}

impl Default for Hotkeys {
    fn default() -> Self {
        Self {
            previous: default_previous_key(),
            execute: default_execute_key(),
            next: default_next_key(),
            clear_checked: default_clear_checked_key(),
        }
    }
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Last selected source folder, restored on startup.
    pub image_folder: Option<PathBuf>,
    /// Last selected destination root, restored on startup.
    pub destination_root: Option<PathBuf>,
    #[serde(default)]
    pub include_image_subdirectories: bool,
    #[serde(default = "default_include_folder_subdirectories")]
    pub include_folder_subdirectories: bool,
    /// Extensions the image queue accepts, lowercased with leading dot.
    #[serde(default = "default_enabled_extensions")]
    pub enabled_extensions: Vec<String>,
    /// Extensions handed to the embedded player instead of the image view.
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,
    #[serde(default = "default_delete_after_copy")]
    pub delete_after_copy: bool,
    #[serde(default = "default_reset_checked")]
    pub reset_checked: bool,
    #[serde(default)]
    pub send_to_recycle_bin: bool,
    #[serde(default)]
    pub overwrite_existing: bool,
    #[serde(default = "default_track_statistics")]
    pub track_statistics: bool,
    #[serde(default)]
    pub enable_logging: bool,
    #[serde(default = "default_search_upload_url")]
    pub search_upload_url: String,
    #[serde(default)]
    pub hotkeys: Hotkeys,
}

// Default value functions for serde
fn default_include_folder_subdirectories() -> bool {
    true
}
fn default_enabled_extensions() -> Vec<String> {
    [".png", ".jpg", ".jpeg", ".gif", ".bmp", ".webp"]
        .iter()
        .map(ToString::to_string)
        .collect()
}
fn default_video_extensions() -> Vec<String> {
    [".webm", ".mp4", ".avi", ".mov"].iter().map(ToString::to_string).collect()
}
fn default_delete_after_copy() -> bool {
    true
}
fn default_reset_checked() -> bool {
    true
}
fn default_track_statistics() -> bool {
    true
}
fn default_search_upload_url() -> String {
    "https://imagebin.ca/upload.php".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            image_folder: None,
            destination_root: None,
            include_image_subdirectories: false,
            include_folder_subdirectories: default_include_folder_subdirectories(),
            enabled_extensions: default_enabled_extensions(),
            video_extensions: default_video_extensions(),
            delete_after_copy: default_delete_after_copy(),
            reset_checked: default_reset_checked(),
            send_to_recycle_bin: false,
            overwrite_existing: false,
            track_statistics: default_track_statistics(),
            enable_logging: false,
            search_upload_url: default_search_upload_url(),
            hotkeys: Hotkeys::default(),
        }
    }
}

impl Settings {
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = tokio::fs::read_to_string(&config_path).await?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, toml_string)?;

        info!("Settings saved to {:?}", config_path);
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(SiftError::NoConfigDir)?;
        Ok(config_dir.join("snapsift").join("config.toml"))
    }

    /// Semicolon-joined form used by the settings dialog.
    #[must_use]
    pub fn extensions_display(&self) -> String {
        self.enabled_extensions.join(";")
    }

    /// Replaces the enabled extensions from a semicolon-joined list,
    /// normalizing to lowercase and ignoring empty segments.
    pub fn set_extensions_from_list(&mut self, list: &str) {
        self.enabled_extensions = list
            .split(';')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
    }

    #[must_use]
    pub fn is_video_extension(&self, extension: &str) -> bool {
        self.video_extensions.iter().any(|e| e.eq_ignore_ascii_case(extension))
    }
}
