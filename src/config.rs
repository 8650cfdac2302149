use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::download::{with_extension, DEFAULT_FILE_NAME};
use crate::i18n::Locale;
use crate::ui::theme::ThemePreset;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

/// Appearance settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color theme preset
    #[serde(default)]
    pub theme: ThemePreset,
    /// UI language
    #[serde(default)]
    pub locale: Locale,
}

/// Save dialog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// File name suggested in the save dialog
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Open the save dialog in the folder used last time
    #[serde(default = "default_true")]
    pub remember_directory: bool,
    /// Folder of the last successful save
    #[serde(default)]
    pub last_directory: Option<PathBuf>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            remember_directory: true,
            last_directory: None,
        }
    }
}

impl DownloadConfig {
    /// Folder the save dialog should start in
    pub fn start_directory(&self) -> Option<&Path> {
        if self.remember_directory {
            self.last_directory.as_deref()
        } else {
            None
        }
    }

    /// Set the suggested file name, adding `.png` when missing.
    ///
    /// Empty names and names containing a path separator are rejected and
    /// leave the current name in place.
    pub fn set_file_name(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() || name.contains(['/', '\\']) {
            anyhow::bail!("Invalid file name: {:?}", name);
        }
        self.file_name = with_extension(Path::new(name), "png")
            .to_string_lossy()
            .to_string();
        Ok(())
    }

    /// Record the folder of a completed save. Returns true if it changed.
    pub fn remember(&mut self, saved_path: &Path) -> bool {
        if !self.remember_directory {
            return false;
        }
        let dir = saved_path.parent().map(Path::to_path_buf);
        if dir.is_none() || dir == self.last_directory {
            return false;
        }
        self.last_directory = dir;
        true
    }
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "qrtool", "QR Tool")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, falling back to defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}
