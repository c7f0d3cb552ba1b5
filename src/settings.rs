//! User settings
//!
//! Stored as `settings.toml` in the data directory. A missing file means
//! defaults; a missing key means that key's default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bounds for the daily new-word limit
pub const MIN_DAILY_LIMIT: u32 = 1;
pub const MAX_DAILY_LIMIT: u32 = 50;

const SETTINGS_FILE: &str = "settings.toml";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Daily new-word limit must be between 1 and 50, got {0}")]
    LimitOutOfRange(u32),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Maximum box-1 entries per review session
    #[serde(default = "default_daily_new_word_limit")]
    pub daily_new_word_limit: u32,
    /// Ignore the limit and review every due box-1 entry
    #[serde(default)]
    pub unlimited_new_words: bool,
}

fn default_daily_new_word_limit() -> u32 {
    20
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_new_word_limit: default_daily_new_word_limit(),
            unlimited_new_words: false,
        }
    }
}

impl Settings {
    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("wordbox"))
            .ok_or(SettingsError::DataDirNotFound)
    }

    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(SETTINGS_FILE)
    }

    /// Load settings from `data_dir`, falling back to defaults
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, data_dir: &Path) -> Result<()> {
        self.validate()?;
        fs::create_dir_all(data_dir)?;
        fs::write(Self::path(data_dir), toml::to_string_pretty(self)?)?;
        log::info!("Saved settings to {:?}", Self::path(data_dir));
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_DAILY_LIMIT..=MAX_DAILY_LIMIT).contains(&self.daily_new_word_limit) {
            return Err(SettingsError::LimitOutOfRange(self.daily_new_word_limit));
        }
        Ok(())
    }

    /// Set a limit and turn limiting back on
    pub fn set_daily_limit(&mut self, limit: u32) -> Result<()> {
        if !(MIN_DAILY_LIMIT..=MAX_DAILY_LIMIT).contains(&limit) {
            return Err(SettingsError::LimitOutOfRange(limit));
        }
        self.daily_new_word_limit = limit;
        self.unlimited_new_words = false;
        Ok(())
    }

    /// Limit to pass to due-set selection, `None` when unlimited
    pub fn daily_limit(&self) -> Option<usize> {
        if self.unlimited_new_words {
            None
        } else {
            Some(self.daily_new_word_limit as usize)
        }
    }
}
