// Settings loading
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::report::DEFAULT_SEPARATOR_WIDTH;

pub const SETTINGS_FILE_NAME: &str = "tablerun.json";

/// Run settings; every field falls back to its default when absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Database file of the company tracker run
    pub company_db: PathBuf,
    /// Database file of the salon booking run
    pub salon_db: PathBuf,
    /// Width of the dashed line around each printed table
    pub separator_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            company_db: PathBuf::from("hw_database.db"),
            salon_db: PathBuf::from("salon.db"),
            separator_width: DEFAULT_SEPARATOR_WIDTH,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn get_settings_path(dir: &Path) -> PathBuf {
        dir.join(SETTINGS_FILE_NAME)
    }

    /// Load settings from `dir`, or return defaults if the file doesn't exist
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::get_settings_path(dir);

        if !path.exists() {
            tracing::debug!("no settings file found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| Error::SettingsIo {
            path: path.clone(),
            source,
        })?;

        let settings: Settings = serde_json::from_str(&content).map_err(|source| Error::SettingsParse {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }
}
