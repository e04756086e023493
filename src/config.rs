// SPDX-License-Identifier: GPL-3.0-only

//! User configuration
//!
//! Stored as JSON under the platform config directory. A missing file gives
//! the defaults; an unreadable one is logged and replaced by the defaults.

use crate::app::{FilterListDelegate, FilterName};
use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, CONFIG_VERSION, QualityPreset, grain};
use crate::errors::{AppError, AppResult};
use crate::pipelines::photo::{EncodingFormat, PostProcessingConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout version of this file
    pub version: u32,
    /// Film filter applied to new photos
    pub selected_filter: FilterName,
    /// Grain overlay strength (0.0 - 1.0)
    pub grain_strength: f32,
    /// Whether grain is applied at all
    pub grain_enabled: bool,
    /// Output format of developed photos
    pub photo_output_format: EncodingFormat,
    /// JPEG quality of developed photos
    pub photo_quality: QualityPreset,
    /// Lab directory; `None` uses `<Documents>/Kontax Cam`
    pub lab_directory: Option<PathBuf>,
    /// Album directory; `None` uses `<Pictures>/Kontax Cam`
    pub album_directory: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            selected_filter: FilterName::default(),
            grain_strength: grain::DEFAULT_STRENGTH,
            grain_enabled: true,
            photo_output_format: EncodingFormat::default(),
            photo_quality: QualityPreset::default(),
            lab_directory: None,
            album_directory: None,
        }
    }
}

impl Config {
    /// `<config dir>/kontax-cam/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, falling back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                debug!(path = %path.display(), "No config file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable config");
                Self::default()
            }
        }
    }

    /// Load from `path`; `Ok(None)` when the file does not exist
    pub fn load(path: &Path) -> AppResult<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut config: Config = serde_json::from_str(&contents)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

        if config.version != CONFIG_VERSION {
            warn!(
                found = config.version,
                expected = CONFIG_VERSION,
                "Config written by another version, upgrading"
            );
            config.version = CONFIG_VERSION;
        }
        config.grain_strength = grain::clamp_strength(config.grain_strength);

        Ok(Some(config))
    }

    /// Write to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    pub fn set_grain_strength(&mut self, strength: f32) {
        self.grain_strength = grain::clamp_strength(strength);
    }

    /// Processing settings for new photos
    pub fn post_processing(&self) -> PostProcessingConfig {
        PostProcessingConfig {
            filter: self.selected_filter,
            grain_strength: self.grain_enabled.then_some(self.grain_strength),
        }
    }

    pub fn lab_dir(&self) -> PathBuf {
        self.lab_directory
            .clone()
            .unwrap_or_else(crate::storage::default_lab_dir)
    }

    pub fn album_dir(&self) -> PathBuf {
        self.album_directory
            .clone()
            .unwrap_or_else(crate::storage::default_album_dir)
    }
}

/// The filter list writes its choice straight into the config
impl FilterListDelegate for Config {
    fn did_select_filter(&mut self, filter_name: FilterName) {
        info!(filter = %filter_name, "Selected filter stored");
        self.selected_filter = filter_name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_processing_respects_grain_toggle() {
        let mut config = Config::default();
        assert_eq!(config.post_processing().grain_strength, Some(1.0));

        config.grain_enabled = false;
        assert_eq!(config.post_processing().grain_strength, None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{ "selected_filter": "KC03" }"#).unwrap();
        assert_eq!(config.selected_filter, FilterName::KC03);
        assert_eq!(config.grain_strength, grain::DEFAULT_STRENGTH);
        assert!(config.grain_enabled);
    }
}
