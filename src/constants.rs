// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};

/// Application name, used for folder names and user-facing messages
pub const APP_NAME: &str = "Kontax Cam";

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "kontax-cam";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Bumped whenever the config layout changes incompatibly
pub const CONFIG_VERSION: u32 = 1;

/// Extensions the Lab picks up (compared case-insensitively)
pub const PHOTO_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Lab grid layout
pub mod grid {
    /// Photos per row
    pub const COLUMNS: usize = 3;
    /// Inset applied to every side of a cell
    pub const CELL_MARGIN: f32 = 5.0;
    /// Row height as a fraction of the grid width
    pub const ROW_HEIGHT_FRACTION: f32 = 0.425;
    /// Height of the section header above the first row
    pub const HEADER_HEIGHT: f32 = 40.0;
}

/// Grain compositing
pub mod grain {
    /// Strength used when the user never changed it
    pub const DEFAULT_STRENGTH: f32 = 1.0;
    pub const MIN_STRENGTH: f32 = 0.0;
    pub const MAX_STRENGTH: f32 = 1.0;

    /// Clamp a user-provided strength into the valid range.
    ///
    /// NaN falls back to the default.
    pub fn clamp_strength(strength: f32) -> f32 {
        if strength.is_nan() {
            DEFAULT_STRENGTH
        } else {
            strength.clamp(MIN_STRENGTH, MAX_STRENGTH)
        }
    }
}

/// JPEG quality presets for developed photos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QualityPreset {
    /// Smaller files, visible artifacts
    Low,
    /// Balanced
    Medium,
    /// Default for developed photos
    #[default]
    High,
    /// Minimal compression
    Maximum,
}

impl QualityPreset {
    /// All presets, ordered from lowest to highest quality
    pub const ALL: [QualityPreset; 4] = [
        QualityPreset::Low,
        QualityPreset::Medium,
        QualityPreset::High,
        QualityPreset::Maximum,
    ];

    /// Display name for the preset
    pub fn display_name(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
            QualityPreset::Maximum => "Maximum",
        }
    }

    /// JPEG quality value (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            QualityPreset::Low => 60,
            QualityPreset::Medium => 80,
            QualityPreset::High => 92,
            QualityPreset::Maximum => 98,
        }
    }
}
