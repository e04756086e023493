// SPDX-License-Identifier: GPL-3.0-only

//! Film filters applied to developed photos
//!
//! Each catalog filter is a fixed colour preset applied per pixel:
//! - Fade (lifted blacks)
//! - Contrast around mid-grey
//! - Saturation
//! - Per-channel gain and tint
//!
//! Grain is applied afterwards by [`super::grain::GrainImageFilter`].

use super::grain::GrainImageFilter;
use super::picture::Picture;
use crate::app::FilterName;
use crate::errors::FilterError;
use tracing::{debug, info};

/// A transformation from one picture to another
pub trait ImageFilter: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    fn process(&self, picture: &Picture) -> Result<Picture, FilterError>;
}

/// Colour parameters of a film preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPreset {
    /// Contrast around 0.5 (1.0 = no change)
    pub contrast: f32,
    /// Saturation (0.0 = grayscale, 1.0 = no change)
    pub saturation: f32,
    /// Per-channel multiplier
    pub gain: [f32; 3],
    /// Per-channel offset added after the gain
    pub tint: [f32; 3],
    /// Raises the black point (0.0 = no change)
    pub fade: f32,
}

impl ColorPreset {
    pub const IDENTITY: ColorPreset = ColorPreset {
        contrast: 1.0,
        saturation: 1.0,
        gain: [1.0, 1.0, 1.0],
        tint: [0.0, 0.0, 0.0],
        fade: 0.0,
    };

    /// Preset for a catalog filter
    pub fn for_filter(name: FilterName) -> Self {
        match name {
            // Soft colour film: warm, low contrast, lifted shadows
            FilterName::KC01 => ColorPreset {
                contrast: 0.92,
                saturation: 0.9,
                gain: [1.04, 1.0, 0.95],
                tint: [0.01, 0.0, -0.01],
                fade: 0.06,
            },
            // Black and white film
            FilterName::KC02 => ColorPreset {
                contrast: 1.15,
                saturation: 0.0,
                gain: [1.0, 1.0, 1.0],
                tint: [0.0, 0.0, 0.0],
                fade: 0.03,
            },
            // Soft purple
            FilterName::KC03 => ColorPreset {
                contrast: 0.95,
                saturation: 0.95,
                gain: [1.0, 0.95, 1.0],
                tint: [0.04, 0.0, 0.07],
                fade: 0.04,
            },
        }
    }

    /// Apply to one RGB triple in `[0, 1]`
    pub fn apply_rgb(&self, rgb: [f32; 3]) -> [f32; 3] {
        let [mut r, mut g, mut b] = rgb;

        // Contrast
        r = (r - 0.5) * self.contrast + 0.5;
        g = (g - 0.5) * self.contrast + 0.5;
        b = (b - 0.5) * self.contrast + 0.5;

        // Saturation
        let gray = 0.299 * r + 0.587 * g + 0.114 * b;
        r = gray + (r - gray) * self.saturation;
        g = gray + (g - gray) * self.saturation;
        b = gray + (b - gray) * self.saturation;

        // Gain and tint
        r = r * self.gain[0] + self.tint[0];
        g = g * self.gain[1] + self.tint[1];
        b = b * self.gain[2] + self.tint[2];

        // Fade maps [0, 1] to [fade, 1]
        let fade = |v: f32| self.fade + v.clamp(0.0, 1.0) * (1.0 - self.fade);

        [fade(r), fade(g), fade(b)]
    }
}

/// One of the catalog film filters
#[derive(Debug, Clone, Copy)]
pub struct PresetFilter {
    name: FilterName,
    preset: ColorPreset,
}

impl PresetFilter {
    pub fn new(name: FilterName) -> Self {
        Self {
            name,
            preset: ColorPreset::for_filter(name),
        }
    }

    pub fn preset(&self) -> &ColorPreset {
        &self.preset
    }
}

impl ImageFilter for PresetFilter {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn process(&self, picture: &Picture) -> Result<Picture, FilterError> {
        let mut pixels = picture.pixels.clone();
        for pixel in pixels.pixels_mut() {
            let rgb = [
                pixel[0] as f32 / 255.0,
                pixel[1] as f32 / 255.0,
                pixel[2] as f32 / 255.0,
            ];
            let [r, g, b] = self.preset.apply_rgb(rgb);
            pixel[0] = (r.clamp(0.0, 1.0) * 255.0).round() as u8;
            pixel[1] = (g.clamp(0.0, 1.0) * 255.0).round() as u8;
            pixel[2] = (b.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        Ok(picture.with_pixels(pixels))
    }
}

/// Post-processing configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostProcessingConfig {
    /// Film filter to apply
    pub filter: FilterName,
    /// Grain strength, `None` to skip grain
    pub grain_strength: Option<f32>,
}

impl Default for PostProcessingConfig {
    fn default() -> Self {
        Self {
            filter: FilterName::default(),
            grain_strength: Some(crate::constants::grain::DEFAULT_STRENGTH),
        }
    }
}

/// Runs the filter chain for a photo: film preset, then grain
pub struct PostProcessor {
    filters: Vec<Box<dyn ImageFilter>>,
}

impl PostProcessor {
    /// Build the chain for `config`.
    ///
    /// Loading the grain texture happens here, so a missing asset surfaces
    /// before any photo is processed.
    pub fn new(config: PostProcessingConfig) -> Result<Self, FilterError> {
        let mut filters: Vec<Box<dyn ImageFilter>> = vec![Box::new(PresetFilter::new(config.filter))];

        if let Some(strength) = config.grain_strength {
            filters.push(Box::new(GrainImageFilter::new(strength)?));
        }

        Ok(Self { filters })
    }

    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Run every filter in order. Blocks until done.
    pub fn process(&self, picture: &Picture) -> Result<Picture, FilterError> {
        info!(
            width = picture.width(),
            height = picture.height(),
            filters = ?self.filter_names(),
            "Starting post-processing"
        );

        let mut current = picture.clone();
        for filter in &self.filters {
            current = filter.process(&current)?;
            debug!(filter = filter.name(), "Filter applied");
        }

        debug!("Post-processing complete");
        Ok(current)
    }
}
