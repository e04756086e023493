// SPDX-License-Identifier: GPL-3.0-only

//! Film grain overlay
//!
//! ```text
//! picture ─────────────────────────────┐
//!                                      ├─> screen blend ─> picture
//! grain texture ─> opacity(strength) ──┘
//! ```

use super::compositing::{fit_texture, opacity_adjust, screen_blend};
use super::picture::Picture;
use super::processing::ImageFilter;
use crate::constants::grain::clamp_strength;
use crate::errors::FilterError;
use image::RgbaImage;
use tracing::{debug, info};

/// Bundled grain textures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GrainName {
    #[default]
    Grain1,
}

impl GrainName {
    /// Asset path of the texture
    pub fn asset_path(&self) -> &'static str {
        match self {
            GrainName::Grain1 => "grain/grain1.png",
        }
    }
}

/// Screen-blends a fixed grain texture over the picture
#[derive(Debug, Clone)]
pub struct GrainImageFilter {
    texture: RgbaImage,
    strength: f32,
}

impl GrainImageFilter {
    /// Load the default grain texture.
    ///
    /// Fails with `MissingAsset` if the texture is not bundled; callers treat
    /// that as a startup error.
    pub fn new(strength: f32) -> Result<Self, FilterError> {
        Self::from_asset(GrainName::default().asset_path(), strength)
    }

    /// Load a grain texture by asset path
    pub fn from_asset(asset_path: &str, strength: f32) -> Result<Self, FilterError> {
        let texture = crate::assets::load_image(asset_path)?.to_rgba8();
        info!(
            asset = asset_path,
            width = texture.width(),
            height = texture.height(),
            "Grain texture loaded"
        );
        Ok(Self::with_texture(texture, strength))
    }

    /// Use an already decoded texture
    pub fn with_texture(texture: RgbaImage, strength: f32) -> Self {
        Self {
            texture,
            strength: clamp_strength(strength),
        }
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }
}

impl ImageFilter for GrainImageFilter {
    fn name(&self) -> &str {
        "grain"
    }

    fn process(&self, picture: &Picture) -> Result<Picture, FilterError> {
        let (width, height) = picture.pixels.dimensions();
        debug!(width, height, strength = self.strength, "Applying grain");

        let grain = fit_texture(&self.texture, width, height);
        let grain = opacity_adjust(&grain, self.strength);
        let blended = screen_blend(&picture.pixels, &grain)?;

        Ok(picture.with_pixels(blended))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::metadata::Orientation;
    use image::Rgba;

    fn gradient(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            Rgba([(x * 20) as u8, (y * 30) as u8, ((x + y) * 10) as u8, 255])
        })
    }

    #[test]
    fn test_default_texture_loads() {
        let filter = GrainImageFilter::new(0.7).unwrap();
        assert_eq!(filter.strength(), 0.7);
    }

    #[test]
    fn test_missing_texture_fails() {
        assert!(matches!(
            GrainImageFilter::from_asset("grain/grain9.png", 1.0),
            Err(FilterError::MissingAsset(_))
        ));
    }

    #[test]
    fn test_zero_strength_is_identity() {
        let filter = GrainImageFilter::new(0.0).unwrap();
        let picture = Picture::new(gradient(9, 7));
        assert_eq!(filter.process(&picture).unwrap(), picture);
    }

    #[test]
    fn test_grain_is_deterministic() {
        let filter = GrainImageFilter::new(0.8).unwrap();
        let picture = Picture::new(gradient(12, 5));
        let first = filter.process(&picture).unwrap();
        let second = filter.process(&picture).unwrap();
        assert_eq!(first, second);
        assert_ne!(first, picture);
    }

    #[test]
    fn test_orientation_is_preserved() {
        let filter = GrainImageFilter::new(1.0).unwrap();
        let picture = Picture::with_orientation(gradient(4, 4), Orientation::Rotate270);
        let out = filter.process(&picture).unwrap();
        assert_eq!(out.orientation, Orientation::Rotate270);
        assert_eq!(out.pixels.dimensions(), (4, 4));
    }

    #[test]
    fn test_strength_is_clamped() {
        let texture = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        assert_eq!(GrainImageFilter::with_texture(texture.clone(), 5.0).strength(), 1.0);
        assert_eq!(GrainImageFilter::with_texture(texture, -5.0).strength(), 0.0);
    }
}
