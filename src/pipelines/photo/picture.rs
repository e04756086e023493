// SPDX-License-Identifier: GPL-3.0-only

//! Decoded photos with their orientation
//!
//! Filters work on the stored pixel layout. The EXIF orientation read at
//! decode time rides along untouched and is only applied when the picture is
//! encoded or shown, so output keeps the orientation of its source.

use crate::errors::FilterError;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// A decoded photo plus its source orientation
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub pixels: RgbaImage,
    pub orientation: Orientation,
}

impl Picture {
    /// Wrap pixels that are already upright
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            orientation: Orientation::NoTransforms,
        }
    }

    pub fn with_orientation(pixels: RgbaImage, orientation: Orientation) -> Self {
        Self {
            pixels,
            orientation,
        }
    }

    /// Decode a file, keeping its EXIF orientation
    pub fn open(path: &Path) -> Result<Self, FilterError> {
        let bytes = std::fs::read(path)
            .map_err(|e| FilterError::DecodeFailed(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(&bytes)
    }

    /// Decode in-memory image data, keeping its EXIF orientation
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FilterError> {
        let mut decoder = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| FilterError::DecodeFailed(e.to_string()))?
            .into_decoder()?;

        // Missing or malformed EXIF is not fatal
        let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
        let image = DynamicImage::from_decoder(decoder)?;

        debug!(
            width = image.width(),
            height = image.height(),
            ?orientation,
            "Decoded picture"
        );

        Ok(Self::with_orientation(image.to_rgba8(), orientation))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Same orientation, new pixels
    pub fn with_pixels(&self, pixels: RgbaImage) -> Self {
        Self::with_orientation(pixels, self.orientation)
    }

    /// Pixels as they should be displayed
    pub fn upright(&self) -> DynamicImage {
        let mut image = DynamicImage::ImageRgba8(self.pixels.clone());
        image.apply_orientation(self.orientation);
        image
    }
}
