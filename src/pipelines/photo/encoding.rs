// SPDX-License-Identifier: GPL-3.0-only

//! Async photo encoding
//!
//! This module handles encoding developed pictures:
//! - JPEG (with quality control)
//! - PNG (lossless)
//!
//! The picture's orientation is applied to the pixels before encoding, so
//! the written file displays the same way as its source.

use super::picture::Picture;
use crate::constants::QualityPreset;
use crate::errors::{FilterError, StorageError};
use crate::storage::PhotoStore;
use image::{DynamicImage, ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Supported encoding formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncodingFormat {
    /// JPEG format (lossy compression)
    #[default]
    Jpeg,
    /// PNG format (lossless compression)
    Png,
}

impl EncodingFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            EncodingFormat::Jpeg => "jpg",
            EncodingFormat::Png => "png",
        }
    }
}

/// Encoded image data ready for saving
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub format: EncodingFormat,
    pub width: u32,
    pub height: u32,
}

/// Photo encoder
#[derive(Debug, Clone, Copy)]
pub struct PhotoEncoder {
    format: EncodingFormat,
    quality: QualityPreset,
}

impl PhotoEncoder {
    /// Create a new encoder with JPEG format and high quality
    pub fn new() -> Self {
        Self {
            format: EncodingFormat::Jpeg,
            quality: QualityPreset::High,
        }
    }

    pub fn set_format(&mut self, format: EncodingFormat) {
        self.format = format;
    }

    /// Only affects JPEG
    pub fn set_quality(&mut self, quality: QualityPreset) {
        self.quality = quality;
    }

    pub fn format(&self) -> EncodingFormat {
        self.format
    }

    /// Encode on the blocking pool
    pub async fn encode(&self, picture: Picture) -> Result<EncodedImage, FilterError> {
        let encoder = *self;
        tokio::task::spawn_blocking(move || encoder.encode_blocking(&picture))
            .await
            .map_err(|e| FilterError::TaskFailed(format!("Encoding task error: {}", e)))?
    }

    /// Encode on the current thread
    pub fn encode_blocking(&self, picture: &Picture) -> Result<EncodedImage, FilterError> {
        let upright = picture.upright();
        info!(
            width = upright.width(),
            height = upright.height(),
            format = ?self.format,
            "Starting encoding"
        );

        let (width, height) = (upright.width(), upright.height());
        let data = match self.format {
            EncodingFormat::Jpeg => Self::encode_jpeg(upright.to_rgb8(), self.quality)?,
            EncodingFormat::Png => Self::encode_png(upright)?,
        };

        debug!(size = data.len(), "Encoding complete");

        Ok(EncodedImage {
            data,
            format: self.format,
            width,
            height,
        })
    }

    /// Save encoded image into the store under a timestamped name
    pub async fn save(
        &self,
        encoded: EncodedImage,
        store: Arc<dyn PhotoStore>,
    ) -> Result<PathBuf, StorageError> {
        let filename = photo_file_name(encoded.format);
        info!(filename = %filename, "Saving photo");

        tokio::task::spawn_blocking(move || store.write(&filename, &encoded.data))
            .await
            .map_err(|e| StorageError::Io(format!("Save task error: {}", e)))?
    }

    /// Encode image as JPEG
    fn encode_jpeg(image: RgbImage, quality: QualityPreset) -> Result<Vec<u8>, FilterError> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);

        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality.jpeg_quality());

        encoder
            .encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| FilterError::EncodeFailed(format!("JPEG encoding failed: {}", e)))?;

        Ok(buffer)
    }

    /// Encode image as PNG, keeping alpha
    fn encode_png(image: DynamicImage) -> Result<Vec<u8>, FilterError> {
        let mut buffer = Vec::new();

        image
            .write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| FilterError::EncodeFailed(format!("PNG encoding failed: {}", e)))?;

        Ok(buffer)
    }
}

impl Default for PhotoEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// `IMG_<timestamp>_<8 hex>.<ext>`; the suffix keeps same-second captures apart
pub fn photo_file_name(format: EncodingFormat) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("IMG_{}_{}.{}", timestamp, &suffix[..8], format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::metadata::Orientation;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_format_extensions() {
        assert_eq!(EncodingFormat::Jpeg.extension(), "jpg");
        assert_eq!(EncodingFormat::Png.extension(), "png");
    }

    #[test]
    fn test_png_bakes_orientation() {
        let picture = Picture::with_orientation(
            RgbaImage::from_pixel(4, 2, Rgba([1, 2, 3, 255])),
            Orientation::Rotate90,
        );
        let mut encoder = PhotoEncoder::new();
        encoder.set_format(EncodingFormat::Png);

        let encoded = encoder.encode_blocking(&picture).unwrap();
        assert_eq!((encoded.width, encoded.height), (2, 4));

        let decoded = Picture::from_bytes(&encoded.data).unwrap();
        assert_eq!(decoded.pixels.dimensions(), (2, 4));
        assert_eq!(decoded.pixels.get_pixel(0, 0), &Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_jpeg_output_decodes() {
        let picture = Picture::new(RgbaImage::from_pixel(8, 8, Rgba([200, 100, 50, 255])));
        let encoded = PhotoEncoder::new().encode_blocking(&picture).unwrap();
        assert_eq!(encoded.format, EncodingFormat::Jpeg);
        assert_eq!(&encoded.data[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_photo_file_name() {
        let name = photo_file_name(EncodingFormat::Png);
        assert!(name.starts_with("IMG_"));
        assert!(name.ends_with(".png"));
        assert_ne!(name, photo_file_name(EncodingFormat::Png));
    }
}
