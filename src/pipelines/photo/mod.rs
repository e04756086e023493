// SPDX-License-Identifier: GPL-3.0-only

//! Photo development pipeline
//!
//! ```text
//! Source file → Decode → Film preset → Grain → Encoding → Photo store
//! ```
//!
//! # Pipeline Stages
//!
//! 1. **Decode**: read pixels and EXIF orientation ([`Picture`])
//! 2. **Post-Processing**: catalog film preset, then grain overlay
//! 3. **Encoding**: JPEG/PNG with the orientation applied
//! 4. **Disk I/O**: write into the Lab's [`PhotoStore`](crate::storage::PhotoStore)
//!
//! CPU-bound stages run on tokio's blocking pool; callers await the whole
//! pipeline.

pub mod compositing;
pub mod encoding;
pub mod grain;
pub mod picture;
pub mod processing;

pub use encoding::{EncodedImage, EncodingFormat, PhotoEncoder};
pub use grain::{GrainImageFilter, GrainName};
pub use picture::Picture;
pub use processing::{ColorPreset, ImageFilter, PostProcessingConfig, PostProcessor, PresetFilter};

use crate::constants::QualityPreset;
use crate::errors::{AppResult, FilterError};
use crate::storage::PhotoStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Complete develop pipeline
///
/// Orchestrates the process → encode → save workflow.
pub struct PhotoPipeline {
    post_processor: Arc<PostProcessor>,
    encoder: PhotoEncoder,
}

impl PhotoPipeline {
    /// Build a pipeline; fails if a bundled asset the chain needs is missing
    pub fn new(
        processing_config: PostProcessingConfig,
        encoding_format: EncodingFormat,
        encoding_quality: QualityPreset,
    ) -> Result<Self, FilterError> {
        let mut encoder = PhotoEncoder::new();
        encoder.set_format(encoding_format);
        encoder.set_quality(encoding_quality);

        Ok(Self {
            post_processor: Arc::new(PostProcessor::new(processing_config)?),
            encoder,
        })
    }

    /// Run only the filter chain
    pub async fn process(&self, picture: Picture) -> Result<Picture, FilterError> {
        let processor = Arc::clone(&self.post_processor);
        tokio::task::spawn_blocking(move || processor.process(&picture))
            .await
            .map_err(|e| FilterError::TaskFailed(format!("Post-processing task error: {}", e)))?
    }

    /// Process, encode and store a picture, returning the stored path
    pub async fn develop(&self, picture: Picture, store: Arc<dyn PhotoStore>) -> AppResult<PathBuf> {
        let processed = self.process(picture).await?;
        let encoded = self.encoder.encode(processed).await?;
        let path = self.encoder.save(encoded, store).await?;

        info!(path = %path.display(), "Photo developed");
        Ok(path)
    }

    /// Process and encode a picture, writing it to an explicit path
    pub async fn develop_to(&self, picture: Picture, output: &Path) -> AppResult<PathBuf> {
        let processed = self.process(picture).await?;
        let encoded = self.encoder.encode(processed).await?;

        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(output, &encoded.data).await?;

        info!(path = %output.display(), "Photo developed");
        Ok(output.to_path_buf())
    }

    /// Decode a file and develop it into the store
    pub async fn develop_file(
        &self,
        input: &Path,
        store: Arc<dyn PhotoStore>,
    ) -> AppResult<PathBuf> {
        let input = input.to_path_buf();
        let picture = tokio::task::spawn_blocking(move || Picture::open(&input))
            .await
            .map_err(|e| FilterError::TaskFailed(format!("Decode task error: {}", e)))??;
        self.develop(picture, store).await
    }
}
