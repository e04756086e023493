// SPDX-License-Identifier: GPL-3.0-only

//! Bundled image assets (grain textures, filter thumbnails)

use crate::errors::FilterError;
use image::DynamicImage;
use rust_embed::RustEmbed;
use tracing::debug;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// Raw bytes of a bundled asset, or `MissingAsset` when it is not bundled
pub fn bytes(path: &str) -> Result<std::borrow::Cow<'static, [u8]>, FilterError> {
    Assets::get(path)
        .map(|file| file.data)
        .ok_or_else(|| FilterError::MissingAsset(path.to_string()))
}

/// Decode a bundled image asset
pub fn load_image(path: &str) -> Result<DynamicImage, FilterError> {
    let data = bytes(path)?;
    debug!(asset = path, size = data.len(), "Decoding bundled asset");
    Ok(image::load_from_memory(&data)?)
}

/// Whether an asset is bundled
pub fn exists(path: &str) -> bool {
    Assets::get(path).is_some()
}
