// SPDX-License-Identifier: GPL-3.0-only

//! Compositing primitives used by the grain filter
//!
//! All operations work on RGBA8 buffers with channels normalised to `[0, 1]`.

use crate::errors::FilterError;
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Scale every alpha value by `opacity` (clamped to `[0, 1]`)
pub fn opacity_adjust(image: &RgbaImage, opacity: f32) -> RgbaImage {
    let opacity = opacity.clamp(0.0, 1.0);
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        pixel[3] = to_u8(pixel[3] as f32 / 255.0 * opacity);
    }
    out
}

/// Screen-blend `overlay` onto `base`, weighted by the overlay's alpha.
///
/// `screen = 1 - (1 - base) * (1 - overlay)` per colour channel, then
/// `out = base + (screen - base) * overlay_alpha`. The base alpha is kept.
pub fn screen_blend(base: &RgbaImage, overlay: &RgbaImage) -> Result<RgbaImage, FilterError> {
    if base.dimensions() != overlay.dimensions() {
        return Err(FilterError::DimensionMismatch {
            expected: base.dimensions(),
            actual: overlay.dimensions(),
        });
    }

    let mut out = base.clone();
    for (pixel, over) in out.pixels_mut().zip(overlay.pixels()) {
        let alpha = over[3] as f32 / 255.0;
        for c in 0..3 {
            let b = pixel[c] as f32 / 255.0;
            let o = over[c] as f32 / 255.0;
            let screen = 1.0 - (1.0 - b) * (1.0 - o);
            pixel[c] = to_u8(b + (screen - b) * alpha);
        }
    }
    Ok(out)
}

/// Stretch `texture` to `width` x `height`, matching how a texture is sampled
/// across the whole output. Returns a copy when the size already matches.
pub fn fit_texture(texture: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if texture.dimensions() == (width, height) {
        texture.clone()
    } else {
        imageops::resize(texture, width, height, FilterType::Triangle)
    }
}

fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(px))
    }

    #[test]
    fn test_opacity_only_touches_alpha() {
        let out = opacity_adjust(&solid(2, 2, [10, 20, 30, 200]), 0.5);
        assert_eq!(out.get_pixel(1, 1), &Rgba([10, 20, 30, 100]));
    }

    #[test]
    fn test_opacity_is_clamped() {
        let image = solid(1, 1, [0, 0, 0, 200]);
        assert_eq!(opacity_adjust(&image, 3.0).get_pixel(0, 0)[3], 200);
        assert_eq!(opacity_adjust(&image, -1.0).get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_screen_with_opaque_overlay() {
        let base = solid(1, 1, [128, 0, 255, 255]);
        let over = solid(1, 1, [128, 255, 0, 255]);
        let out = screen_blend(&base, &over).unwrap();
        // 1 - (1 - 0.502)^2 = 0.752 -> 192
        assert_eq!(out.get_pixel(0, 0), &Rgba([192, 255, 255, 255]));
    }

    #[test]
    fn test_screen_with_transparent_overlay_is_identity() {
        let base = solid(2, 1, [40, 80, 120, 255]);
        let over = solid(2, 1, [255, 255, 255, 0]);
        assert_eq!(screen_blend(&base, &over).unwrap(), base);
    }

    #[test]
    fn test_screen_never_darkens() {
        let base = solid(1, 1, [90, 90, 90, 255]);
        let over = solid(1, 1, [30, 30, 30, 128]);
        let out = screen_blend(&base, &over).unwrap();
        assert!(out.get_pixel(0, 0)[0] >= 90);
    }

    #[test]
    fn test_screen_rejects_size_mismatch() {
        let err = screen_blend(&solid(2, 2, [0; 4]), &solid(1, 2, [0; 4])).unwrap_err();
        assert_eq!(
            err,
            FilterError::DimensionMismatch {
                expected: (2, 2),
                actual: (1, 2)
            }
        );
    }

    #[test]
    fn test_fit_texture() {
        let texture = solid(4, 4, [1, 2, 3, 4]);
        assert_eq!(fit_texture(&texture, 4, 4), texture);
        assert_eq!(fit_texture(&texture, 7, 3).dimensions(), (7, 3));
    }
}
