// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the photo development pipeline

use image::metadata::Orientation;
use image::{Rgba, RgbaImage};
use kontax_cam::constants::QualityPreset;
use kontax_cam::pipelines::photo::{
    EncodingFormat, GrainImageFilter, ImageFilter, PhotoPipeline, Picture, PostProcessingConfig,
};
use kontax_cam::storage::{DocumentsStore, PhotoStore};
use kontax_cam::{FilterError, FilterName, Lab};
use std::sync::Arc;

fn sample() -> Picture {
    Picture::new(RgbaImage::from_fn(32, 20, |x, y| {
        Rgba([(x * 7) as u8, (y * 11) as u8, 180, 255])
    }))
}

#[test]
fn test_grain_twice_gives_identical_output() {
    let filter = GrainImageFilter::new(0.6).unwrap();
    let picture = sample();
    assert_eq!(
        filter.process(&picture).unwrap(),
        filter.process(&picture).unwrap()
    );
}

#[test]
fn test_stronger_grain_brightens_more() {
    let picture = sample();
    let sum = |p: &Picture| -> u64 { p.pixels.pixels().map(|px| px[0] as u64).sum() };

    let weak = GrainImageFilter::new(0.2).unwrap().process(&picture).unwrap();
    let strong = GrainImageFilter::new(1.0).unwrap().process(&picture).unwrap();

    assert!(sum(&weak) >= sum(&picture));
    assert!(sum(&strong) > sum(&weak));
}

#[test]
fn test_unknown_grain_asset_fails_early() {
    let err = GrainImageFilter::from_asset("grain/missing.png", 1.0).unwrap_err();
    assert_eq!(err, FilterError::MissingAsset("grain/missing.png".to_string()));
}

#[tokio::test]
async fn test_develop_writes_into_lab() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn PhotoStore> = Arc::new(DocumentsStore::open(dir.path()).unwrap());

    let pipeline = PhotoPipeline::new(
        PostProcessingConfig {
            filter: FilterName::KC02,
            grain_strength: Some(0.5),
        },
        EncodingFormat::Png,
        QualityPreset::High,
    )
    .unwrap();

    let path = pipeline.develop(sample(), Arc::clone(&store)).await.unwrap();
    assert!(path.starts_with(dir.path()));
    assert_eq!(path.extension().unwrap(), "png");

    // KC02 is black and white; grain is neutral grey
    let developed = Picture::open(&path).unwrap();
    for px in developed.pixels.pixels() {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }

    let lab = Lab::open(store).unwrap();
    assert_eq!(lab.len(), 1);
}

#[tokio::test]
async fn test_develop_keeps_orientation() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out").join("rotated.png");

    let picture = Picture::with_orientation(
        RgbaImage::from_pixel(8, 3, Rgba([90, 90, 90, 255])),
        Orientation::Rotate90,
    );

    let pipeline = PhotoPipeline::new(
        PostProcessingConfig {
            filter: FilterName::KC01,
            grain_strength: None,
        },
        EncodingFormat::Png,
        QualityPreset::High,
    )
    .unwrap();

    pipeline.develop_to(picture, &output).await.unwrap();

    let written = Picture::open(&output).unwrap();
    assert_eq!(written.pixels.dimensions(), (3, 8));
}

#[tokio::test]
async fn test_develop_file_decodes_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.png");
    sample().pixels.save(&input).unwrap();

    let lab_dir = dir.path().join("lab");
    let store: Arc<dyn PhotoStore> = Arc::new(DocumentsStore::open(&lab_dir).unwrap());
    let pipeline = PhotoPipeline::new(
        PostProcessingConfig::default(),
        EncodingFormat::Jpeg,
        QualityPreset::Medium,
    )
    .unwrap();

    let path = pipeline.develop_file(&input, store).await.unwrap();
    assert_eq!(path.extension().unwrap(), "jpg");

    let developed = Picture::open(&path).unwrap();
    assert_eq!(developed.pixels.dimensions(), (32, 20));
}
