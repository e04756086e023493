// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use kontax_cam::app::FilterList;
use kontax_cam::{Config, FilterName};

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.selected_filter, FilterName::KC01);
    assert_eq!(config.grain_strength, 1.0, "Grain should default to full strength");
    assert!(config.grain_enabled);
    assert!(config.lab_directory.is_none());
}

#[test]
fn test_config_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.selected_filter = FilterName::KC02;
    config.set_grain_strength(0.35);
    config.save(&path).unwrap();

    assert_eq!(Config::load(&path).unwrap(), Some(config));
}

#[test]
fn test_missing_config_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(Config::load(&dir.path().join("absent.json")).unwrap(), None);
}

#[test]
fn test_corrupt_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load(&path).is_err());
    assert_eq!(Config::load_or_default(&path), Config::default());
}

#[test]
fn test_out_of_range_grain_is_clamped_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "grain_strength": 7.5 }"#).unwrap();

    assert_eq!(Config::load_or_default(&path).grain_strength, 1.0);
}

#[test]
fn test_filter_list_updates_config() {
    let mut list = FilterList::new(Config::default(), Some(FilterName::KC01));
    list.select(2).unwrap();

    let config = list.into_delegate();
    assert_eq!(config.selected_filter, FilterName::KC03);
    assert_eq!(config.post_processing().filter, FilterName::KC03);
}
