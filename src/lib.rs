// SPDX-License-Identifier: GPL-3.0-only

//! Kontax Cam core - film filters, grain and the photo Lab
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Headless controllers (filter list, Lab gallery)
//! - [`pipelines`]: Photo development (film presets, grain, encoding)
//! - [`storage`]: Photo store and photo library backends
//! - [`config`]: User configuration handling
//! - [`assets`]: Bundled grain textures and filter thumbnails
//!
//! # Example
//!
//! ```ignore
//! // Develop a photo into the Lab from the command line:
//! // kontax-cam develop photo.jpg --filter KC02
//! ```

pub mod app;
pub mod assets;
pub mod config;
pub mod constants;
pub mod errors;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use app::{Alert, AlertStyle, FilterList, FilterListDelegate, FilterName, Lab, LabMessage};
pub use config::Config;
pub use constants::QualityPreset;
pub use errors::{AppError, AppResult, FilterError, StorageError};
