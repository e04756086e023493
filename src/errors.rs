// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the camera core

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Filter or image processing errors
    Filter(FilterError),
    /// Photo store / photo library errors
    Storage(StorageError),
    /// Configuration errors
    Config(String),
    /// Generic error with message
    Other(String),
}

/// Image filter errors
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A bundled asset (grain texture, thumbnail) could not be found
    MissingAsset(String),
    /// No filter with this name exists in the catalog
    UnknownFilter(String),
    /// Input could not be decoded
    DecodeFailed(String),
    /// Output could not be encoded
    EncodeFailed(String),
    /// Blend inputs disagree in size
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    /// Background processing task failed
    TaskFailed(String),
}

/// Photo storage errors
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// No photo with this identifier
    NotFound(String),
    /// The platform refused access
    PermissionDenied(String),
    /// Identifier is empty or escapes the photo directory
    InvalidIdentifier(String),
    /// Any other I/O failure
    Io(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Filter(e) => write!(f, "Filter error: {}", e),
            AppError::Storage(e) => write!(f, "Storage error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::MissingAsset(name) => write!(f, "Missing asset: {}", name),
            FilterError::UnknownFilter(name) => write!(f, "Unknown filter: {}", name),
            FilterError::DecodeFailed(msg) => write!(f, "Decoding failed: {}", msg),
            FilterError::EncodeFailed(msg) => write!(f, "Encoding failed: {}", msg),
            FilterError::DimensionMismatch { expected, actual } => write!(
                f,
                "Dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            FilterError::TaskFailed(msg) => write!(f, "Processing task failed: {}", msg),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(id) => write!(f, "Photo not found: {}", id),
            StorageError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            StorageError::InvalidIdentifier(id) => write!(f, "Invalid photo identifier: {}", id),
            StorageError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for FilterError {}
impl std::error::Error for StorageError {}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        AppError::Filter(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.into())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(err.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                StorageError::PermissionDenied(err.to_string())
            }
            _ => StorageError::Io(err.to_string()),
        }
    }
}

impl From<image::ImageError> for FilterError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Encoding(e) => FilterError::EncodeFailed(e.to_string()),
            other => FilterError::DecodeFailed(other.to_string()),
        }
    }
}
