// SPDX-License-Identifier: GPL-3.0-only

//! Storage for developed photos
//!
//! The Lab reads from a [`PhotoStore`] and exports to a [`PhotoLibrary`].
//! Both are traits so hosts can plug in their platform storage;
//! [`DocumentsStore`] and [`PicturesAlbum`] are plain directory backends.

use crate::constants::{APP_NAME, PHOTO_EXTENSIONS};
use crate::errors::StorageError;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// Directory-like store the Lab lists and deletes from
pub trait PhotoStore: Send + Sync + 'static {
    /// Root all identifiers are relative to
    fn root(&self) -> &Path;

    /// Photo files, newest first
    fn list(&self) -> Result<Vec<PathBuf>, StorageError>;

    /// Write encoded photo bytes under `file_name`, returning the full path
    fn write(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, StorageError>;

    /// Delete the photo with this identifier
    fn delete(&self, identifier: &str) -> Result<(), StorageError>;
}

/// The user's photo album
pub trait PhotoLibrary: Send + Sync + 'static {
    /// Copy the photo at `source` into the album, returning where it landed
    fn save_to_album(&self, source: &Path) -> Result<PathBuf, StorageError>;
}

/// Identifier of `path` relative to `root`, with `/` separators.
///
/// Returns `None` when `path` is not inside `root`.
pub fn identifier_for(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Resolve an identifier back to a path inside `root`.
///
/// Rejects empty identifiers and anything that could leave `root`.
pub fn resolve_identifier(root: &Path, identifier: &str) -> Result<PathBuf, StorageError> {
    let relative = Path::new(identifier.trim_start_matches('/'));
    let is_plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));

    if identifier.trim().is_empty() || !is_plain || relative.as_os_str().is_empty() {
        return Err(StorageError::InvalidIdentifier(identifier.to_string()));
    }

    Ok(root.join(relative))
}

/// Whether the file extension is one the Lab displays
pub fn is_photo_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            PHOTO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Default Lab directory: `<Documents>/Kontax Cam`
pub fn default_lab_dir() -> PathBuf {
    dirs::document_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(APP_NAME)
}

/// Default album directory: `<Pictures>/Kontax Cam`
pub fn default_album_dir() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(APP_NAME)
}

/// Photo store backed by a single local directory
#[derive(Debug, Clone)]
pub struct DocumentsStore {
    root: PathBuf,
}

impl DocumentsStore {
    /// Open the store, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "Opened photo store");
        Ok(Self { root })
    }
}

impl PhotoStore for DocumentsStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn list(&self) -> Result<Vec<PathBuf>, StorageError> {
        let mut entries: Vec<(PathBuf, Option<SystemTime>)> = std::fs::read_dir(&self.root)?
            .flatten()
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.path())
            .filter(|path| is_photo_file(path))
            .map(|path| {
                let modified = std::fs::metadata(&path)
                    .and_then(|m| m.modified())
                    .ok();
                (path, modified)
            })
            .collect();

        // Newest first, ties by name for a stable order
        entries.sort_by(|(a_path, a_time), (b_path, b_time)| {
            b_time.cmp(a_time).then_with(|| a_path.cmp(b_path))
        });

        debug!(count = entries.len(), "Listed photo store");
        Ok(entries.into_iter().map(|(path, _)| path).collect())
    }

    fn write(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
        let path = resolve_identifier(&self.root, file_name)?;
        std::fs::write(&path, data)?;
        info!(path = %path.display(), size = data.len(), "Photo written");
        Ok(path)
    }

    fn delete(&self, identifier: &str) -> Result<(), StorageError> {
        let path = resolve_identifier(&self.root, identifier)?;
        std::fs::remove_file(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(identifier.to_string()),
            _ => StorageError::from(e),
        })?;
        info!(identifier, "Photo deleted");
        Ok(())
    }
}

/// Photo library backed by a local pictures folder
#[derive(Debug, Clone)]
pub struct PicturesAlbum {
    dir: PathBuf,
}

impl PicturesAlbum {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for PicturesAlbum {
    fn default() -> Self {
        Self::new(default_album_dir())
    }
}

impl PhotoLibrary for PicturesAlbum {
    fn save_to_album(&self, source: &Path) -> Result<PathBuf, StorageError> {
        let file_name = source
            .file_name()
            .ok_or_else(|| StorageError::InvalidIdentifier(source.display().to_string()))?;

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            warn!(dir = %self.dir.display(), error = %e, "Cannot create album directory");
            StorageError::from(e)
        })?;

        let target = self.dir.join(file_name);
        std::fs::copy(source, &target)?;
        info!(path = %target.display(), "Photo saved to album");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_round_trip() {
        let root = Path::new("/data/lab");
        let id = identifier_for(root, Path::new("/data/lab/IMG_1.jpg")).unwrap();
        assert_eq!(id, "IMG_1.jpg");
        assert_eq!(
            resolve_identifier(root, &id).unwrap(),
            PathBuf::from("/data/lab/IMG_1.jpg")
        );
    }

    #[test]
    fn test_identifier_outside_root() {
        assert_eq!(
            identifier_for(Path::new("/data/lab"), Path::new("/data/other.jpg")),
            None
        );
        assert_eq!(identifier_for(Path::new("/data/lab"), Path::new("/data/lab")), None);
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        let root = Path::new("/data/lab");
        for bad in ["", "  ", "../secret.jpg", "a/../../b.jpg", "./x.jpg"] {
            assert!(
                matches!(
                    resolve_identifier(root, bad),
                    Err(StorageError::InvalidIdentifier(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_leading_slash_is_tolerated() {
        let root = Path::new("/data/lab");
        assert_eq!(
            resolve_identifier(root, "/IMG_2.png").unwrap(),
            PathBuf::from("/data/lab/IMG_2.png")
        );
    }

    #[test]
    fn test_is_photo_file() {
        assert!(is_photo_file(Path::new("a.JPG")));
        assert!(is_photo_file(Path::new("a.jpeg")));
        assert!(is_photo_file(Path::new("a.png")));
        assert!(!is_photo_file(Path::new("a.txt")));
        assert!(!is_photo_file(Path::new("jpg")));
    }
}
