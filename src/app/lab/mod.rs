// SPDX-License-Identifier: GPL-3.0-only

//! The Lab: grid browser for developed photos
//!
//! Photos are loaded eagerly when the Lab opens. Store work (delete, save to
//! album) is handed back to the host as [`LabTask`] futures; their results
//! come back through [`Lab::update`] as [`LabMessage`]s and may produce an
//! [`Alert`].
//!
//! Deleting drops the in-memory entry immediately. If the store later fails
//! to remove the file the entry is not restored; the user is told instead.

pub mod layout;
pub mod viewer;

pub use layout::{CellFrame, GridLayout};
pub use viewer::{PhotoViewerDataSource, PhotoViewerDelegate};

use crate::constants::APP_NAME;
use crate::errors::{AppError, AppResult, StorageError};
use crate::pipelines::photo::Picture;
use crate::storage::{PhotoLibrary, PhotoStore, identifier_for};
use futures::FutureExt;
use futures::future::BoxFuture;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Default grid width when the host has not reported one
const DEFAULT_GRID_WIDTH: f32 = 390.0;
/// Default viewport height when the host has not reported one
const DEFAULT_VIEWPORT_HEIGHT: f32 = 844.0;

/// A photo shown in the Lab
#[derive(Debug, Clone)]
pub struct GalleryImage {
    /// Path relative to the store root
    pub identifier: String,
    pub path: PathBuf,
    /// Decoded, upright pixels
    pub image: DynamicImage,
}

/// How an alert is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStyle {
    /// Short confirmation that dismisses itself
    Done,
    /// Dialog the user has to acknowledge
    Error,
}

/// A message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: Option<String>,
    pub style: AlertStyle,
}

impl Alert {
    pub fn done(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: None,
            style: AlertStyle::Done,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: Some(message.into()),
            style: AlertStyle::Error,
        }
    }

    pub fn image_deleted() -> Self {
        Self::done("Image deleted.")
    }

    pub fn delete_failed() -> Self {
        Self::error("Something went wrong.", "We are unable to delete the image.")
    }

    pub fn saved() -> Self {
        Self::done("Saved")
    }

    pub fn save_permission_denied() -> Self {
        Self::error(
            format!("{} does not have permission.", APP_NAME),
            "Looks like we could not save the photo to your camera roll due to lack of permission. \
             Please check the app's permission under settings.",
        )
    }

    pub fn save_failed() -> Self {
        Self::error("Something went wrong.", "We are unable to save the image.")
    }
}

/// Results of store work started by the Lab
#[derive(Debug, Clone, PartialEq)]
pub enum LabMessage {
    Deleted {
        identifier: String,
        result: Result<(), StorageError>,
    },
    Saved {
        identifier: String,
        result: Result<PathBuf, StorageError>,
    },
}

/// Store work for the host to run; may be spawned and forgotten
pub type LabTask = BoxFuture<'static, LabMessage>;

/// Headless Lab controller
pub struct Lab {
    store: Arc<dyn PhotoStore>,
    images: Vec<GalleryImage>,
    selected_index: usize,
    is_selecting: bool,
    viewer_presented: bool,
    layout: GridLayout,
    scroll_offset: f32,
    viewport_height: f32,
}

impl Lab {
    /// Open the Lab and load every photo in the store
    pub fn open(store: Arc<dyn PhotoStore>) -> AppResult<Self> {
        let images = fetch_data(store.as_ref())?;
        info!(count = images.len(), root = %store.root().display(), "Lab opened");

        Ok(Self {
            store,
            images,
            selected_index: 0,
            is_selecting: false,
            viewer_presented: false,
            layout: GridLayout::new(DEFAULT_GRID_WIDTH),
            scroll_offset: 0.0,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        })
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The empty-state placeholder replaces the grid
    pub fn shows_empty_view(&self) -> bool {
        self.images.is_empty()
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn is_selecting(&self) -> bool {
        self.is_selecting
    }

    pub fn is_viewer_presented(&self) -> bool {
        self.viewer_presented
    }

    /// Host reports its grid size and scroll position
    pub fn set_viewport(&mut self, width: f32, height: f32, scroll_offset: f32) {
        self.layout = GridLayout::new(width);
        self.viewport_height = height.max(0.0);
        self.scroll_offset = scroll_offset.max(0.0);
    }

    /// Indices currently on screen
    pub fn visible_items(&self) -> std::ops::Range<usize> {
        self.layout
            .visible_range(self.images.len(), self.scroll_offset, self.viewport_height)
    }

    /// Toggle select mode, returning the new state
    pub fn toggle_selecting(&mut self) -> bool {
        self.is_selecting = !self.is_selecting;
        debug!(selecting = self.is_selecting, "Select mode toggled");
        self.is_selecting
    }

    /// Text of the select button; `None` shows the edit icon
    pub fn select_button_title(&self) -> Option<&'static str> {
        self.is_selecting.then_some("Cancel")
    }

    /// Whether the floating delete button is shown
    pub fn shows_delete_button(&self) -> bool {
        self.is_selecting
    }

    /// Tap on a grid cell: remember it and present the viewer
    pub fn select_item(&mut self, index: usize) -> AppResult<()> {
        self.check_index(index)?;
        self.selected_index = index;
        self.viewer_presented = true;
        debug!(index, "Presenting photo viewer");
        Ok(())
    }

    /// The viewer was closed by the user
    pub fn dismiss_viewer(&mut self) {
        self.viewer_presented = false;
    }

    /// Delete a photo.
    ///
    /// The entry leaves the grid right away and the returned alert confirms
    /// it. The file is removed by the returned task.
    pub fn delete(&mut self, index: usize) -> AppResult<(Alert, LabTask)> {
        self.check_index(index)?;

        let removed = self.images.remove(index);
        info!(identifier = %removed.identifier, index, "Deleting photo");

        if self.images.is_empty() {
            self.selected_index = 0;
            self.viewer_presented = false;
        } else if index < self.selected_index {
            // Keep pointing at the same photo
            self.selected_index -= 1;
        } else if self.selected_index >= self.images.len() {
            self.selected_index = self.images.len() - 1;
        }

        let store = Arc::clone(&self.store);
        let identifier = removed.identifier;
        let task = async move {
            let id = identifier.clone();
            let result = tokio::task::spawn_blocking(move || store.delete(&id))
                .await
                .unwrap_or_else(|e| Err(StorageError::Io(format!("Delete task error: {}", e))));
            LabMessage::Deleted { identifier, result }
        }
        .boxed();

        Ok((Alert::image_deleted(), task))
    }

    /// Save a photo to the user's album
    pub fn save(&self, index: usize, library: Arc<dyn PhotoLibrary>) -> AppResult<LabTask> {
        let image = self.photo(index)?;
        let identifier = image.identifier.clone();
        let path = image.path.clone();

        debug!(identifier = %identifier, "Saving photo to album");

        let task = async move {
            let result = tokio::task::spawn_blocking(move || library.save_to_album(&path))
                .await
                .unwrap_or_else(|e| Err(StorageError::Io(format!("Save task error: {}", e))));
            LabMessage::Saved { identifier, result }
        }
        .boxed();

        Ok(task)
    }

    /// File to hand to the system share target
    pub fn share(&self, index: usize) -> AppResult<&Path> {
        Ok(&self.photo(index)?.path)
    }

    /// Handle the result of a task
    pub fn update(&mut self, message: LabMessage) -> Option<Alert> {
        match message {
            LabMessage::Deleted { identifier, result } => match result {
                Ok(()) => {
                    debug!(identifier = %identifier, "Delete confirmed");
                    None
                }
                Err(e) => {
                    error!(identifier = %identifier, error = %e, "Failed to delete photo");
                    Some(Alert::delete_failed())
                }
            },
            LabMessage::Saved { identifier, result } => match result {
                Ok(path) => {
                    info!(identifier = %identifier, path = %path.display(), "Saved to album");
                    Some(Alert::saved())
                }
                Err(StorageError::PermissionDenied(e)) => {
                    warn!(identifier = %identifier, error = %e, "No permission to save photo");
                    Some(Alert::save_permission_denied())
                }
                Err(e) => {
                    error!(identifier = %identifier, error = %e, "Failed to save photo");
                    Some(Alert::save_failed())
                }
            },
        }
    }

    fn photo(&self, index: usize) -> AppResult<&GalleryImage> {
        self.images.get(index).ok_or_else(|| self.out_of_range(index))
    }

    fn check_index(&self, index: usize) -> AppResult<()> {
        if index < self.images.len() {
            Ok(())
        } else {
            Err(self.out_of_range(index))
        }
    }

    fn out_of_range(&self, index: usize) -> AppError {
        AppError::Other(format!(
            "Photo index {} out of range ({} photos)",
            index,
            self.images.len()
        ))
    }
}

impl PhotoViewerDataSource for Lab {
    fn number_of_items(&self) -> usize {
        self.images.len()
    }

    fn photo_at(&self, index: usize) -> Option<&GalleryImage> {
        self.images.get(index)
    }
}

impl PhotoViewerDelegate for Lab {
    fn did_end_presenting(&mut self) -> usize {
        self.selected_index
    }

    fn did_scroll_to(&mut self, index: usize) -> Option<f32> {
        if index >= self.images.len() {
            return None;
        }
        self.selected_index = index;

        let offset = self.layout.scroll_to_reveal(
            index,
            self.images.len(),
            self.scroll_offset,
            self.viewport_height,
        )?;
        self.scroll_offset = offset;
        Some(offset)
    }
}

/// Decode every photo in the store. Unreadable files are skipped.
fn fetch_data(store: &dyn PhotoStore) -> AppResult<Vec<GalleryImage>> {
    let root = store.root();
    let mut images = Vec::new();

    for path in store.list()? {
        let Some(identifier) = identifier_for(root, &path) else {
            warn!(path = %path.display(), "Skipping photo outside the Lab directory");
            continue;
        };

        match Picture::open(&path) {
            Ok(picture) => images.push(GalleryImage {
                identifier,
                image: picture.upright(),
                path,
            }),
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable photo"),
        }
    }

    Ok(images)
}
