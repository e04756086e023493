// SPDX-License-Identifier: GPL-3.0-only

//! Contract between the Lab and a modal photo viewer

use super::GalleryImage;

/// What the viewer asks of its owner to render pages
pub trait PhotoViewerDataSource {
    fn number_of_items(&self) -> usize;

    /// Image for a page, `None` when out of range
    fn photo_at(&self, index: usize) -> Option<&GalleryImage>;
}

/// Callbacks the viewer sends back to its owner
pub trait PhotoViewerDelegate {
    /// Presentation finished; returns the page the viewer should jump to
    fn did_end_presenting(&mut self) -> usize;

    /// The user paged to `index`; returns a new grid scroll offset when the
    /// matching cell has to be brought into view
    fn did_scroll_to(&mut self, index: usize) -> Option<f32>;
}
