// SPDX-License-Identifier: GPL-3.0-only

//! Lab grid geometry
//!
//! Three square-ish cells per row under a section header. Cells are
//! `width / 3` wide and `0.425 * width` tall with a fixed inset on every side.

use crate::constants::grid::{CELL_MARGIN, COLUMNS, HEADER_HEIGHT, ROW_HEIGHT_FRACTION};
use std::ops::Range;

/// Rectangle in grid content coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellFrame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CellFrame {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Grid layout for a given container width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    width: f32,
}

impl GridLayout {
    pub fn new(width: f32) -> Self {
        Self {
            width: width.max(0.0),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn column_width(&self) -> f32 {
        self.width / COLUMNS as f32
    }

    pub fn row_height(&self) -> f32 {
        self.width * ROW_HEIGHT_FRACTION
    }

    /// (row, column) of an item
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / COLUMNS, index % COLUMNS)
    }

    pub fn rows(&self, count: usize) -> usize {
        count.div_ceil(COLUMNS)
    }

    /// Outer cell rectangle, before the inset
    pub fn cell_frame(&self, index: usize) -> CellFrame {
        let (row, column) = self.position(index);
        CellFrame {
            x: column as f32 * self.column_width(),
            y: HEADER_HEIGHT + row as f32 * self.row_height(),
            width: self.column_width(),
            height: self.row_height(),
        }
    }

    /// Photo rectangle inside the cell, after the inset
    pub fn photo_frame(&self, index: usize) -> CellFrame {
        let cell = self.cell_frame(index);
        CellFrame {
            x: cell.x + CELL_MARGIN,
            y: cell.y + CELL_MARGIN,
            width: (cell.width - 2.0 * CELL_MARGIN).max(0.0),
            height: (cell.height - 2.0 * CELL_MARGIN).max(0.0),
        }
    }

    /// Total scrollable height for `count` items
    pub fn content_height(&self, count: usize) -> f32 {
        HEADER_HEIGHT + self.rows(count) as f32 * self.row_height()
    }

    /// Items at least partially inside `[offset, offset + viewport_height)`
    pub fn visible_range(&self, count: usize, offset: f32, viewport_height: f32) -> Range<usize> {
        let row_height = self.row_height();
        if count == 0 || row_height <= 0.0 || viewport_height <= 0.0 {
            return 0..0;
        }

        let top = (offset - HEADER_HEIGHT).max(0.0);
        let bottom = offset + viewport_height - HEADER_HEIGHT;
        if bottom <= 0.0 {
            return 0..0;
        }

        // Float-to-int casts saturate; clamp before doing index arithmetic
        let rows = self.rows(count);
        let first_row = ((top / row_height).floor() as usize).min(rows);
        let last_row = ((bottom / row_height).ceil() as usize)
            .min(rows)
            .max(first_row + 1);

        let start = (first_row * COLUMNS).min(count);
        let end = (last_row * COLUMNS).min(count);
        start..end
    }

    /// Whether the whole cell of `index` is on screen
    pub fn is_fully_visible(&self, index: usize, offset: f32, viewport_height: f32) -> bool {
        let cell = self.cell_frame(index);
        cell.y >= offset && cell.bottom() <= offset + viewport_height
    }

    /// Offset that reveals `index` aligned to the bottom edge, or `None` when
    /// it is already fully visible.
    pub fn scroll_to_reveal(
        &self,
        index: usize,
        count: usize,
        offset: f32,
        viewport_height: f32,
    ) -> Option<f32> {
        if index >= count || self.is_fully_visible(index, offset, viewport_height) {
            return None;
        }

        let max_offset = (self.content_height(count) - viewport_height).max(0.0);
        let target = self.cell_frame(index).bottom() - viewport_height;
        Some(target.clamp(0.0, max_offset))
    }
}
