// SPDX-License-Identifier: GPL-3.0-only

//! Filter list
//!
//! Presents the filter catalog, highlights the current choice and reports a
//! selection to a single delegate before dismissing itself.

use crate::app::state::{FILTERS, Filter, FilterName};
use crate::errors::{AppError, AppResult};
use tracing::{debug, info};

/// Receives the chosen filter
pub trait FilterListDelegate {
    fn did_select_filter(&mut self, filter_name: FilterName);
}

/// One row of the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterRow {
    pub filter: &'static Filter,
    /// Drawn highlighted
    pub is_selected: bool,
}

/// Headless filter list controller
pub struct FilterList<D: FilterListDelegate> {
    delegate: D,
    selected: Option<FilterName>,
    dismissed: bool,
}

impl<D: FilterListDelegate> FilterList<D> {
    /// Create the list, highlighting `selected` if given
    pub fn new(delegate: D, selected: Option<FilterName>) -> Self {
        Self {
            delegate,
            selected,
            dismissed: false,
        }
    }

    /// Rows in display order
    pub fn rows(&self) -> impl Iterator<Item = FilterRow> + '_ {
        FILTERS.iter().map(move |filter| FilterRow {
            filter,
            is_selected: Some(filter.name) == self.selected,
        })
    }

    pub fn len(&self) -> usize {
        FILTERS.len()
    }

    pub fn is_empty(&self) -> bool {
        FILTERS.is_empty()
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// Select the row at `index`, notify the delegate and dismiss.
    ///
    /// Returns `Ok(None)` when the list was already dismissed.
    pub fn select(&mut self, index: usize) -> AppResult<Option<FilterName>> {
        if self.dismissed {
            debug!(index, "Ignoring selection on dismissed filter list");
            return Ok(None);
        }

        let filter = FILTERS.get(index).ok_or_else(|| {
            AppError::Other(format!(
                "Filter index {} out of range (0-{})",
                index,
                FILTERS.len() - 1
            ))
        })?;

        info!(filter = %filter.name, "Filter selected");
        self.selected = Some(filter.name);
        self.delegate.did_select_filter(filter.name);
        self.dismiss();

        Ok(Some(filter.name))
    }

    /// Select by filter name
    pub fn select_name(&mut self, name: FilterName) -> AppResult<Option<FilterName>> {
        let index = FILTERS
            .iter()
            .position(|filter| filter.name == name)
            .ok_or_else(|| AppError::Other(format!("Filter {} is not listed", name)))?;
        self.select(index)
    }

    /// Dismiss without selecting
    pub fn cancel(&mut self) {
        debug!("Filter list cancelled");
        self.dismiss();
    }

    /// Hand the delegate back once the list is done
    pub fn into_delegate(self) -> D {
        self.delegate
    }

    fn dismiss(&mut self) {
        self.dismissed = true;
    }
}
