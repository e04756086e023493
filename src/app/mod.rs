// SPDX-License-Identifier: GPL-3.0-only

//! Headless application controllers
//!
//! - [`filter_list`]: choose the film filter
//! - [`lab`]: browse, view, delete, save and share developed photos
//!
//! Presentation is left to the host; controllers expose state, delegate
//! callbacks and tasks.

pub mod filter_list;
pub mod lab;
pub mod state;

pub use filter_list::{FilterList, FilterListDelegate, FilterRow};
pub use lab::{Alert, AlertStyle, GalleryImage, Lab, LabMessage, LabTask};
pub use state::{FILTERS, Filter, FilterName};
