// SPDX-License-Identifier: GPL-3.0-only

//! Filter catalog shared by the filter list, the config and the photo pipeline

use crate::errors::FilterError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Film filters shipped with the app
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterName {
    /// Soft colour film
    #[default]
    KC01,
    /// Black and white film
    KC02,
    /// Soft purple, sunset and dusk
    KC03,
}

impl FilterName {
    pub const ALL: [FilterName; 3] = [FilterName::KC01, FilterName::KC02, FilterName::KC03];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterName::KC01 => "KC01",
            FilterName::KC02 => "KC02",
            FilterName::KC03 => "KC03",
        }
    }

    /// Catalog entry for this filter
    pub fn descriptor(&self) -> &'static Filter {
        match self {
            FilterName::KC01 => &FILTERS[0],
            FilterName::KC02 => &FILTERS[1],
            FilterName::KC03 => &FILTERS[2],
        }
    }
}

impl fmt::Display for FilterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterName {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FilterError::UnknownFilter(s.to_string()))
    }
}

/// Static description of a filter as shown in the filter list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter {
    pub name: FilterName,
    pub subtitle: &'static str,
    /// Bundled example photo, relative to the asset root
    pub thumbnail: &'static str,
}

impl Filter {
    pub fn title(&self) -> &'static str {
        self.name.as_str()
    }

    /// Decode the example thumbnail
    pub fn thumbnail_image(&self) -> Result<DynamicImage, FilterError> {
        crate::assets::load_image(self.thumbnail)
    }
}

/// The filter catalog, in display order
pub static FILTERS: [Filter; 3] = [
    Filter {
        name: FilterName::KC01,
        subtitle: "A perfect soft film preset best suited for day to day photo.",
        thumbnail: "filters/kc01-ex.png",
    },
    Filter {
        name: FilterName::KC02,
        subtitle: "A Beautifully crafted black and white preset to emulate old film.",
        thumbnail: "filters/kc02-ex.png",
    },
    Filter {
        name: FilterName::KC03,
        subtitle: "Soft purple preset best suited for sunset and dusk.",
        thumbnail: "filters/kc03-ex.png",
    },
];
