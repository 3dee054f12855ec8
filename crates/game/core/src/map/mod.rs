//! Zoned maps and the currently materialized view.
//!
//! A map is a pair of full-size images (solid mask + texture) cut into a square
//! grid of viewport-sized zones. [`MapView`] keeps exactly one zone, or one
//! building interior, materialized at a time together with the entry areas
//! derived from its mask.

mod bitmap;
mod entry;
mod layout;
mod view;

pub use bitmap::{Bitmap, MaskPalette, Rgb};
pub use entry::{EntryArea, scan_entry_areas};
pub use layout::ZoneLayout;
pub use view::MapView;

use crate::error::{ErrorSeverity, GameError};

/// Source images and start zone of a map, as provided by a [`MapOracle`](crate::env::MapOracle).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapBlueprint {
    pub name: String,
    pub mask: Bitmap,
    pub texture: Bitmap,
    pub start_zone: u32,
    pub interiors: Vec<InteriorBlueprint>,
    pub palette: MaskPalette,
}

impl MapBlueprint {
    pub fn new(name: impl Into<String>, mask: Bitmap, texture: Bitmap, start_zone: u32) -> Self {
        Self {
            name: name.into(),
            mask,
            texture,
            start_zone,
            interiors: Vec::new(),
            palette: MaskPalette::default(),
        }
    }

    pub fn with_interior(mut self, interior: InteriorBlueprint) -> Self {
        self.interiors.push(interior);
        self
    }
}

/// Mask/texture pair substituted for a zone when a unit enters building `entry`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteriorBlueprint {
    pub zone: u32,
    pub entry: u8,
    pub mask: Bitmap,
    pub texture: Bitmap,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("image width {width} is not a square zone grid of {viewport_width}px zones")]
    InvalidLayout { width: u32, viewport_width: u32 },

    #[error("image is {actual:?}, expected {expected:?}")]
    ImageSize {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("bitmap holds {actual} pixels, expected {expected}")]
    PixelCount { expected: usize, actual: usize },

    #[error("zone {zone} does not exist (map has {zones} zones)")]
    ZoneOutOfRange { zone: u32, zones: u32 },

    #[error("no interior {interior} for zone {zone}")]
    MissingInterior { zone: u32, interior: u8 },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        use MapError::*;
        match self {
            ZoneOutOfRange { .. } => ErrorSeverity::Validation,
            InvalidLayout { .. } | ImageSize { .. } | PixelCount { .. } | MissingInterior { .. } => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use MapError::*;
        match self {
            InvalidLayout { .. } => "MAP_INVALID_LAYOUT",
            ImageSize { .. } => "MAP_IMAGE_SIZE",
            PixelCount { .. } => "MAP_PIXEL_COUNT",
            ZoneOutOfRange { .. } => "MAP_ZONE_OUT_OF_RANGE",
            MissingInterior { .. } => "MAP_MISSING_INTERIOR",
        }
    }
}
