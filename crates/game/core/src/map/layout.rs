use crate::config::GameConfig;
use crate::geometry::Edge;

use super::MapError;

/// Square grid of same-size zones cut from a map's full image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneLayout {
    side: u32,
}

impl ZoneLayout {
    pub const SINGLE: ZoneLayout = ZoneLayout { side: 1 };

    /// Derives the layout from the full image width: `viewport_width * i` ⇒ `i²` zones.
    pub fn from_image_width(width: u32, viewport_width: u32) -> Result<Self, MapError> {
        let max_side = (GameConfig::MAX_ZONES as f64).sqrt() as u32;
        (1..=max_side)
            .find(|side| viewport_width.checked_mul(*side) == Some(width))
            .map(|side| Self { side })
            .ok_or(MapError::InvalidLayout {
                width,
                viewport_width,
            })
    }

    pub const fn side(&self) -> u32 {
        self.side
    }

    pub const fn zones(&self) -> u32 {
        self.side * self.side
    }

    pub const fn contains(&self, zone: u32) -> bool {
        zone >= 1 && zone <= self.zones()
    }

    /// Pixel origin of `zone` (1-based, row-major) inside the full image.
    pub fn origin(&self, zone: u32, viewport: (u32, u32)) -> Option<(u32, u32)> {
        if !self.contains(zone) {
            return None;
        }
        let index = zone - 1;
        let column = index % self.side;
        let row = index / self.side;
        Some((column * viewport.0, row * viewport.1))
    }

    /// Zone reached by leaving `zone` through `edge`.
    ///
    /// Edge crossings are only wired for the 2×2 layout; every other layout
    /// keeps the unit inside its zone.
    pub fn neighbor(&self, zone: u32, edge: Edge) -> Option<u32> {
        if self.zones() != 4 {
            return None;
        }
        match (zone, edge) {
            (1, Edge::Right) => Some(2),
            (3, Edge::Right) => Some(4),
            (2, Edge::Left) => Some(1),
            (4, Edge::Left) => Some(3),
            (1, Edge::Bottom) => Some(3),
            (2, Edge::Bottom) => Some(4),
            (3, Edge::Top) => Some(1),
            (4, Edge::Top) => Some(2),
            _ => None,
        }
    }
}
