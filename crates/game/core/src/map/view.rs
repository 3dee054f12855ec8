use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::geometry::{Direction, Rect};

use super::{Bitmap, EntryArea, MapBlueprint, MapError, MaskPalette, ZoneLayout, scan_entry_areas};

/// Images and derived entry areas for whatever is currently on screen.
#[derive(Clone, Debug)]
struct Materialized {
    mask: Bitmap,
    texture: Bitmap,
    entry_areas: Vec<EntryArea>,
}

/// A zoned map with exactly one zone or interior materialized.
///
/// Every switch builds the complete replacement first and commits it in one
/// assignment, so a failed switch leaves the previous view untouched.
#[derive(Clone, Debug)]
pub struct MapView {
    name: String,
    full_mask: Bitmap,
    full_texture: Bitmap,
    interiors: BTreeMap<(u32, u8), (Bitmap, Bitmap)>,
    layout: ZoneLayout,
    palette: MaskPalette,
    viewport: (u32, u32),
    entry_cell: u32,
    zone: u32,
    interior: u8,
    current: Materialized,
}

impl MapView {
    pub fn new(blueprint: MapBlueprint, config: &GameConfig) -> Result<Self, MapError> {
        let viewport = (config.viewport_width, config.viewport_height);
        let layout = ZoneLayout::from_image_width(blueprint.mask.width(), viewport.0)?;
        let full_size = (viewport.0 * layout.side(), viewport.1 * layout.side());

        for image in [&blueprint.mask, &blueprint.texture] {
            if image.size() != full_size {
                return Err(MapError::ImageSize {
                    expected: full_size,
                    actual: image.size(),
                });
            }
        }

        let mut interiors = BTreeMap::new();
        for interior in blueprint.interiors {
            for image in [&interior.mask, &interior.texture] {
                if image.size() != viewport {
                    return Err(MapError::ImageSize {
                        expected: viewport,
                        actual: image.size(),
                    });
                }
            }
            interiors.insert((interior.zone, interior.entry), (interior.mask, interior.texture));
        }

        let mut view = Self {
            name: blueprint.name,
            full_mask: blueprint.mask,
            full_texture: blueprint.texture,
            interiors,
            layout,
            palette: blueprint.palette,
            viewport,
            entry_cell: config.entry_cell,
            zone: blueprint.start_zone,
            interior: 0,
            current: Materialized {
                mask: Bitmap::filled(0, 0, Default::default()),
                texture: Bitmap::filled(0, 0, Default::default()),
                entry_areas: Vec::new(),
            },
        };
        view.current = view.materialize_zone(blueprint.start_zone)?;
        Ok(view)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> ZoneLayout {
        self.layout
    }

    pub fn zones(&self) -> u32 {
        self.layout.zones()
    }

    pub fn zone(&self) -> u32 {
        self.zone
    }

    /// Current interior id, `0` when outside.
    pub fn interior(&self) -> u8 {
        self.interior
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Viewport extent along the axis of `direction`.
    pub fn span(&self, direction: Direction) -> i32 {
        let (width, height) = self.viewport;
        let span = if direction.is_vertical() { height } else { width };
        i32::try_from(span).unwrap_or(i32::MAX)
    }

    pub fn palette(&self) -> &MaskPalette {
        &self.palette
    }

    pub fn mask(&self) -> &Bitmap {
        &self.current.mask
    }

    pub fn texture(&self) -> &Bitmap {
        &self.current.texture
    }

    pub fn entry_areas(&self) -> &[EntryArea] {
        &self.current.entry_areas
    }

    pub fn entry_area(&self, id: u8) -> Option<&EntryArea> {
        self.current.entry_areas.iter().find(|area| area.id == id)
    }

    /// First entry area overlapping `rect`.
    pub fn entry_at(&self, rect: &Rect) -> Option<&EntryArea> {
        self.current
            .entry_areas
            .iter()
            .find(|area| area.rect.intersects(rect))
    }

    /// Solid-mask lookup; pixels outside the mask count as solid.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.current
            .mask
            .pixel(x, y)
            .is_none_or(|color| color == self.palette.solid)
    }

    pub fn has_interior(&self, zone: u32, entry: u8) -> bool {
        self.interiors.contains_key(&(zone, entry))
    }

    /// Materializes `zone` (leaving any interior).
    pub fn set_zone(&mut self, zone: u32) -> Result<(), MapError> {
        let next = self.materialize_zone(zone)?;
        self.current = next;
        self.zone = zone;
        self.interior = 0;
        tracing::debug!(map = %self.name, zone, "zone materialized");
        Ok(())
    }

    /// Enters interior `number` of the current zone, or returns outside for `0`.
    pub fn set_interior(&mut self, number: u8) -> Result<(), MapError> {
        let next = if number == 0 {
            self.materialize_zone(self.zone)?
        } else {
            let (mask, texture) =
                self.interiors
                    .get(&(self.zone, number))
                    .ok_or(MapError::MissingInterior {
                        zone: self.zone,
                        interior: number,
                    })?;
            self.materialize(mask.clone(), texture.clone())
        };
        self.current = next;
        self.interior = number;
        tracing::debug!(map = %self.name, zone = self.zone, interior = number, "interior materialized");
        Ok(())
    }

    fn materialize_zone(&self, zone: u32) -> Result<Materialized, MapError> {
        let out_of_range = MapError::ZoneOutOfRange {
            zone,
            zones: self.layout.zones(),
        };
        let (x, y) = self
            .layout
            .origin(zone, self.viewport)
            .ok_or(out_of_range.clone())?;
        let (width, height) = self.viewport;
        let mask = self
            .full_mask
            .crop(x, y, width, height)
            .ok_or(out_of_range.clone())?;
        let texture = self
            .full_texture
            .crop(x, y, width, height)
            .ok_or(out_of_range)?;
        Ok(self.materialize(mask, texture))
    }

    fn materialize(&self, mask: Bitmap, texture: Bitmap) -> Materialized {
        let entry_areas = scan_entry_areas(&mask, &self.palette, self.entry_cell);
        Materialized {
            mask,
            texture,
            entry_areas,
        }
    }
}
