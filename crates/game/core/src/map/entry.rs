use crate::geometry::Rect;

use super::{Bitmap, MaskPalette};

/// Rectangle of the mask from which a unit may enter an interior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryArea {
    pub rect: Rect,
    /// 1-based id, numbered in scan order.
    pub id: u8,
}

/// Scans the mask for entry strips.
///
/// Rows of `cell` pixels are visited from the bottom of the mask upwards and
/// each row left to right. A strip starts where the pixel one column into the
/// cell carries the entry colour; it spans one, two or three cells depending on
/// how far the colour continues. Scanning stops once 255 strips are numbered.
pub fn scan_entry_areas(mask: &Bitmap, palette: &MaskPalette, cell: u32) -> Vec<EntryArea> {
    let mut areas = Vec::new();
    if cell == 0 || mask.height() < cell {
        return areas;
    }

    let step = cell as i32;
    let is_entry = |x: i32, y: i32| mask.pixel(x, y) == Some(palette.entry);
    let mut y = (mask.height() - cell) as i32;

    while y >= 0 {
        let mut x = 0;
        while x < mask.width() as i32 {
            if is_entry(x + 1, y) {
                let cells = if is_entry(x + 2 * step + 1, y) {
                    3
                } else if is_entry(x + step + 1, y) {
                    2
                } else {
                    1
                };
                let width = cells * cell;
                let Ok(id) = u8::try_from(areas.len() + 1) else {
                    tracing::warn!(limit = u8::MAX, "entry strips past the id range ignored");
                    return areas;
                };
                areas.push(EntryArea {
                    rect: Rect::new(x, y, width, cell),
                    id,
                });
                x += width as i32;
            } else {
                x += step;
            }
        }
        y -= step;
    }

    areas
}
