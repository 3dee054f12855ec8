use crate::geometry::Rect;

use super::MapError;

/// 24-bit colour as stored in mask and texture images.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
}

/// Reserved colours of the solid mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskPalette {
    /// Impassable terrain.
    pub solid: Rgb,
    /// Building entry strips.
    pub entry: Rgb,
}

impl Default for MaskPalette {
    fn default() -> Self {
        Self {
            solid: Rgb::BLUE,
            entry: Rgb::RED,
        }
    }
}

/// Owned row-major RGB image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Bitmap {
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self, MapError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(MapError::PixelCount {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Colour at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = color;
                true
            }
            None => false,
        }
    }

    /// Paints the part of `rect` that lies inside the image.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Copies a `width × height` window starting at `(x, y)`.
    ///
    /// Returns `None` when the window does not fit inside the image.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Bitmap> {
        if x.checked_add(width)? > self.width || y.checked_add(height)? > self.height {
            return None;
        }
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for row in y..y + height {
            let start = row as usize * self.width as usize + x as usize;
            pixels.extend_from_slice(&self.pixels[start..start + width as usize]);
        }
        Some(Bitmap {
            width,
            height,
            pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_are_none() {
        let bitmap = Bitmap::filled(4, 4, Rgb::BLACK);
        assert_eq!(bitmap.pixel(-1, 0), None);
        assert_eq!(bitmap.pixel(0, 4), None);
        assert_eq!(bitmap.pixel(3, 3), Some(Rgb::BLACK));
    }

    #[test]
    fn crop_copies_window() {
        let mut bitmap = Bitmap::filled(8, 8, Rgb::BLACK);
        bitmap.set_pixel(5, 6, Rgb::RED);
        let window = bitmap.crop(4, 4, 4, 4).unwrap();
        assert_eq!(window.pixel(1, 2), Some(Rgb::RED));
        assert!(bitmap.crop(6, 0, 4, 4).is_none());
    }

    #[test]
    fn pixel_count_is_validated() {
        assert!(matches!(
            Bitmap::from_pixels(2, 2, vec![Rgb::BLACK; 3]),
            Err(MapError::PixelCount {
                expected: 4,
                actual: 3
            })
        ));
    }
}
