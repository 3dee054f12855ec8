//! Pixel-space primitives shared by the map, movement and interface code.

use strum::{Display, EnumIter};

/// Axis-aligned rectangle in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> i32 {
        self.x.saturating_add(extent(self.width))
    }

    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(extent(self.height))
    }

    pub const fn center_x(&self) -> i32 {
        self.x.saturating_add((self.width / 2) as i32)
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Copy of this rectangle moved `distance` pixels along one axis.
    ///
    /// Coordinates saturate at the `i32` bounds.
    #[must_use]
    pub fn translated(&self, direction: Direction, distance: i32) -> Rect {
        let (dx, dy) = direction.delta();
        Rect {
            x: self.x.saturating_add(dx.saturating_mul(distance)),
            y: self.y.saturating_add(dy.saturating_mul(distance)),
            ..*self
        }
    }

    /// True when the whole rectangle lies inside a `width` x `height` viewport.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && i64::from(self.x) + i64::from(self.width) <= i64::from(width)
            && i64::from(self.y) + i64::from(self.height) <= i64::from(height)
    }
}

const fn extent(length: u32) -> i32 {
    if length > i32::MAX as u32 {
        i32::MAX
    } else {
        length as i32
    }
}

/// Facing/travel direction of a unit. Motion is always axis-aligned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
    Idle,
}

impl Direction {
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in screen coordinates (y grows downwards).
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Idle => (0, 0),
        }
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub const fn is_cardinal(self) -> bool {
        !matches!(self, Direction::Idle)
    }

    /// Spritesheet row used for this facing.
    pub const fn sprite_row(self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Down | Direction::Idle => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// Viewport edge crossed by a unit leaving the current zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}
