use crate::config::{GameConfig, ObstructionOffset};
use crate::geometry::{Direction, Rect};
use crate::map::MapView;
use crate::state::{Roster, Unit};

/// Admissibility checks for axis-aligned moves on the current map view.
#[derive(Clone, Copy)]
pub struct Collision<'a> {
    map: &'a MapView,
    roster: &'a Roster,
    offset: ObstructionOffset,
}

impl<'a> Collision<'a> {
    pub fn new(map: &'a MapView, roster: &'a Roster, config: &GameConfig) -> Self {
        Self {
            map,
            roster,
            offset: config.obstruction_offset,
        }
    }

    /// True when `unit` may travel `distance` pixels towards `direction`.
    ///
    /// The unit's rectangle translated by `distance` must not overlap any
    /// other unit or object, and the mask band swept by its leading edge must
    /// not be obstructed. A distance longer than the viewport along the axis
    /// of motion always leaves the mask and is refused without sampling.
    pub fn can_move(&self, unit: &Unit, distance: i32, direction: Direction) -> bool {
        if !direction.is_cardinal() || distance > self.map.span(direction) {
            return false;
        }
        let swept = unit.rect.translated(direction, distance);
        self.is_clear_of_obstacles(unit, &swept)
            && self.is_clear_of_terrain(&unit.rect, distance, direction)
    }

    pub fn is_clear_of_obstacles(&self, unit: &Unit, swept: &Rect) -> bool {
        !self
            .roster
            .obstacles_for(unit.id)
            .any(|obstacle| obstacle.intersects(swept))
    }

    /// Two-point mask test over the band in front of `rect`.
    ///
    /// A pixel of the band blocks only if it is solid and the pixel
    /// `offset(height)` rows below it (shifted back by `distance` when moving
    /// up) is solid as well. Samples outside the mask count as solid.
    pub fn is_clear_of_terrain(&self, rect: &Rect, distance: i32, direction: Direction) -> bool {
        let offset = self.offset.of(rect.height);
        let blocked =
            |x: i32, y: i32, lower: i32| self.map.is_solid(x, y) && self.map.is_solid(x, lower);

        match direction {
            Direction::Up => !(rect.y.saturating_sub(distance)..rect.y).any(|y| {
                (rect.x..rect.right())
                    .any(|x| blocked(x, y, y.saturating_add(offset).saturating_sub(distance)))
            }),
            Direction::Down => !(rect.bottom()..rect.bottom().saturating_add(distance)).any(|y| {
                (rect.x..rect.right()).any(|x| blocked(x, y, y.saturating_add(offset)))
            }),
            Direction::Left => !(rect.y..rect.bottom()).any(|y| {
                (rect.x.saturating_sub(distance)..rect.x)
                    .any(|x| blocked(x, y, y.saturating_add(offset)))
            }),
            Direction::Right => !(rect.y..rect.bottom()).any(|y| {
                (rect.right()..rect.right().saturating_add(distance))
                    .any(|x| blocked(x, y, y.saturating_add(offset)))
            }),
            Direction::Idle => false,
        }
    }
}
