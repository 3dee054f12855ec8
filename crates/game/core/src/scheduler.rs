//! Multi-tick unit movements.
//!
//! Each pending move advances its unit by at most one speed-step per tick
//! until the target coordinate on the axis of motion is reached. A blocked
//! step ends the move for good; nothing is retried.

use crate::config::GameConfig;
use crate::geometry::{Direction, Rect};
use crate::map::MapView;
use crate::movement::{Collision, MoveError};
use crate::state::{Capabilities, Roster, Unit, UnitId};

/// A queued translation in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingMove {
    pub unit: UnitId,
    pub direction: Direction,
    /// Coordinate on the axis of motion where the move ends.
    pub target: i32,
}

impl PendingMove {
    /// Pixels still to travel; zero or negative once the target is reached or passed.
    pub fn remaining(&self, rect: &Rect) -> i32 {
        match self.direction {
            Direction::Up => rect.y - self.target,
            Direction::Down => self.target - rect.y,
            Direction::Left => rect.x - self.target,
            Direction::Right => self.target - rect.x,
            Direction::Idle => 0,
        }
    }

    fn snap(&self, unit: &mut Unit) {
        if self.direction.is_vertical() {
            unit.rect.y = self.target;
        } else {
            unit.rect.x = self.target;
        }
    }
}

/// Why a pending move left the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveEnd {
    Arrived,
    Blocked,
    /// The unit is no longer on the map.
    Vanished,
}

/// What a single scheduler pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub stepped: Vec<UnitId>,
    pub finished: Vec<(UnitId, MoveEnd)>,
}

struct Proposal {
    index: usize,
    step: i32,
    remaining: i32,
    swept: Rect,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveScheduler {
    pending: Vec<PendingMove>,
}

impl MoveScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[PendingMove] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_moving(&self, unit: UnitId) -> bool {
        self.pending.iter().any(|pending| pending.unit == unit)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Drops the move of `unit`, if any.
    pub fn cancel(&mut self, unit: UnitId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|pending| pending.unit != unit);
        before != self.pending.len()
    }

    /// Queues a move of `distance` pixels.
    ///
    /// The full distance must be admissible from the unit's current position;
    /// a move issued for a unit that is already moving replaces the old one.
    pub fn schedule(
        &mut self,
        map: &MapView,
        roster: &Roster,
        config: &GameConfig,
        id: UnitId,
        direction: Direction,
        distance: i32,
    ) -> Result<PendingMove, MoveError> {
        let unit = roster.unit(id).ok_or(MoveError::UnitNotFound(id))?;
        if !unit.can(Capabilities::MOVABLE) {
            return Err(MoveError::NotMovable(id));
        }
        if !direction.is_cardinal() {
            return Err(MoveError::InvalidDirection(direction));
        }
        if distance <= 0 {
            return Err(MoveError::ZeroDistance);
        }
        if distance > map.span(direction) {
            return Err(MoveError::OutOfRange {
                unit: id,
                distance,
                direction,
            });
        }
        if !Collision::new(map, roster, config).can_move(unit, distance, direction) {
            return Err(MoveError::Blocked {
                unit: id,
                distance,
                direction,
            });
        }

        let (dx, dy) = direction.delta();
        let target = if direction.is_vertical() {
            unit.rect.y + dy * distance
        } else {
            unit.rect.x + dx * distance
        };
        let pending = PendingMove {
            unit: id,
            direction,
            target,
        };
        self.cancel(id);
        self.pending.push(pending);
        Ok(pending)
    }

    /// Advances every pending move by one step.
    ///
    /// Steps are proposed against the positions at the start of the tick.
    /// Proposals whose swept rectangles overlap each other are all rejected,
    /// so two units never end a tick sharing space.
    pub fn tick(&mut self, map: &MapView, roster: &mut Roster, config: &GameConfig) -> TickReport {
        let mut report = TickReport::default();
        let mut ended: Vec<(usize, MoveEnd)> = Vec::new();
        let mut proposals: Vec<Proposal> = Vec::new();

        {
            let collision = Collision::new(map, roster, config);
            for (index, pending) in self.pending.iter().enumerate() {
                let Some(unit) = roster.unit(pending.unit) else {
                    ended.push((index, MoveEnd::Vanished));
                    continue;
                };
                let remaining = pending.remaining(&unit.rect);
                if remaining <= 0 {
                    ended.push((index, MoveEnd::Arrived));
                    continue;
                }
                let step = unit.stride().min(remaining);
                if step <= 0 || !collision.can_move(unit, step, pending.direction) {
                    ended.push((index, MoveEnd::Blocked));
                    continue;
                }
                proposals.push(Proposal {
                    index,
                    step,
                    remaining,
                    swept: unit.rect.translated(pending.direction, step),
                });
            }
        }

        let contested: Vec<bool> = proposals
            .iter()
            .enumerate()
            .map(|(i, proposal)| {
                proposals
                    .iter()
                    .enumerate()
                    .any(|(j, other)| i != j && proposal.swept.intersects(&other.swept))
            })
            .collect();

        for (proposal, contested) in proposals.iter().zip(contested) {
            if contested {
                ended.push((proposal.index, MoveEnd::Blocked));
                continue;
            }
            let pending = self.pending[proposal.index];
            let Some(unit) = roster.unit_mut(pending.unit) else {
                ended.push((proposal.index, MoveEnd::Vanished));
                continue;
            };
            unit.step(pending.direction, proposal.step);
            report.stepped.push(pending.unit);
            if proposal.step == proposal.remaining {
                ended.push((proposal.index, MoveEnd::Arrived));
            }
        }

        for &(index, end) in &ended {
            let pending = self.pending[index];
            if let Some(unit) = roster.unit_mut(pending.unit) {
                if end == MoveEnd::Arrived {
                    pending.snap(unit);
                }
                unit.stop();
            }
            tracing::debug!(unit = %pending.unit, ?end, "pending move finished");
            report.finished.push((pending.unit, end));
        }

        let mut index = 0;
        self.pending.retain(|_| {
            let keep = !ended.iter().any(|(ended, _)| *ended == index);
            index += 1;
            keep
        });
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Bitmap, MapBlueprint, Rgb};
    use crate::state::{Item, ItemKind, UnitKind, WalkAnimation};

    fn config() -> GameConfig {
        GameConfig::default().with_viewport(128, 96)
    }

    fn open_map(solid: Option<Rect>) -> MapView {
        let mut mask = Bitmap::filled(128, 96, Rgb::BLACK);
        if let Some(rect) = solid {
            mask.fill_rect(rect, Rgb::BLUE);
        }
        let texture = Bitmap::filled(128, 96, Rgb::GREEN);
        MapView::new(MapBlueprint::new("field", mask, texture, 1), &config()).unwrap()
    }

    fn spawn(roster: &mut Roster, name: &str, x: i32, y: i32, speed: u32) -> UnitId {
        let id = roster.allocate_unit_id().unwrap();
        let mut unit = Unit::new(id, name, UnitKind::Human, 8, 12);
        unit.place(x, y);
        unit.speed = speed;
        roster.insert_unit(unit).unwrap()
    }

    fn run_until_idle(
        scheduler: &mut MoveScheduler,
        map: &MapView,
        roster: &mut Roster,
    ) -> (usize, Vec<(UnitId, MoveEnd)>) {
        let mut ticks = 0;
        let mut finished = Vec::new();
        while !scheduler.is_empty() && ticks < 1000 {
            finished.extend(scheduler.tick(map, roster, &config()).finished);
            ticks += 1;
        }
        (ticks, finished)
    }

    #[test]
    fn distances_longer_than_the_viewport_are_out_of_range() {
        let map = open_map(None);
        let mut roster = Roster::new();
        let id = spawn(&mut roster, "Nestor", 10, 10, 2);
        let mut scheduler = MoveScheduler::new();

        for (direction, distance) in [(Direction::Right, 129), (Direction::Down, i32::MAX)] {
            assert_eq!(
                scheduler.schedule(&map, &roster, &config(), id, direction, distance),
                Err(MoveError::OutOfRange {
                    unit: id,
                    distance,
                    direction,
                })
            );
        }
        assert!(scheduler.is_empty());
    }

    #[test]
    fn moves_finish_within_ceil_of_distance_over_speed() {
        let map = open_map(None);
        for (distance, speed) in [(10, 3), (9, 3), (1, 4), (40, 2), (7, 7)] {
            let mut roster = Roster::new();
            let id = spawn(&mut roster, "Nestor", 10, 10, speed);
            let mut scheduler = MoveScheduler::new();
            scheduler
                .schedule(&map, &roster, &config(), id, Direction::Right, distance)
                .unwrap();

            let (ticks, finished) = run_until_idle(&mut scheduler, &map, &mut roster);
            let bound = (distance as u32).div_ceil(speed) as usize;
            assert!(ticks <= bound, "{distance}/{speed}: {ticks} > {bound}");
            assert_eq!(finished, vec![(id, MoveEnd::Arrived)]);
            let unit = roster.unit(id).unwrap();
            assert_eq!(unit.rect.x, 10 + distance);
            assert_eq!(unit.animation.column(), WalkAnimation::NEUTRAL);
        }
    }

    #[test]
    fn upward_moves_land_exactly_on_target() {
        let map = open_map(None);
        let mut roster = Roster::new();
        let id = spawn(&mut roster, "Nestor", 10, 60, 4);
        let mut scheduler = MoveScheduler::new();
        let pending = scheduler
            .schedule(&map, &roster, &config(), id, Direction::Up, 10)
            .unwrap();
        assert_eq!(pending.target, 50);

        let (ticks, _) = run_until_idle(&mut scheduler, &map, &mut roster);
        assert_eq!(ticks, 3);
        assert_eq!(roster.unit(id).unwrap().rect.y, 50);
    }

    #[test]
    fn blocked_step_is_terminal() {
        let map = open_map(None);
        let mut roster = Roster::new();
        let id = spawn(&mut roster, "Nestor", 10, 10, 2);
        let mut scheduler = MoveScheduler::new();
        scheduler
            .schedule(&map, &roster, &config(), id, Direction::Right, 20)
            .unwrap();
        scheduler.tick(&map, &mut roster, &config());

        // a crate dropped in the way after the move was issued
        roster
            .insert_object(Rect::new(21, 10, 8, 8), Item::new(ItemKind::Jewel), true)
            .unwrap();

        let (ticks, finished) = run_until_idle(&mut scheduler, &map, &mut roster);
        assert!(ticks < 10);
        assert_eq!(finished, vec![(id, MoveEnd::Blocked)]);
        assert_eq!(roster.unit(id).unwrap().rect.x, 12);
    }

    #[test]
    fn issue_time_validation_covers_the_full_distance() {
        let map = open_map(Some(Rect::new(40, 0, 16, 96)));
        let mut roster = Roster::new();
        let id = spawn(&mut roster, "Nestor", 10, 10, 2);
        let mut scheduler = MoveScheduler::new();

        assert!(matches!(
            scheduler.schedule(&map, &roster, &config(), id, Direction::Right, 30),
            Err(MoveError::Blocked { distance: 30, .. })
        ));
        assert!(scheduler.is_empty());
        assert_eq!(
            scheduler.schedule(&map, &roster, &config(), id, Direction::Right, 0),
            Err(MoveError::ZeroDistance)
        );
        assert_eq!(
            scheduler.schedule(&map, &roster, &config(), UnitId(42), Direction::Right, 4),
            Err(MoveError::UnitNotFound(UnitId(42)))
        );
    }

    #[test]
    fn mutually_overlapping_proposals_are_both_rejected() {
        let map = open_map(None);
        let mut roster = Roster::new();
        let left = spawn(&mut roster, "Castor", 10, 10, 4);
        let right = spawn(&mut roster, "Pollux", 24, 10, 4);
        let mut scheduler = MoveScheduler::new();
        scheduler
            .schedule(&map, &roster, &config(), left, Direction::Right, 4)
            .unwrap();
        scheduler
            .schedule(&map, &roster, &config(), right, Direction::Left, 4)
            .unwrap();

        let report = scheduler.tick(&map, &mut roster, &config());
        assert!(report.stepped.is_empty());
        assert_eq!(
            report.finished,
            vec![(left, MoveEnd::Blocked), (right, MoveEnd::Blocked)]
        );
        assert_eq!(roster.unit(left).unwrap().rect.x, 10);
        assert_eq!(roster.unit(right).unwrap().rect.x, 24);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn rescheduling_replaces_and_removed_units_vanish() {
        let map = open_map(None);
        let mut roster = Roster::new();
        let id = spawn(&mut roster, "Nestor", 10, 10, 2);
        let mut scheduler = MoveScheduler::new();
        scheduler
            .schedule(&map, &roster, &config(), id, Direction::Right, 20)
            .unwrap();
        scheduler
            .schedule(&map, &roster, &config(), id, Direction::Down, 20)
            .unwrap();
        assert_eq!(scheduler.pending().len(), 1);
        assert_eq!(scheduler.pending()[0].direction, Direction::Down);

        roster.remove_unit(id).unwrap();
        let report = scheduler.tick(&map, &mut roster, &config());
        assert_eq!(report.finished, vec![(id, MoveEnd::Vanished)]);
    }
}
