use crate::config::GameConfig;
use crate::geometry::{Direction, Edge};
use crate::map::{MapError, MapView};
use crate::state::{Capabilities, Roster, Unit, UnitId};

use super::{Collision, MoveError};

/// Result of a single movement request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The unit advanced by its speed.
    Moved,
    /// The way was blocked; the unit only turned.
    Bumped,
}

/// A zone change triggered by the player reaching a viewport edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneCrossing {
    pub from: u32,
    pub to: u32,
    pub edge: Edge,
}

/// Result of a player walk key in free movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkOutcome {
    Moved,
    Bumped,
    EnteredBuilding(u8),
    LeftBuilding(u8),
    CrossedZone(ZoneCrossing),
}

impl WalkOutcome {
    /// True when the visible location changed and zone-scoped content must reload.
    pub fn changes_location(&self) -> bool {
        matches!(
            self,
            WalkOutcome::EnteredBuilding(_)
                | WalkOutcome::LeftBuilding(_)
                | WalkOutcome::CrossedZone(_)
        )
    }
}

fn movable(roster: &Roster, id: UnitId, direction: Direction) -> Result<&Unit, MoveError> {
    let unit = roster.unit(id).ok_or(MoveError::UnitNotFound(id))?;
    if !unit.can(Capabilities::MOVABLE) {
        return Err(MoveError::NotMovable(id));
    }
    if !direction.is_cardinal() {
        return Err(MoveError::InvalidDirection(direction));
    }
    Ok(unit)
}

/// Moves a unit one speed-step, or turns it in place when blocked.
pub fn move_unit(
    map: &MapView,
    roster: &mut Roster,
    config: &GameConfig,
    id: UnitId,
    direction: Direction,
) -> Result<StepOutcome, MoveError> {
    let unit = movable(roster, id, direction)?;
    let speed = unit.stride();
    let admissible = Collision::new(map, roster, config).can_move(unit, speed, direction);

    let unit = roster.unit_mut(id).ok_or(MoveError::UnitNotFound(id))?;
    if admissible {
        unit.step(direction, speed);
        Ok(StepOutcome::Moved)
    } else {
        unit.turn(direction);
        Ok(StepOutcome::Bumped)
    }
}

/// Handles one walk key for the player.
///
/// Walking up into an entry strip enters the building behind it; walking down
/// onto the entry strip of an interior leaves it. Any other admissible step
/// moves the player, after which the viewport edges are checked for a zone
/// crossing.
pub fn walk_player(
    map: &mut MapView,
    roster: &mut Roster,
    config: &GameConfig,
    direction: Direction,
) -> Result<WalkOutcome, MoveError> {
    let id = roster.player_id().ok_or(MoveError::NoPlayer)?;
    let unit = movable(roster, id, direction)?;
    let speed = unit.stride();
    let admissible = Collision::new(map, roster, config).can_move(unit, speed, direction);
    let unit = roster.player_mut().ok_or(MoveError::UnitNotFound(id))?;

    if !admissible {
        unit.turn(direction);
        return Ok(WalkOutcome::Bumped);
    }

    match direction {
        Direction::Up if map.interior() == 0 => {
            if let Some(entry) = enter_building(map, unit)? {
                return Ok(WalkOutcome::EnteredBuilding(entry));
            }
        }
        Direction::Down if map.interior() != 0 => {
            if let Some(entry) = leave_building(map, unit)? {
                return Ok(WalkOutcome::LeftBuilding(entry));
            }
        }
        _ => {}
    }

    unit.step(direction, speed);
    match cross_zone_edge(map, unit, config)? {
        Some(crossing) => Ok(WalkOutcome::CrossedZone(crossing)),
        None => Ok(WalkOutcome::Moved),
    }
}

/// Switches zone when `unit` is within the edge margin of a viewport edge
/// that has a neighbouring zone.
///
/// The unit is placed at the mirror edge of the new zone, offset by its
/// speed, which puts it outside every margin: a unit resting on a boundary
/// crosses once.
pub fn cross_zone_edge(
    map: &mut MapView,
    unit: &mut Unit,
    config: &GameConfig,
) -> Result<Option<ZoneCrossing>, MapError> {
    if map.interior() != 0 {
        return Ok(None);
    }

    let (width, height) = (config.viewport_width as i32, config.viewport_height as i32);
    let margin = config.edge_margin;
    let speed = unit.stride();
    let rect = unit.rect;

    let candidates = [
        (Edge::Right, rect.right() + margin > width),
        (Edge::Left, rect.x - margin < 0),
        (Edge::Bottom, rect.bottom() + margin > height),
        (Edge::Top, rect.y - margin < 0),
    ];

    // Only the first edge reached counts, even when it has no neighbour.
    let from = map.zone();
    let Some((edge, to)) = candidates
        .into_iter()
        .find(|(_, reached)| *reached)
        .and_then(|(edge, _)| map.layout().neighbor(from, edge).map(|to| (edge, to)))
    else {
        return Ok(None);
    };

    map.set_zone(to)?;
    match edge {
        Edge::Right => unit.rect.x = speed + margin,
        Edge::Left => unit.rect.x = width - (speed + rect.width as i32 + margin),
        Edge::Bottom => unit.rect.y = speed + margin,
        Edge::Top => unit.rect.y = height - (speed + rect.height as i32 + margin),
    }
    tracing::debug!(from, to, %edge, "zone crossed");
    Ok(Some(ZoneCrossing { from, to, edge }))
}

/// Enters the building whose entry strip `unit` overlaps.
///
/// The unit is centred horizontally on the strip, just above it.
pub fn enter_building(map: &mut MapView, unit: &mut Unit) -> Result<Option<u8>, MapError> {
    let Some(area) = map.entry_at(&unit.rect).copied() else {
        return Ok(None);
    };
    map.set_interior(area.id)?;
    unit.place(
        area.rect.center_x() - (unit.rect.width / 2) as i32,
        area.rect.y - unit.rect.height as i32,
    );
    tracing::debug!(entry = area.id, "building entered");
    Ok(Some(area.id))
}

/// Leaves the current interior when `unit` stands on one of its entry strips.
///
/// The unit reappears centred below the exterior strip it came in through.
pub fn leave_building(map: &mut MapView, unit: &mut Unit) -> Result<Option<u8>, MapError> {
    let entry = map.interior();
    if entry == 0 || map.entry_at(&unit.rect).is_none() {
        return Ok(None);
    }
    map.set_interior(0)?;
    if let Some(area) = map.entry_area(entry) {
        unit.place(
            area.rect.center_x() - (unit.rect.width / 2) as i32,
            area.rect.y + unit.rect.height as i32,
        );
    }
    tracing::debug!(entry, "building left");
    Ok(Some(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::map::{Bitmap, InteriorBlueprint, MapBlueprint, Rgb};
    use crate::state::UnitKind;

    fn quad_view(config: &GameConfig) -> MapView {
        let (w, h) = (config.viewport_width, config.viewport_height);
        let mask = Bitmap::filled(w * 2, h * 2, Rgb::BLACK);
        let texture = Bitmap::filled(w * 2, h * 2, Rgb::GREEN);
        MapView::new(MapBlueprint::new("island", mask, texture, 1), config).unwrap()
    }

    fn roster_with_player(x: i32, y: i32, speed: u32) -> Roster {
        let mut roster = Roster::new();
        let id = roster.allocate_unit_id().unwrap();
        let mut unit = Unit::new(id, "Hero", UnitKind::Human, 32, 48);
        unit.place(x, y);
        unit.speed = speed;
        roster.insert_unit(unit).unwrap();
        roster.promote_to_player(id).unwrap();
        roster
    }

    #[test]
    fn walking_down_off_zone_one_reaches_zone_three_once() {
        let config = GameConfig::default();
        let mut map = quad_view(&config);
        let mut roster = roster_with_player(500, 700, 4);

        let mut crossings = 0;
        for _ in 0..40 {
            let outcome = walk_player(&mut map, &mut roster, &config, Direction::Down).unwrap();
            if let WalkOutcome::CrossedZone(crossing) = outcome {
                crossings += 1;
                assert_eq!(crossing.from, 1);
                assert_eq!(crossing.to, 3);
                assert_eq!(roster.player().unwrap().rect.y, 4 + 16);
                break;
            }
        }
        assert_eq!(crossings, 1);
        assert_eq!(map.zone(), 3);
    }

    #[test]
    fn resting_on_boundary_crosses_exactly_once() {
        let config = GameConfig::default();
        let mut map = quad_view(&config);
        let mut roster = roster_with_player(500, 768 - 48 - 16 + 1, 4);

        let mut crossings = 0;
        for _ in 0..10 {
            let unit = roster.player_mut().unwrap();
            if cross_zone_edge(&mut map, unit, &config).unwrap().is_some() {
                crossings += 1;
            }
        }
        assert_eq!(crossings, 1);
        assert_eq!(map.zone(), 3);
    }

    #[test]
    fn edges_without_neighbours_do_not_cross() {
        let config = GameConfig::default();
        let mut map = quad_view(&config);
        let mut roster = roster_with_player(4, 300, 2);
        let unit = roster.player_mut().unwrap();
        assert_eq!(cross_zone_edge(&mut map, unit, &config).unwrap(), None);
        assert_eq!(map.zone(), 1);
    }

    #[test]
    fn left_edge_places_unit_at_mirror_edge() {
        let config = GameConfig::default();
        let mut map = quad_view(&config);
        map.set_zone(2).unwrap();
        let mut roster = roster_with_player(10, 300, 2);
        let unit = roster.player_mut().unwrap();
        let crossing = cross_zone_edge(&mut map, unit, &config).unwrap().unwrap();
        assert_eq!((crossing.to, crossing.edge), (1, Edge::Left));
        assert_eq!(unit.rect.x, 1024 - (2 + 32 + 16));
    }

    #[test]
    fn blocked_walk_turns_without_moving() {
        let config = GameConfig::default().with_viewport(64, 48);
        let mask = Bitmap::filled(64, 48, Rgb::BLUE);
        let texture = Bitmap::filled(64, 48, Rgb::BLACK);
        let mut map = MapView::new(MapBlueprint::new("cave", mask, texture, 1), &config).unwrap();
        let mut roster = Roster::new();
        let id = roster.allocate_unit_id().unwrap();
        let mut unit = Unit::new(id, "Hero", UnitKind::Human, 8, 12);
        unit.place(20, 20);
        roster.insert_unit(unit).unwrap();
        roster.promote_to_player(id).unwrap();

        let outcome = walk_player(&mut map, &mut roster, &config, Direction::Left).unwrap();
        assert_eq!(outcome, WalkOutcome::Bumped);
        let player = roster.player().unwrap();
        assert_eq!((player.rect.x, player.facing), (20, Direction::Left));
    }

    #[test]
    fn entering_and_leaving_a_building() {
        let config = GameConfig::default().with_viewport(128, 96);
        let mut mask = Bitmap::filled(128, 96, Rgb::BLACK);
        mask.fill_rect(Rect::new(48, 48, 32, 16), Rgb::RED);
        let mut interior_mask = Bitmap::filled(128, 96, Rgb::BLACK);
        interior_mask.fill_rect(Rect::new(48, 80, 32, 16), Rgb::RED);
        let blueprint = MapBlueprint::new("town", mask, Bitmap::filled(128, 96, Rgb::GREEN), 1)
            .with_interior(InteriorBlueprint {
                zone: 1,
                entry: 1,
                mask: interior_mask,
                texture: Bitmap::filled(128, 96, Rgb::BLACK),
            });
        let mut map = MapView::new(blueprint, &config).unwrap();

        let mut roster = Roster::new();
        let id = roster.allocate_unit_id().unwrap();
        let mut unit = Unit::new(id, "Hero", UnitKind::Human, 8, 12);
        unit.place(56, 60);
        roster.insert_unit(unit).unwrap();
        roster.promote_to_player(id).unwrap();

        let entered = walk_player(&mut map, &mut roster, &config, Direction::Up).unwrap();
        assert_eq!(entered, WalkOutcome::EnteredBuilding(1));
        assert_eq!(map.interior(), 1);
        let player = roster.player().unwrap();
        assert_eq!((player.rect.x, player.rect.y), (64 - 4, 48 - 12));

        roster.player_mut().unwrap().place(56, 70);
        let left = walk_player(&mut map, &mut roster, &config, Direction::Down).unwrap();
        assert_eq!(left, WalkOutcome::LeftBuilding(1));
        assert_eq!(map.interior(), 0);
        let player = roster.player().unwrap();
        assert_eq!((player.rect.x, player.rect.y), (60, 48 + 12));
    }

    #[test]
    fn missing_interior_keeps_player_outside() {
        let config = GameConfig::default().with_viewport(128, 96);
        let mut mask = Bitmap::filled(128, 96, Rgb::BLACK);
        mask.fill_rect(Rect::new(48, 48, 32, 16), Rgb::RED);
        let blueprint = MapBlueprint::new("town", mask, Bitmap::filled(128, 96, Rgb::GREEN), 1);
        let mut map = MapView::new(blueprint, &config).unwrap();
        let mut roster = roster_with_player(56, 60, 2);
        roster.player_mut().unwrap().rect = Rect::new(56, 60, 8, 12);

        let result = walk_player(&mut map, &mut roster, &config, Direction::Up);
        assert!(matches!(
            result,
            Err(MoveError::Map(MapError::MissingInterior { zone: 1, interior: 1 }))
        ));
        assert_eq!(map.interior(), 0);
        assert_eq!(roster.player().unwrap().rect.y, 60);
    }

    #[test]
    fn move_unit_reports_bumps() {
        let config = GameConfig::default().with_viewport(64, 48);
        let map = MapView::new(
            MapBlueprint::new(
                "field",
                Bitmap::filled(64, 48, Rgb::BLACK),
                Bitmap::filled(64, 48, Rgb::BLACK),
                1,
            ),
            &config,
        )
        .unwrap();
        let mut roster = Roster::new();
        let id = roster.allocate_unit_id().unwrap();
        let mut unit = Unit::new(id, "Nestor", UnitKind::Human, 8, 12);
        unit.place(0, 20);
        roster.insert_unit(unit).unwrap();

        assert_eq!(
            move_unit(&map, &mut roster, &config, id, Direction::Right).unwrap(),
            StepOutcome::Moved
        );
        assert_eq!(roster.unit(id).unwrap().rect.x, 2);
        assert_eq!(
            move_unit(&map, &mut roster, &config, id, Direction::Up).unwrap(),
            StepOutcome::Moved
        );
        roster.unit_mut(id).unwrap().place(0, 20);
        assert_eq!(
            move_unit(&map, &mut roster, &config, id, Direction::Left).unwrap(),
            StepOutcome::Bumped
        );
        assert!(matches!(
            move_unit(&map, &mut roster, &config, UnitId(99), Direction::Left),
            Err(MoveError::UnitNotFound(UnitId(99)))
        ));
    }
}
