use crate::geometry::Rect;

use super::{Item, ObjectId, StateError, Unit, UnitId, WorldObject};

/// Live units and objects of the current map location.
///
/// The player unit is kept apart from the other units: quest reloads clear
/// NPCs and objects but never the player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    player: Option<Unit>,
    units: Vec<Unit>,
    objects: Vec<WorldObject>,
    next_unit_id: u32,
    next_object_id: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            next_unit_id: 1,
            next_object_id: 1,
            ..Self::default()
        }
    }

    /// Rebuilds a roster from restored parts; id counters continue past the highest id.
    pub fn from_parts(player: Option<Unit>, units: Vec<Unit>, objects: Vec<WorldObject>) -> Self {
        let next_unit_id = player
            .iter()
            .chain(units.iter())
            .map(|unit| unit.id.0)
            .max()
            .map_or(1, |id| id.saturating_add(1));
        let next_object_id = objects
            .iter()
            .map(|object| object.id.0)
            .max()
            .map_or(1, |id| id.saturating_add(1));
        Self {
            player,
            units,
            objects,
            next_unit_id,
            next_object_id,
        }
    }

    pub fn player(&self) -> Option<&Unit> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Unit> {
        self.player.as_mut()
    }

    pub fn player_id(&self) -> Option<UnitId> {
        self.player.as_ref().map(|unit| unit.id)
    }

    /// Non-player units in spawn order.
    pub fn npcs(&self) -> &[Unit] {
        &self.units
    }

    pub fn objects(&self) -> &[WorldObject] {
        &self.objects
    }

    /// Player first, then every other unit.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.player.iter().chain(self.units.iter())
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units().find(|unit| unit.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        if self.player.as_ref().is_some_and(|unit| unit.id == id) {
            return self.player.as_mut();
        }
        self.units.iter_mut().find(|unit| unit.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Unit> {
        self.units().find(|unit| unit.name == name)
    }

    pub fn object(&self, id: ObjectId) -> Option<&WorldObject> {
        self.objects.iter().find(|object| object.id == id)
    }

    pub fn find_object_by_tag(&self, tag: &str) -> Option<&WorldObject> {
        self.objects
            .iter()
            .find(|object| object.item.tag.as_deref() == Some(tag))
    }

    pub fn allocate_unit_id(&mut self) -> Result<UnitId, StateError> {
        let id = self.next_unit_id.max(1);
        self.next_unit_id = id.checked_add(1).ok_or(StateError::IdOverflow)?;
        Ok(UnitId(id))
    }

    /// Adds a non-player unit. Names are unique among live units.
    pub fn insert_unit(&mut self, unit: Unit) -> Result<UnitId, StateError> {
        if self.find_by_name(&unit.name).is_some() {
            return Err(StateError::UnitAlreadyPresent(unit.name));
        }
        let id = unit.id;
        self.units.push(unit);
        Ok(id)
    }

    pub fn remove_unit(&mut self, id: UnitId) -> Result<Unit, StateError> {
        let index = self
            .units
            .iter()
            .position(|unit| unit.id == id)
            .ok_or(StateError::UnitNotFound(id))?;
        Ok(self.units.remove(index))
    }

    /// Makes a placed unit the player, returning the previous player.
    pub fn promote_to_player(&mut self, id: UnitId) -> Result<Option<Unit>, StateError> {
        let unit = self.remove_unit(id)?;
        Ok(self.player.replace(unit))
    }

    pub fn set_player(&mut self, unit: Option<Unit>) {
        self.player = unit;
    }

    pub fn insert_object(
        &mut self,
        rect: Rect,
        item: Item,
        fixed: bool,
    ) -> Result<ObjectId, StateError> {
        let id = ObjectId(self.next_object_id.max(1));
        self.next_object_id = id.0.checked_add(1).ok_or(StateError::IdOverflow)?;
        self.objects.push(WorldObject {
            id,
            rect,
            item,
            fixed,
        });
        Ok(id)
    }

    pub fn remove_object(&mut self, id: ObjectId) -> Result<WorldObject, StateError> {
        let index = self
            .objects
            .iter()
            .position(|object| object.id == id)
            .ok_or(StateError::ObjectNotFound(id))?;
        Ok(self.objects.remove(index))
    }

    /// Rectangles a unit must not overlap: every other unit and every object.
    pub fn obstacles_for(&self, id: UnitId) -> impl Iterator<Item = Rect> + '_ {
        self.units()
            .filter(move |unit| unit.id != id)
            .map(|unit| unit.rect)
            .chain(self.objects.iter().map(|object| object.rect))
    }

    /// Drops NPCs and objects; the player stays.
    pub fn clear_location(&mut self) {
        self.units.clear();
        self.objects.clear();
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ItemKind, UnitKind};

    fn spawn(roster: &mut Roster, name: &str, x: i32) -> UnitId {
        let id = roster.allocate_unit_id().unwrap();
        let mut unit = Unit::new(id, name, UnitKind::Human, 32, 48);
        unit.place(x, 0);
        roster.insert_unit(unit).unwrap()
    }

    #[test]
    fn names_are_unique_among_live_units() {
        let mut roster = Roster::new();
        spawn(&mut roster, "Nestor", 0);
        let id = roster.allocate_unit_id().unwrap();
        let duplicate = Unit::new(id, "Nestor", UnitKind::Human, 32, 48);
        assert_eq!(
            roster.insert_unit(duplicate),
            Err(StateError::UnitAlreadyPresent("Nestor".into()))
        );
    }

    #[test]
    fn promotion_moves_unit_into_player_slot() {
        let mut roster = Roster::new();
        let hero = spawn(&mut roster, "Hero", 0);
        spawn(&mut roster, "Nestor", 100);

        assert_eq!(roster.promote_to_player(hero).unwrap(), None);
        assert_eq!(roster.player_id(), Some(hero));
        assert_eq!(roster.npcs().len(), 1);
        assert!(roster.unit(hero).is_some());

        roster.clear_location();
        assert_eq!(roster.player_id(), Some(hero));
        assert!(roster.npcs().is_empty());
    }

    #[test]
    fn restored_rosters_continue_id_allocation() {
        let mut roster = Roster::new();
        let hero = spawn(&mut roster, "Hero", 0);
        spawn(&mut roster, "Nestor", 100);
        roster.promote_to_player(hero).unwrap();

        let mut restored = Roster::from_parts(
            roster.player().cloned(),
            roster.npcs().to_vec(),
            roster.objects().to_vec(),
        );
        assert_eq!(restored.allocate_unit_id().unwrap(), UnitId(3));
        let object = restored
            .insert_object(Rect::new(0, 0, 16, 16), Item::new(ItemKind::Jewel), false)
            .unwrap();
        assert_eq!(object, ObjectId(1));
    }

    #[test]
    fn obstacles_exclude_the_moving_unit() {
        let mut roster = Roster::new();
        let a = spawn(&mut roster, "A", 0);
        spawn(&mut roster, "B", 100);
        roster
            .insert_object(Rect::new(200, 0, 16, 16), Item::new(ItemKind::Jewel), false)
            .unwrap();

        let obstacles: Vec<_> = roster.obstacles_for(a).collect();
        assert_eq!(obstacles.len(), 2);
        assert!(obstacles.iter().all(|rect| rect.x != 0));
    }
}
