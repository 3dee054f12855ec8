use bitflags::bitflags;
use strum::{Display, EnumIter};

use crate::config::GameConfig;
use crate::geometry::{Direction, Rect};

use super::{Item, UnitId, WalkAnimation};

bitflags! {
    /// Behaviour a unit takes part in.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u8 {
        const MOVABLE = 1 << 0;
        const COMBATANT = 1 << 1;
        const CARRIER = 1 << 2;
    }
}

/// Unit kinds and their base templates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitKind {
    #[default]
    Human,
    Olympian,
    Titan,
    Creature,
}

impl UnitKind {
    pub const fn base_defense(self) -> u32 {
        match self {
            UnitKind::Human => 5,
            UnitKind::Olympian => 250,
            UnitKind::Titan => 220,
            UnitKind::Creature => 1,
        }
    }

    pub const fn base_speed(self) -> u32 {
        2
    }

    pub const fn capabilities(self) -> Capabilities {
        match self {
            UnitKind::Human => Capabilities::all(),
            UnitKind::Olympian | UnitKind::Titan | UnitKind::Creature => {
                Capabilities::MOVABLE.union(Capabilities::COMBATANT)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attitude {
    #[default]
    Friend,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatAttributes {
    pub defense: u32,
    pub agility: u32,
    pub melee_skill: u32,
    pub ranged_skill: u32,
}

impl CombatAttributes {
    pub fn for_kind(kind: UnitKind) -> Self {
        Self {
            defense: kind.base_defense(),
            ..Self::default()
        }
    }
}

impl Default for CombatAttributes {
    fn default() -> Self {
        Self {
            defense: 0,
            agility: 1,
            melee_skill: 1,
            ranged_skill: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_rate: u32,
}

impl Weapon {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            attack_rate: 0,
        }
    }
}

/// Worn armour; its defense scales with condition (percent).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armor {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub initial_defense: u32,
    pub condition: u32,
}

impl Armor {
    pub fn new(name: impl Into<String>, initial_defense: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            initial_defense,
            condition: 100,
        }
    }

    pub fn defense(&self) -> u32 {
        self.initial_defense * self.condition / 100
    }
}

/// A unit on (or about to be placed on) the map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub kind: UnitKind,
    pub rect: Rect,
    pub facing: Direction,
    pub speed: u32,
    pub health: u32,
    pub max_health: u32,
    pub attributes: CombatAttributes,
    pub weapon: Option<Weapon>,
    pub armor: Option<Armor>,
    pub inventory: Vec<Item>,
    pub capabilities: Capabilities,
    pub attitude: Attitude,
    /// Dialog ids; the first one is spoken when the player talks to the unit.
    pub dialogs: Vec<String>,
    pub animation: WalkAnimation,
}

impl Unit {
    pub fn new(id: UnitId, name: impl Into<String>, kind: UnitKind, width: u32, height: u32) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            rect: Rect::new(0, 0, width, height),
            facing: Direction::Down,
            speed: kind.base_speed(),
            health: GameConfig::MAX_HEALTH,
            max_health: GameConfig::MAX_HEALTH,
            attributes: CombatAttributes::for_kind(kind),
            weapon: None,
            armor: None,
            inventory: Vec::new(),
            capabilities: kind.capabilities(),
            attitude: Attitude::default(),
            dialogs: Vec::new(),
            animation: WalkAnimation::default(),
        }
    }

    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && name.chars().count() <= GameConfig::MAX_NAME_LEN
    }

    pub fn can(&self, capability: Capabilities) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn has_weapon(&self) -> bool {
        self.weapon.is_some()
    }

    /// Base defense plus armour.
    pub fn defense(&self) -> u32 {
        self.attributes.defense + self.armor.as_ref().map_or(0, Armor::defense)
    }

    pub fn place(&mut self, x: i32, y: i32) {
        self.rect.x = x;
        self.rect.y = y;
    }

    /// Reduces health, saturating at zero. Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.health);
        self.health -= taken;
        taken
    }

    pub fn restore_health(&mut self) {
        self.health = self.max_health;
    }

    /// Pixels covered by one walking step, capped at [`GameConfig::MAX_UNIT_SPEED`].
    pub fn stride(&self) -> i32 {
        self.speed.min(GameConfig::MAX_UNIT_SPEED) as i32
    }

    /// Walks `distance` pixels, advancing the walk cycle.
    pub fn step(&mut self, direction: Direction, distance: i32) {
        self.facing = direction;
        self.animation.advance();
        self.rect = self.rect.translated(direction, distance);
    }

    /// Faces `direction` without moving.
    pub fn turn(&mut self, direction: Direction) {
        self.facing = direction;
        self.animation.stop();
    }

    pub fn stop(&mut self) {
        self.animation.stop();
    }

    /// `(row, column)` of the current spritesheet frame.
    pub fn sprite_frame(&self) -> (u8, u8) {
        (self.facing.sprite_row(), self.animation.column())
    }

    /// True when `other`'s position lies within `range` pixels of this unit's rectangle.
    pub fn in_range(&self, other: &Unit, range: i32) -> bool {
        let (x, y) = (other.rect.x, other.rect.y);
        x >= self.rect.x - range
            && x <= self.rect.right() + range
            && y >= self.rect.y - range
            && y <= self.rect.bottom() + range
    }

    pub fn first_dialog(&self) -> Option<&str> {
        self.dialogs.first().map(String::as_str)
    }
}
