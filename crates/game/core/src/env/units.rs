//! Unit template definitions and oracle interface.
//!
//! `UnitTemplate` describes a unit in a data-driven way. Templates are read
//! from RON files (or inlined in a spawn command) and turned into [`Unit`]
//! instances once an id and a position are known.

use crate::config::GameConfig;
use crate::state::{Armor, Attitude, CombatAttributes, Item, Unit, UnitId, UnitKind, Weapon};

/// Unit template defining every `Unit` field except id and position.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: UnitKind,
    /// Sprite frame size, which is also the collision rectangle.
    pub size: (u32, u32),
    /// Overrides the kind's base speed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: Option<u32>,
    /// Overrides the kind's base attributes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Option<CombatAttributes>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<Weapon>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor: Option<Armor>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attitude: Attitude,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dialogs: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Vec<Item>,
}

impl UnitTemplate {
    /// Create a new unit from this template at `(x, y)`.
    pub fn to_unit(&self, id: UnitId, x: i32, y: i32) -> Unit {
        let (width, height) = self.size;
        let mut unit = Unit::new(id, self.name.clone(), self.kind, width, height);
        unit.place(x, y);
        if let Some(speed) = self.speed {
            unit.speed = speed.min(GameConfig::MAX_UNIT_SPEED);
        }
        if let Some(attributes) = self.attributes {
            unit.attributes = attributes;
        }
        unit.weapon = self.weapon.clone();
        unit.armor = self.armor.clone();
        unit.attitude = self.attitude;
        unit.dialogs = self.dialogs.clone();
        unit.inventory = self.inventory.clone();
        unit
    }

    /// Create a builder for constructing unit templates
    pub fn builder(name: impl Into<String>) -> UnitTemplateBuilder {
        UnitTemplateBuilder {
            template: UnitTemplate {
                name: name.into(),
                kind: UnitKind::default(),
                size: (32, 48),
                speed: None,
                attributes: None,
                weapon: None,
                armor: None,
                attitude: Attitude::default(),
                dialogs: Vec::new(),
                inventory: Vec::new(),
            },
        }
    }
}

/// Builder for constructing unit templates.
pub struct UnitTemplateBuilder {
    template: UnitTemplate,
}

impl UnitTemplateBuilder {
    pub fn kind(mut self, kind: UnitKind) -> Self {
        self.template.kind = kind;
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.template.size = (width, height);
        self
    }

    pub fn speed(mut self, speed: u32) -> Self {
        self.template.speed = Some(speed);
        self
    }

    pub fn weapon(mut self, weapon: Weapon) -> Self {
        self.template.weapon = Some(weapon);
        self
    }

    pub fn armor(mut self, armor: Armor) -> Self {
        self.template.armor = Some(armor);
        self
    }

    pub fn attitude(mut self, attitude: Attitude) -> Self {
        self.template.attitude = attitude;
        self
    }

    pub fn dialog(mut self, id: impl Into<String>) -> Self {
        self.template.dialogs.push(id.into());
        self
    }

    pub fn item(mut self, item: Item) -> Self {
        self.template.inventory.push(item);
        self
    }

    pub fn build(self) -> UnitTemplate {
        self.template
    }
}

/// Oracle providing unit templates by definition id (e.g. "nestor", "cyclops").
pub trait UnitOracle: Send + Sync {
    fn template(&self, id: &str) -> Option<UnitTemplate>;
}
