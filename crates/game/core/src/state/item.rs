use bitflags::bitflags;
use strum::{Display, EnumIter};

use crate::config::GameConfig;
use crate::geometry::Rect;

use super::{ObjectId, Unit};

bitflags! {
    /// What the player may do with an item.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ItemCapabilities: u8 {
        const PICKABLE = 1 << 0;
        const USABLE = 1 << 1;
    }
}

/// Item kinds known to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Medicine,
    Jewel,
}

impl ItemKind {
    pub const fn capabilities(self) -> ItemCapabilities {
        match self {
            ItemKind::Medicine => ItemCapabilities::PICKABLE.union(ItemCapabilities::USABLE),
            ItemKind::Jewel => ItemCapabilities::PICKABLE,
        }
    }

    /// Pixel footprint of the item while it lies on the map.
    pub const fn footprint(self) -> (u32, u32) {
        match self {
            ItemKind::Medicine => (16, 16),
            ItemKind::Jewel => (16, 16),
        }
    }

    /// Entries of the item's context menu, top to bottom.
    pub fn context_actions(self) -> &'static [ItemAction] {
        if self.capabilities().contains(ItemCapabilities::USABLE) {
            &[ItemAction::Use, ItemAction::Remove, ItemAction::Cancel]
        } else {
            &[ItemAction::Remove, ItemAction::Cancel]
        }
    }
}

/// Context-menu entry offered for an inventory item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum ItemAction {
    Use,
    Remove,
    Cancel,
}

/// Effect applied by using an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemEffect {
    /// Health restored to the given value.
    Healed { health: u32 },
    /// The item has no use effect.
    Inert,
}

/// An item instance, either carried or lying on the map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub kind: ItemKind,
    /// Script tag used to remember that the item was collected.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tag: Option<String>,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        Self { kind, tag: None }
    }

    pub fn tagged(kind: ItemKind, tag: impl Into<String>) -> Self {
        Self {
            kind,
            tag: Some(tag.into()),
        }
    }

    pub fn name(&self) -> String {
        self.kind.to_string()
    }

    pub fn is_usable(&self) -> bool {
        self.kind.capabilities().contains(ItemCapabilities::USABLE)
    }

    /// Applies the item's effect to `unit`.
    pub fn apply(&self, unit: &mut Unit) -> ItemEffect {
        match self.kind {
            ItemKind::Medicine => {
                unit.health = GameConfig::MAX_HEALTH.min(unit.max_health);
                ItemEffect::Healed {
                    health: unit.health,
                }
            }
            ItemKind::Jewel => ItemEffect::Inert,
        }
    }
}

/// An item placed on the map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldObject {
    pub id: ObjectId,
    pub rect: Rect,
    pub item: Item,
    /// Fixed objects block pickups even when their item is pickable.
    pub fixed: bool,
}

impl WorldObject {
    pub fn is_pickable(&self) -> bool {
        !self.fixed && self.item.kind.capabilities().contains(ItemCapabilities::PICKABLE)
    }
}
