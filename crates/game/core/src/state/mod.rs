//! Mutable session data: units, objects and quest progress.
//!
//! Everything here is plain data. Movement, combat and command dispatch
//! mutate it; the runtime only reads it through frame views and snapshots.
mod animation;
mod error;
mod ids;
mod item;
mod quest;
mod roster;
mod unit;

pub use animation::WalkAnimation;
pub use error::StateError;
pub use ids::{ObjectId, UnitId};
pub use item::{Item, ItemAction, ItemCapabilities, ItemEffect, ItemKind, WorldObject};
pub use quest::QuestProgress;
pub use roster::Roster;
pub use unit::{Armor, Attitude, Capabilities, CombatAttributes, Unit, UnitKind, Weapon};
