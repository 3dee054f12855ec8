//! Logical input delivered by the input collaborator.

use strum::{Display, EnumIter};

use crate::geometry::Direction;

/// Logical keys. Hardware mapping is the input collaborator's concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Confirm,
    /// Escape: opens or leaves menus.
    Cancel,
    OpenInventory,
    /// Pick up the item ahead or talk to the unit ahead.
    Interact,
}

impl InputAction {
    pub const fn direction(self) -> Option<Direction> {
        match self {
            InputAction::MoveUp => Some(Direction::Up),
            InputAction::MoveDown => Some(Direction::Down),
            InputAction::MoveLeft => Some(Direction::Left),
            InputAction::MoveRight => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputEvent {
    KeyDown(InputAction),
    KeyUp(InputAction),
}
