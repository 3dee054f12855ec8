use crate::combat::CombatAction;
use crate::command::Command;

use super::Selection;

/// Labels of the 2×2 combat grid, row-major.
pub const ACTION_LABELS: [&str; 4] = ["Melee Attack", "Ranged Attack", "Use Item", "Flee"];

/// The fight's action grid: `[Melee, Ranged; Use Item, Flee]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionDialog {
    selection: Selection,
    /// Set while the opponent is on turn.
    locked: bool,
    /// Shown locked when the player has no weapon; the control stays bound.
    ranged_locked: bool,
}

impl ActionDialog {
    pub fn new(selected: CombatAction, player_armed: bool) -> Self {
        Self {
            selection: Selection::with_selected(4, selected.slot()),
            locked: false,
            ranged_locked: !player_armed,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_action(&self) -> CombatAction {
        CombatAction::from_slot(self.selection.selected()).unwrap_or_default()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_ranged_locked(&self) -> bool {
        self.ranged_locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn up(&mut self) -> bool {
        matches!(self.selection.selected(), 3 | 4) && self.selection.shift(-2)
    }

    pub fn down(&mut self) -> bool {
        matches!(self.selection.selected(), 1 | 2) && self.selection.shift(2)
    }

    pub fn left(&mut self) -> bool {
        matches!(self.selection.selected(), 2 | 4) && self.selection.shift(-1)
    }

    pub fn right(&mut self) -> bool {
        matches!(self.selection.selected(), 1 | 3) && self.selection.shift(1)
    }

    /// Clicks the selected action and returns its command, unless the grid is locked.
    pub fn confirm(&mut self) -> Option<Command> {
        if self.locked {
            return None;
        }
        self.selection.click()?;
        Some(match self.selected_action() {
            CombatAction::Melee => Command::MeleeAttack,
            CombatAction::Ranged => Command::RangedAttack,
            CombatAction::UseItem => Command::OpenFightInventory,
            CombatAction::Flee => Command::Flee,
        })
    }
}
