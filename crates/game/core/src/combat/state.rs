use strum::{Display, EnumIter};

use crate::state::UnitId;

use super::AttackResult;

/// Side owning the current combat turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    #[default]
    Player,
    Opponent,
}

impl Side {
    pub const fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Actions of the action dialog, numbered as its 2×2 grid (row-major).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatAction {
    #[default]
    Melee = 1,
    Ranged = 2,
    UseItem = 3,
    Flee = 4,
}

impl CombatAction {
    /// 1-based position in the action dialog.
    pub const fn slot(self) -> usize {
        self as usize
    }

    pub const fn from_slot(slot: usize) -> Option<CombatAction> {
        match slot {
            1 => Some(CombatAction::Melee),
            2 => Some(CombatAction::Ranged),
            3 => Some(CombatAction::UseItem),
            4 => Some(CombatAction::Flee),
            _ => None,
        }
    }
}

/// Per-fight bookkeeping. A fresh value is built at the start of every fight.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub opponent: UnitId,
    pub turn: Side,
    pub last_action: Option<(Side, CombatAction)>,
    /// Action the player chose last; restored when the fight inventory is cancelled.
    pub previous_player_action: CombatAction,
    /// Damage of the latest hit, kept for the renderer.
    pub pending_damage: Option<u32>,
    pub message: Option<String>,
    pub log: Vec<String>,
    pub fled: bool,
    /// Frames left before the opponent answers.
    pub reaction_timer: u32,
}

impl CombatState {
    pub fn new(opponent: UnitId) -> Self {
        Self {
            opponent,
            turn: Side::Player,
            last_action: None,
            previous_player_action: CombatAction::default(),
            pending_damage: None,
            message: None,
            log: Vec::new(),
            fled: false,
            reaction_timer: 0,
        }
    }

    pub fn is_players_turn(&self) -> bool {
        self.turn == Side::Player
    }

    /// Records an action of the side on turn.
    pub fn record(&mut self, action: CombatAction) {
        self.last_action = Some((self.turn, action));
        if self.turn == Side::Player {
            self.previous_player_action = action;
        }
    }

    pub fn record_attack(&mut self, result: &AttackResult) {
        self.pending_damage = result.damage;
        self.push_message(result.message());
    }

    pub fn push_message(&mut self, message: String) {
        self.log.push(message.clone());
        self.message = Some(message);
    }

    /// Hands the turn to the other side; the opponent waits `reaction_delay` frames.
    pub fn end_turn(&mut self, reaction_delay: u32) {
        self.turn = self.turn.other();
        self.reaction_timer = match self.turn {
            Side::Opponent => reaction_delay,
            Side::Player => 0,
        };
    }
}
