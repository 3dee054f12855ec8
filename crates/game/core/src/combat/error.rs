use crate::error::{ErrorSeverity, GameError};
use crate::state::{ItemKind, UnitId};

use super::Side;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("no fight is in progress")]
    NotFighting,

    #[error("it is the {0}'s turn")]
    OutOfTurn(Side),

    #[error("{0} cannot fight")]
    NotCombatant(UnitId),

    #[error("{0} is not on the map")]
    UnitNotFound(UnitId),

    #[error("no item in inventory slot {0}")]
    ItemMissing(usize),

    #[error("{0} cannot be used")]
    ItemNotUsable(ItemKind),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use CombatError::*;
        match self {
            NotFighting => "COMBAT_NOT_FIGHTING",
            OutOfTurn(_) => "COMBAT_OUT_OF_TURN",
            NotCombatant(_) => "COMBAT_NOT_COMBATANT",
            UnitNotFound(_) => "COMBAT_UNIT_NOT_FOUND",
            ItemMissing(_) => "COMBAT_ITEM_MISSING",
            ItemNotUsable(_) => "COMBAT_ITEM_NOT_USABLE",
        }
    }
}
