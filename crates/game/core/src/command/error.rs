use std::fmt;

use crate::combat::CombatError;
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::map::MapError;
use crate::mode::ModeKind;
use crate::movement::MoveError;
use crate::state::StateError;

use super::Command;

/// Rejection of a single command. The session state is left as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("invalid unit name {0:?}")]
    InvalidName(String),

    #[error("({x}, {y}) places a {width}x{height} footprint outside the map")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    #[error("no unit named {0:?} is on the map")]
    UnitNotFound(String),

    #[error("no object tagged {0:?} is on the map")]
    ObjectNotFound(String),

    #[error("unit {0:?} cannot fight")]
    NotCombatant(String),

    #[error("move steps must be positive")]
    ZeroSteps,

    #[error("no map is loaded")]
    NoMap,

    #[error("no player unit is placed")]
    NoPlayer,

    #[error("{command} is not available in {mode} mode")]
    WrongMode {
        command: &'static str,
        mode: ModeKind,
    },

    #[error("no inventory item is selected")]
    NoItemSelected,

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        use CommandError::*;
        match self {
            Move(error) => error.severity(),
            Map(error) => error.severity(),
            State(error) => error.severity(),
            Combat(error) => error.severity(),
            Oracle(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use CommandError::*;
        match self {
            InvalidName(_) => "COMMAND_INVALID_NAME",
            OutOfBounds { .. } => "COMMAND_OUT_OF_BOUNDS",
            UnitNotFound(_) => "COMMAND_UNIT_NOT_FOUND",
            ObjectNotFound(_) => "COMMAND_OBJECT_NOT_FOUND",
            NotCombatant(_) => "COMMAND_NOT_COMBATANT",
            ZeroSteps => "COMMAND_ZERO_STEPS",
            NoMap => "COMMAND_NO_MAP",
            NoPlayer => "COMMAND_NO_PLAYER",
            WrongMode { .. } => "COMMAND_WRONG_MODE",
            NoItemSelected => "COMMAND_NO_ITEM_SELECTED",
            Move(error) => error.error_code(),
            Map(error) => error.error_code(),
            State(error) => error.error_code(),
            Combat(error) => error.error_code(),
            Oracle(error) => error.error_code(),
        }
    }
}

/// A command that was rejected during a command-queue pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandFailure {
    pub command: Command,
    pub error: CommandError,
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed [{}]: {}",
            self.command.name(),
            self.error.error_code(),
            self.error
        )
    }
}
