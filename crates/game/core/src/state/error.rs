//! Roster errors.

use crate::error::{ErrorSeverity, GameError};

use super::{ObjectId, UnitId};

/// Errors raised while adding, finding or removing units and objects.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// A unit with this name is already on the map.
    #[error("unit '{0}' is already on the map")]
    UnitAlreadyPresent(String),

    #[error("{0} is not on the map")]
    UnitNotFound(UnitId),

    #[error("{0} is not on the map")]
    ObjectNotFound(ObjectId),

    /// Identifier allocation overflow (all IDs exhausted).
    #[error("identifier space exhausted")]
    IdOverflow,
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            UnitAlreadyPresent(_) | UnitNotFound(_) | ObjectNotFound(_) => {
                ErrorSeverity::Validation
            }
            IdOverflow => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            UnitAlreadyPresent(_) => "STATE_UNIT_ALREADY_PRESENT",
            UnitNotFound(_) => "STATE_UNIT_NOT_FOUND",
            ObjectNotFound(_) => "STATE_OBJECT_NOT_FOUND",
            IdOverflow => "STATE_ID_OVERFLOW",
        }
    }
}
