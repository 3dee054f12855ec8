use crate::error::{ErrorSeverity, GameError};
use crate::geometry::Direction;
use crate::map::MapError;
use crate::state::UnitId;

/// Errors raised by movement requests.
///
/// A blocked step is not an error; it is reported as a bump.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("{0} is not on the map")]
    UnitNotFound(UnitId),

    #[error("{0} cannot move")]
    NotMovable(UnitId),

    #[error("{0} is not a travel direction")]
    InvalidDirection(Direction),

    #[error("move distance must be positive")]
    ZeroDistance,

    #[error("{distance}px {direction} leaves the viewport of {unit}")]
    OutOfRange {
        unit: UnitId,
        distance: i32,
        direction: Direction,
    },

    #[error("{unit} cannot travel {distance}px {direction}")]
    Blocked {
        unit: UnitId,
        distance: i32,
        direction: Direction,
    },

    #[error("no map is loaded")]
    NoMap,

    #[error("no player unit is placed")]
    NoPlayer,

    #[error(transparent)]
    Map(#[from] MapError),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        use MoveError::*;
        match self {
            Blocked { .. } => ErrorSeverity::Recoverable,
            UnitNotFound(_) | NotMovable(_) | InvalidDirection(_) | ZeroDistance
            | OutOfRange { .. } | NoMap | NoPlayer => ErrorSeverity::Validation,
            Map(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use MoveError::*;
        match self {
            UnitNotFound(_) => "MOVE_UNIT_NOT_FOUND",
            NotMovable(_) => "MOVE_NOT_MOVABLE",
            InvalidDirection(_) => "MOVE_INVALID_DIRECTION",
            ZeroDistance => "MOVE_ZERO_DISTANCE",
            OutOfRange { .. } => "MOVE_OUT_OF_RANGE",
            Blocked { .. } => "MOVE_BLOCKED",
            NoMap => "MOVE_NO_MAP",
            NoPlayer => "MOVE_NO_PLAYER",
            Map(error) => error.error_code(),
        }
    }
}
