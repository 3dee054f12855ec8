//! Oracle access errors.
//!
//! Errors related to oracle availability and data lookups.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when accessing Oracle data.
///
/// A missing oracle means the environment was assembled incorrectly and the
/// session cannot continue. Missing entries are caller mistakes in a script or
/// save file.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// MapOracle is not available in the environment.
    #[error("MapOracle not available")]
    MapsNotAvailable,

    /// QuestOracle is not available in the environment.
    #[error("QuestOracle not available")]
    QuestsNotAvailable,

    /// UnitOracle is not available in the environment.
    #[error("UnitOracle not available")]
    UnitsNotAvailable,

    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,

    /// No map is registered under the given name.
    #[error("map '{0}' not found")]
    MapNotFound(String),

    /// No unit template is registered under the given id.
    #[error("unit template '{0}' not found")]
    UnitTemplateNotFound(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            MapsNotAvailable | QuestsNotAvailable | UnitsNotAvailable | RngNotAvailable => {
                ErrorSeverity::Fatal
            }
            MapNotFound(_) | UnitTemplateNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            MapsNotAvailable => "ORACLE_MAPS_NOT_AVAILABLE",
            QuestsNotAvailable => "ORACLE_QUESTS_NOT_AVAILABLE",
            UnitsNotAvailable => "ORACLE_UNITS_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            MapNotFound(_) => "ORACLE_MAP_NOT_FOUND",
            UnitTemplateNotFound(_) => "ORACLE_UNIT_TEMPLATE_NOT_FOUND",
        }
    }
}
