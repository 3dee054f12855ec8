//! Unified error type surfaced by the runtime API.
//!
//! Wraps failures from content loading, the save repository and the session
//! so embedders can bubble them up with consistent context.
use isle_core::{CommandError, ErrorSeverity, GameError, SnapshotError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Content(#[from] anyhow::Error),

    #[error("no save repository is configured")]
    NoRepository,

    #[error("save slot {0} is empty")]
    EmptySlot(u32),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Repository(error) => error.severity(),
            RuntimeError::Snapshot(error) => error.severity(),
            RuntimeError::Command(error) => error.severity(),
            RuntimeError::Content(_) => ErrorSeverity::Fatal,
            RuntimeError::NoRepository | RuntimeError::EmptySlot(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Repository(error) => error.error_code(),
            RuntimeError::Snapshot(error) => error.error_code(),
            RuntimeError::Command(error) => error.error_code(),
            RuntimeError::Content(_) => "RUNTIME_CONTENT",
            RuntimeError::NoRepository => "RUNTIME_NO_REPOSITORY",
            RuntimeError::EmptySlot(_) => "RUNTIME_EMPTY_SLOT",
        }
    }
}
