//! Error types raised by repository implementations.

use isle_core::{ErrorSeverity, GameError};
use thiserror::Error;

/// Errors surfaced by snapshot repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("snapshot repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RepositoryError::Io(_) => ErrorSeverity::Recoverable,
            RepositoryError::Serialization(_) | RepositoryError::Json(_) => {
                ErrorSeverity::Internal
            }
            RepositoryError::LockPoisoned => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RepositoryError::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            RepositoryError::Io(_) => "REPOSITORY_IO",
            RepositoryError::Serialization(_) => "REPOSITORY_SERIALIZATION",
            RepositoryError::Json(_) => "REPOSITORY_JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
