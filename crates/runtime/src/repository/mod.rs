//! Repository layer for save games.
//!
//! Repositories handle data that CHANGES during play. Static content (maps,
//! quest scripts, unit templates) is handled by the oracles, not repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileSnapshotRepository, SnapshotFormat};
pub use memory::InMemorySnapshotRepo;
pub use traits::SnapshotRepository;
