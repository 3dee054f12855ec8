//! Public API surface of the runtime: collaborator traits and errors.
mod collaborators;
mod errors;
mod scripted;

pub use collaborators::{ErrorDisplay, FrameSink, InputSource, LogErrors, NullSink};
pub use errors::{RepositoryError, Result, RuntimeError};
pub use scripted::ScriptedInput;
