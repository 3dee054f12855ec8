//! Frame loop and platform glue around an `isle-core` session.
//!
//! This crate drives a [`GameSession`](isle_core::GameSession) one frame at a
//! time. Platform concerns stay behind the collaborator traits in [`api`]:
//! input arrives through an [`InputSource`], frames leave through a
//! [`FrameSink`] and rejected commands go to an [`ErrorDisplay`].
//!
//! Modules are organized by responsibility:
//! - [`game_loop`] hosts the frame loop and save/load entry points
//! - [`api`] exposes the collaborator traits and the runtime error
//! - [`bootstrap`] loads content and builds sessions from it
//! - [`repository`] persists snapshots into save slots
//! - [`config`] and [`logging`] cover process environment and tracing setup
pub mod api;
pub mod bootstrap;
pub mod config;
pub mod game_loop;
pub mod logging;
pub mod repository;

pub use api::{
    ErrorDisplay, FrameSink, InputSource, LogErrors, NullSink, Result, RuntimeError,
    ScriptedInput,
};
pub use bootstrap::{GameData, open_saves};
pub use config::RuntimeConfig;
pub use game_loop::{FrameReport, GameLoop};
pub use logging::setup_logging;
pub use repository::{
    FileSnapshotRepository, InMemorySnapshotRepo, RepositoryError, SnapshotFormat,
    SnapshotRepository,
};
