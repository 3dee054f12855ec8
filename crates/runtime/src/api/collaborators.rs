//! Seams between the frame loop and the platform.
//!
//! The loop never touches a window, an audio device or a keyboard. It pulls
//! logical input from an [`InputSource`], pushes each finished frame to a
//! [`FrameSink`] and reports rejected commands to an [`ErrorDisplay`].
use isle_core::{CommandFailure, FrameView, InputEvent, KeyRepeat};
use tracing::warn;

/// Source of logical key events.
pub trait InputSource {
    /// Events that arrived since the previous frame, oldest first.
    fn poll(&mut self) -> Vec<InputEvent>;

    /// Whether the source will never produce input again (window closed,
    /// script exhausted). The loop stops once this is true.
    fn is_closed(&self) -> bool {
        false
    }

    /// Called whenever the pacing changes. `None` turns key repeat off.
    fn set_key_repeat(&mut self, _repeat: Option<KeyRepeat>) {}
}

/// Renderer and audio collaborator.
///
/// A raised refresh flag on `view.sound` or `view.music` asks for the track to
/// be (re)started; the loop lowers both flags after `present` returns.
pub trait FrameSink {
    fn present(&mut self, view: &FrameView<'_>);
}

/// Shows command failures to the player or the developer.
pub trait ErrorDisplay {
    fn show(&mut self, failure: &CommandFailure);
}

/// Reports failures through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogErrors;

impl ErrorDisplay for LogErrors {
    fn show(&mut self, failure: &CommandFailure) {
        warn!(%failure, "command failed");
    }
}

/// Collects failures, for tests and tools that inspect them afterwards.
impl ErrorDisplay for Vec<CommandFailure> {
    fn show(&mut self, failure: &CommandFailure) {
        self.push(failure.clone());
    }
}

/// Discards every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _view: &FrameView<'_>) {}
}
