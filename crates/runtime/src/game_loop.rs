//! Single-threaded cooperative frame loop.
//!
//! Each frame polls pending input, routes every event through the session's
//! mode controller, advances the simulation by one tick, forwards command
//! failures and finally hands a read-only view to the renderer. Frame length
//! follows the pacing of the active mode.
use std::thread;
use std::time::Instant;

use isle_core::{GameSession, Pacing};
use tracing::{debug, info};

use crate::api::{ErrorDisplay, FrameSink, InputSource, Result, RuntimeError};
use crate::repository::SnapshotRepository;

/// What happened during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub frame: u64,
    pub events: usize,
    pub failures: usize,
}

pub struct GameLoop<'a, I, S, D> {
    session: GameSession<'a>,
    input: I,
    sink: S,
    errors: D,
    repository: Option<Box<dyn SnapshotRepository + 'a>>,
    pacing: Pacing,
    paced: bool,
}

impl<'a, I, S, D> GameLoop<'a, I, S, D>
where
    I: InputSource,
    S: FrameSink,
    D: ErrorDisplay,
{
    pub fn new(session: GameSession<'a>, mut input: I, sink: S, errors: D) -> Self {
        let pacing = session.pacing();
        input.set_key_repeat(pacing.key_repeat);
        Self {
            session,
            input,
            sink,
            errors,
            repository: None,
            pacing,
            paced: true,
        }
    }

    pub fn with_repository(mut self, repository: impl SnapshotRepository + 'a) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    /// Runs frames back to back without sleeping.
    pub fn unpaced(mut self) -> Self {
        self.paced = false;
        self
    }

    pub fn session(&self) -> &GameSession<'a> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession<'a> {
        &mut self.session
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn errors(&self) -> &D {
        &self.errors
    }

    pub fn into_parts(self) -> (GameSession<'a>, I, S, D) {
        (self.session, self.input, self.sink, self.errors)
    }

    /// Runs one frame.
    pub fn run_frame(&mut self) -> FrameReport {
        let events = self.input.poll();
        let event_count = events.len();
        for event in events {
            self.session.handle_input(event);
        }

        self.session.tick();

        let failures = self.session.drain_failures();
        for failure in &failures {
            self.errors.show(failure);
        }

        self.sink.present(&self.session.frame_view());
        self.session.acknowledge_audio();

        let pacing = self.session.pacing();
        if pacing != self.pacing {
            debug!(fps = pacing.fps, repeat = pacing.key_repeat.is_some(), "pacing changed");
            self.input.set_key_repeat(pacing.key_repeat);
            self.pacing = pacing;
        }

        FrameReport {
            frame: self.session.frame(),
            events: event_count,
            failures: failures.len(),
        }
    }

    /// Runs frames until the session asks to quit or the input closes.
    ///
    /// Returns the number of frames run.
    pub fn run(&mut self) -> u64 {
        info!("game loop started");
        let mut frames = 0;
        while !self.session.is_quit_requested() && !self.input.is_closed() {
            let started = Instant::now();
            self.run_frame();
            frames += 1;

            if self.paced {
                let budget = self.pacing.frame_duration();
                if let Some(rest) = budget.checked_sub(started.elapsed()) {
                    thread::sleep(rest);
                }
            }
        }
        info!(frames, quit = self.session.is_quit_requested(), "game loop stopped");
        frames
    }

    /// Saves the running game into `slot`.
    pub fn save(&self, slot: u32) -> Result<()> {
        let repository = self.repository.as_ref().ok_or(RuntimeError::NoRepository)?;
        let snapshot = self.session.snapshot()?;
        repository.save(slot, &snapshot)?;
        info!(slot, map = %snapshot.map, zone = snapshot.zone, "game saved");
        Ok(())
    }

    /// Replaces the running game with the one saved in `slot`.
    ///
    /// On any error the session is left untouched.
    pub fn load(&mut self, slot: u32) -> Result<()> {
        let repository = self.repository.as_ref().ok_or(RuntimeError::NoRepository)?;
        let snapshot = repository
            .load(slot)?
            .ok_or(RuntimeError::EmptySlot(slot))?;
        self.session.restore(snapshot)?;
        info!(slot, "game loaded");
        Ok(())
    }
}
