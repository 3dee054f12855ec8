//! Scripted input for tests and replays.
use std::collections::VecDeque;

use isle_core::{InputAction, InputEvent, KeyRepeat};

use super::collaborators::InputSource;

/// Replays a fixed batch of events per frame and closes when the script ends.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
    key_repeat: Option<KeyRepeat>,
    repeat_changes: usize,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            ..Self::default()
        }
    }

    /// One frame per action, each a key press followed by its release.
    pub fn presses(actions: impl IntoIterator<Item = InputAction>) -> Self {
        Self::new(
            actions
                .into_iter()
                .map(|action| vec![InputEvent::KeyDown(action), InputEvent::KeyUp(action)]),
        )
    }

    pub fn push_frame(&mut self, events: Vec<InputEvent>) {
        self.frames.push_back(events);
    }

    /// Appends `count` frames without input.
    pub fn idle(&mut self, count: usize) {
        self.frames.extend(std::iter::repeat_n(Vec::new(), count));
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    /// The key repeat most recently requested by the loop.
    pub fn key_repeat(&self) -> Option<KeyRepeat> {
        self.key_repeat
    }

    /// How many times the loop changed the key repeat.
    pub fn repeat_changes(&self) -> usize {
        self.repeat_changes
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }

    fn is_closed(&self) -> bool {
        self.frames.is_empty()
    }

    fn set_key_repeat(&mut self, repeat: Option<KeyRepeat>) {
        self.key_repeat = repeat;
        self.repeat_changes += 1;
    }
}
