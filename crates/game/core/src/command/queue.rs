use std::collections::VecDeque;

use super::Command;

/// Commands waiting for the next command-queue pass.
///
/// A pass takes the whole batch at once; anything queued while the batch runs
/// (queued events, zone reloads) waits for the following pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.pending.extend(commands);
    }

    pub fn take_batch(&mut self) -> Vec<Command> {
        self.pending.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.pending.iter()
    }
}
