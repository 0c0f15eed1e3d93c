//! Deterministic input for headless runs and tests.

use std::collections::VecDeque;

use anyhow::Result;

use crate::poll::InputPoll;

/// Delivers key presses at chosen poll counts.
///
/// `ScriptedInput::key_at_poll(3)` reports nothing on the first two polls and
/// a pending key from the third poll on, until it is consumed.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    schedule: VecDeque<usize>,
    pending: usize,
    polls: usize,
    consumed: usize,
}

impl ScriptedInput {
    /// Input that never produces a key.
    pub fn never() -> Self {
        Self::default()
    }

    pub fn key_at_poll(poll: usize) -> Self {
        Self::default().then_key_at_poll(poll)
    }

    pub fn then_key_at_poll(mut self, poll: usize) -> Self {
        self.schedule.push_back(poll);
        self.schedule.make_contiguous().sort_unstable();
        self
    }

    /// Number of `key_available` calls so far.
    pub fn polls(&self) -> usize {
        self.polls
    }

    /// Number of `consume_one` calls so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn pending(&self) -> usize {
        self.pending
    }
}

impl InputPoll for ScriptedInput {
    fn key_available(&mut self) -> Result<bool> {
        self.polls += 1;
        while self.schedule.front().is_some_and(|&at| at <= self.polls) {
            self.schedule.pop_front();
            self.pending += 1;
        }
        Ok(self.pending > 0)
    }

    fn consume_one(&mut self) -> Result<()> {
        self.consumed += 1;
        self.pending = self.pending.saturating_sub(1);
        Ok(())
    }
}
