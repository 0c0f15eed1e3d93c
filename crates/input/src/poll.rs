//! Non-blocking "any key" polling.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};

use crate::map::is_cancel_event;

/// The cancellation signal source for a running effect.
pub trait InputPoll {
    /// True if a key press is pending. Must not block.
    fn key_available(&mut self) -> Result<bool>;

    /// Discard exactly one pending key press, if any.
    fn consume_one(&mut self) -> Result<()>;
}

impl<I: InputPoll + ?Sized> InputPoll for &mut I {
    fn key_available(&mut self) -> Result<bool> {
        (**self).key_available()
    }

    fn consume_one(&mut self) -> Result<()> {
        (**self).consume_one()
    }
}

/// Polls crossterm's event queue with a zero timeout.
///
/// Events that do not cancel are dropped while polling. The key that answered
/// `key_available` is held back until `consume_one` discards it.
#[derive(Debug, Default)]
pub struct CrosstermInput {
    pending: Option<Event>,
}

impl CrosstermInput {
    pub fn new() -> Self {
        Self { pending: None }
    }
}

impl InputPoll for CrosstermInput {
    fn key_available(&mut self) -> Result<bool> {
        if self.pending.is_some() {
            return Ok(true);
        }
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if is_cancel_event(&event) {
                self.pending = Some(event);
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn consume_one(&mut self) -> Result<()> {
        if self.pending.take().is_some() {
            return Ok(());
        }
        if event::poll(Duration::ZERO)? {
            let _ = event::read()?;
        }
        Ok(())
    }
}
