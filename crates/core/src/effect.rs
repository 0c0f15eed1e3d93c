//! The effect capability.

use anyhow::Result;

use crate::term::ScreenBuffer;
use crate::types::{Color, DEFAULT_FRAME_MS};

/// What an effect wants after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep animating.
    Continue,
    /// The animation reached its natural end.
    Finished,
}

/// A self-contained animation driven one frame at a time.
///
/// `step` must not sleep, poll input or touch the terminal: pacing and
/// cancellation belong to the runner. Given the same `reset` arguments and
/// the same sequence of `step` arguments, an effect paints the same frames.
pub trait Effect {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Preferred frame interval in milliseconds.
    fn default_interval_ms(&self) -> u32 {
        DEFAULT_FRAME_MS
    }

    /// Background colour the runner clears the buffer to.
    fn background(&self) -> Color {
        Color::Black
    }

    /// (Re)initialise all state for a `width` x `height` screen.
    fn reset(&mut self, width: u16, height: u16, seed: u64);

    /// Advance one tick and paint into `buf`.
    fn step(&mut self, buf: &mut ScreenBuffer, dt_ms: u32, frame: u64) -> Result<Flow>;
}
