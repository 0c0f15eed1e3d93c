//! The effect runner state machine.
//!
//! ```text
//! Idle -> Running -> Cancelled | Expired | Completed | Aborted -> Idle
//! ```
//!
//! One `run` call owns the terminal, the input source and one screen buffer
//! for its whole lifetime. Each tick:
//!
//! 1. stop with `Expired` once the configured duration has elapsed
//! 2. stop with `Cancelled` if a key is pending (the key is consumed)
//! 3. re-query the terminal size; on change resize and re-`reset` the effect
//! 4. `step` the effect, then diff-flush the buffer
//! 5. stop with `Completed` if the effect reported [`Flow::Finished`]
//! 6. sleep out the rest of the frame interval
//!
//! Cleanup (reset colours, clear, show cursor, leave) runs on every exit path,
//! including errors and panics inside `step`. A panic is caught at the `run`
//! boundary and reported as [`RunOutcome::Aborted`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use tracing::{debug, info, warn};

use crate::clock::{elapsed_since, FrameClock};
use crate::core::{entropy_seed, Effect, Flow};
use crate::input::InputPoll;
use crate::session::TerminalSession;
use crate::term::{ScreenBuffer, Terminal};
use crate::types::RunOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Running,
    Cancelled,
    Expired,
    Completed,
    Aborted,
}

impl RunnerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunnerState::Idle => "idle",
            RunnerState::Running => "running",
            RunnerState::Cancelled => "cancelled",
            RunnerState::Expired => "expired",
            RunnerState::Completed => "completed",
            RunnerState::Aborted => "aborted",
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A key was pressed.
    Cancelled,
    /// The configured duration elapsed.
    Expired,
    /// The effect reached its natural end.
    Completed,
    /// A terminal, input or effect error stopped the run.
    Aborted,
}

impl RunOutcome {
    pub fn as_str(&self) -> &'static str {
        self.state().as_str()
    }

    fn state(&self) -> RunnerState {
        match self {
            RunOutcome::Cancelled => RunnerState::Cancelled,
            RunOutcome::Expired => RunnerState::Expired,
            RunOutcome::Completed => RunnerState::Completed,
            RunOutcome::Aborted => RunnerState::Aborted,
        }
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub effect: &'static str,
    pub outcome: RunOutcome,
    /// Frames stepped and flushed.
    pub frames: u64,
    pub elapsed: Duration,
    pub seed: u64,
    pub interval_ms: u32,
    /// Set only for [`RunOutcome::Aborted`].
    pub error: Option<anyhow::Error>,
}

pub struct EffectRunner<T: Terminal, I: InputPoll> {
    terminal: T,
    input: I,
    buffer: ScreenBuffer,
    state: RunnerState,
}

impl<T: Terminal, I: InputPoll> EffectRunner<T, I> {
    pub fn new(terminal: T, input: I) -> Self {
        Self {
            terminal,
            input,
            buffer: ScreenBuffer::new(0, 0),
            state: RunnerState::Idle,
        }
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// The buffer as of the last flushed frame.
    pub fn buffer(&self) -> &ScreenBuffer {
        &self.buffer
    }

    /// Drive `effect` until it is cancelled, expires, finishes or fails.
    ///
    /// Never returns an error: failures end the run with
    /// [`RunOutcome::Aborted`] and are kept in [`RunReport::error`].
    pub fn run(&mut self, effect: &mut dyn Effect, options: RunOptions) -> RunReport {
        let seed = options.seed.unwrap_or_else(entropy_seed);
        let interval_ms = options.effective_interval_ms(effect.default_interval_ms());
        let started = Instant::now();
        let mut frames = 0u64;

        self.state = RunnerState::Running;
        info!(
            effect = effect.name(),
            seed,
            interval_ms,
            duration_ms = ?options.duration_ms,
            "effect started"
        );

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.drive(&mut *effect, &options, seed, interval_ms, started, &mut frames)
        }))
        .unwrap_or_else(|payload| Err(anyhow!("effect panicked: {}", panic_message(&*payload))));
        let (outcome, error) = match result {
            Ok(outcome) => (outcome, None),
            Err(err) => {
                warn!(effect = effect.name(), frames, error = %err, "effect aborted");
                (RunOutcome::Aborted, Some(err))
            }
        };
        self.state = outcome.state();

        let elapsed = started.elapsed();
        info!(
            effect = effect.name(),
            outcome = outcome.as_str(),
            frames,
            elapsed_ms = elapsed.as_millis() as u64,
            "effect stopped"
        );
        self.state = RunnerState::Idle;

        RunReport {
            effect: effect.name(),
            outcome,
            frames,
            elapsed,
            seed,
            interval_ms,
            error,
        }
    }

    fn drive(
        &mut self,
        effect: &mut dyn Effect,
        options: &RunOptions,
        seed: u64,
        interval_ms: u32,
        started: Instant,
        frames: &mut u64,
    ) -> Result<RunOutcome> {
        let mut session = TerminalSession::begin(&mut self.terminal)?;

        let (width, height) = session.terminal().size()?;
        self.buffer.set_background(effect.background());
        self.buffer.resize(width, height);
        effect.reset(width, height, seed);

        let mut clock = FrameClock::new(interval_ms);
        let mut last_step: Option<Instant> = None;

        let outcome = loop {
            if let Some(limit) = options.duration_ms {
                if elapsed_since(started) >= limit {
                    break RunOutcome::Expired;
                }
            }

            if self.input.key_available()? {
                self.input.consume_one()?;
                break RunOutcome::Cancelled;
            }

            clock.tick(interval_ms);

            let size = session.terminal().size()?;
            if size != (self.buffer.width(), self.buffer.height()) {
                debug!(width = size.0, height = size.1, "terminal resized");
                self.buffer.resize(size.0, size.1);
                effect.reset(size.0, size.1, seed);
            }

            let now = Instant::now();
            let dt_ms = match last_step {
                Some(prev) => now.duration_since(prev).as_millis().min(u32::MAX as u128) as u32,
                None => interval_ms,
            };
            last_step = Some(now);

            let flow = effect.step(&mut self.buffer, dt_ms, *frames)?;
            self.buffer.flush(session.terminal())?;
            *frames += 1;

            if flow == Flow::Finished {
                break RunOutcome::Completed;
            }

            clock.wait_remainder();
        };

        session.close()?;
        Ok(outcome)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::effects::TunnelMarch;
    use crate::input::ScriptedInput;
    use crate::term::VirtualTerminal;

    #[test]
    fn test_runner_returns_to_idle() {
        let mut runner = EffectRunner::new(VirtualTerminal::new(20, 10), ScriptedInput::never());
        let mut tunnel = TunnelMarch::with_frame_limit(Some(2));
        let report = runner.run(&mut tunnel, RunOptions::default().with_seed(1));
        assert_eq!(report.outcome, RunOutcome::Completed);
        assert_eq!(report.frames, 2);
        assert_eq!(report.seed, 1);
        assert_eq!(runner.state(), RunnerState::Idle);
        assert!(report.error.is_none());
    }

    #[test]
    fn test_outcome_names() {
        assert_eq!(RunOutcome::Cancelled.as_str(), "cancelled");
        assert_eq!(RunOutcome::Aborted.as_str(), "aborted");
    }
}
