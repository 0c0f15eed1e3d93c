//! Frame-loop engine: pacing, cancellation and terminal lifetime.
//!
//! The engine owns nothing effect-specific. It resolves [`RunOptions`]
//! (interval, duration, seed), enters the terminal, drives an
//! [`Effect`](core::Effect) tick by tick and always restores the terminal.
//!
//! [`RunOptions`]: types::RunOptions

pub mod clock;
pub mod runner;
pub mod session;

pub use term_fx_core as core;
pub use term_fx_input as input;
pub use term_fx_term as term;
pub use term_fx_types as types;

pub use clock::{elapsed_since, remaining_after, FrameClock};
pub use runner::{EffectRunner, RunOutcome, RunReport, RunnerState};
pub use session::TerminalSession;
