//! Terminal input module (engine-facing).
//!
//! The engine needs exactly one thing from input: "has any key been pressed?",
//! asked without blocking once per frame, plus the ability to swallow that key
//! afterwards so it does not leak into whatever reads the terminal next.

pub mod map;
pub mod poll;
pub mod scripted;

pub use term_fx_types as types;

pub use map::{is_cancel_event, is_cancel_key};
pub use poll::{CrosstermInput, InputPoll};
pub use scripted::ScriptedInput;
