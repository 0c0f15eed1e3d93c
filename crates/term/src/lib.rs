//! Terminal rendering module.
//!
//! This is a small, effect-oriented rendering layer. Effects paint into a
//! [`ScreenBuffer`]; the buffer diffs against the last flushed frame and sends
//! only the changed cells through the [`Terminal`] capability trait.
//!
//! Goals:
//! - Keep effect code free of terminal I/O so it stays deterministic
//! - Centralise flicker-free redraw in one diffing flush
//! - Make the terminal an explicit object, never ambient global state

pub mod backend;
pub mod fb;
pub mod renderer;
pub mod virtual_term;

pub use term_fx_types as types;

pub use backend::Terminal;
pub use fb::ScreenBuffer;
pub use renderer::CrosstermTerminal;
pub use virtual_term::{TerminalStats, VirtualTerminal};
