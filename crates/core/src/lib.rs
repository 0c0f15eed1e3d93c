//! Core effect logic - pure, deterministic, and testable
//!
//! This crate contains every animation and the registry that builds them by
//! name. Effects only ever paint into a [`ScreenBuffer`](term::ScreenBuffer);
//! they never sleep, poll input or talk to the terminal, which makes them:
//!
//! - **Deterministic**: Same seed and same step arguments produce identical frames
//! - **Testable**: A step can be inspected cell by cell without a terminal
//! - **Portable**: The runner decides pacing and where frames end up
//!
//! # Module Structure
//!
//! - [`effect`]: The [`Effect`] trait and [`Flow`]
//! - [`effects`]: Built-in animations (Life, Lorenz, fountain, tunnel, fire, ...)
//! - [`registry`]: Case-insensitive name/alias lookup with typed argument parsing
//! - [`rng`]: Seeded generator owned by each effect
//!
//! # Example
//!
//! ```
//! use term_fx_core::{EffectRegistry, Flow};
//! use term_fx_core::term::ScreenBuffer;
//!
//! let registry = EffectRegistry::builtin();
//! let mut life = registry.create("life", &[]).unwrap();
//!
//! let mut buf = ScreenBuffer::new(40, 20);
//! life.reset(40, 20, 42);
//! assert_eq!(life.step(&mut buf, 100, 0).unwrap(), Flow::Continue);
//! assert!(buf.cells().iter().any(|c| c.ch == 'O'));
//! ```

pub mod effect;
pub mod effects;
pub mod registry;
pub mod rng;

pub use term_fx_term as term;
pub use term_fx_types as types;

// Re-export commonly used types for convenience
pub use effect::{Effect, Flow};
pub use registry::{EffectEntry, EffectFactory, EffectRegistry, RegistryError};
pub use rng::{entropy_seed, SimpleRng};
