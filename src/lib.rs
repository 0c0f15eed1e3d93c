//! Terminal effects (workspace facade crate).
//!
//! Re-exports the member crates as `term_fx::{types,term,input,core,engine}` so
//! the binary, benches and integration tests depend on one package while the
//! implementation lives in dedicated crates under `crates/`.

pub use term_fx_core as core;
pub use term_fx_engine as engine;
pub use term_fx_input as input;
pub use term_fx_term as term;
pub use term_fx_types as types;
