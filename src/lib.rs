//! Tetris Versus (workspace facade crate).
//!
//! Re-exports the member crates under short names and hosts the headless runner used by the
//! `tetris-versus` binary.

pub mod headless;

pub use tetris_versus_core as core;
pub use tetris_versus_engine as engine;
pub use tetris_versus_input as input;
pub use tetris_versus_types as types;
