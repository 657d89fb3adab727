//! Input timing layer (engine-facing).
//!
//! This crate is independent of any device or UI framework. An external mapping layer turns
//! keyboard or gamepad state into an [`ActionSnapshot`] each frame; sessions keep an
//! [`ActionTimers`] to debounce repeated triggers of the same action.

pub mod snapshot;
pub mod timers;

pub use tetris_versus_types as types;

pub use snapshot::ActionSnapshot;
pub use timers::ActionTimers;
