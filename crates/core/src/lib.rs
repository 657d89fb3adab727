//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of one player's game: the board, the pieces and their SRS
//! rotation, scoring and leveling, garbage, and the [`Match`] session that ties them
//! together. It has no dependency on rendering, audio, or devices.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision checks, line clears, and garbage insertion
//! - [`pieces`]: Tetromino shapes, spawn cells, and kick tables
//! - [`rotation`]: Quarter-turn resolver that walks the kick table
//! - [`rng`]: Seeded generator plus uniform and seven-bag piece randomizers
//! - [`scoring`]: Line-clear points, drop points, gravity curve, attack power
//! - [`session`]: The [`Match`] state machine driven by input snapshots and elapsed time
//! - [`events`]: Per-update event report and running statistics
//! - [`config`]: Serde-loadable tuning with sensible defaults
//! - [`logger`]: Injected logging sink, silent by default
//!
//! # Game Rules
//!
//! - **Uniform randomizer** by default, seven-bag available through [`MatchConfig`]
//! - **SRS rotation**: five kick offsets per transition for every kind but O
//! - **No lock delay**: a piece locks on the gravity step that finds it grounded
//! - **Hold**: once per piece; the held kind respawns at its spawn cell
//! - **Scoring**: 100/300/500/800 times level for 1-4 lines, 1 per soft-drop row,
//!   2 per hard-drop row
//! - **Attack**: doubles send 1 row, triples 2, tetrises 4
//!
//! # Example
//!
//! ```
//! use tetris_versus_core::input::ActionSnapshot;
//! use tetris_versus_core::types::Action;
//! use tetris_versus_core::Match;
//!
//! let mut game = Match::new(12345);
//!
//! let events = game.update(&ActionSnapshot::single(Action::HardDrop), 16);
//! assert!(events.piece_locked);
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Each match keeps its own millisecond clock that [`Match::update`] advances by the frame
//! delta while the match is running. Gravity starts at 800 ms per row and shrinks by a factor
//! of 0.9 per level down to 50 ms. The same action can only fire again after 120 ms.

pub mod board;
pub mod config;
pub mod events;
pub mod logger;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tetris_versus_input as input;
pub use tetris_versus_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use config::MatchConfig;
pub use events::{MatchEvents, MatchStats};
pub use logger::{GameLogger, NoopLogger, SharedLogger, TracingLogger};
pub use pieces::{get_shape, kick_offsets, Piece};
pub use rng::{PieceQueue, Randomizer, SimpleRng};
pub use rotation::try_rotate;
pub use scoring::attack_power;
pub use session::{Match, MatchState, Pilot, PlayerMode};
pub use snapshot::{ActiveSnapshot, MatchSnapshot};
