//! Computer players and multi-seat play on top of the core rules.
//!
//! - [`evaluator`]: heuristic placement search with difficulty presets
//! - [`planner`]: turns a placement into actions, or applies it directly to a match
//! - [`cpu`]: [`CpuPilot`], the decision-cadence controller plugged into a match
//! - [`versus`]: [`Versus`], which routes garbage between seats and picks the winner

pub mod cpu;
pub mod evaluator;
pub mod planner;
pub mod versus;

pub use cpu::CpuPilot;
pub use evaluator::{Difficulty, MoveEvaluator, Placement, PlacementFeatures, Weights};
pub use planner::{apply_place, plan_actions, Plan, PlanError};
pub use versus::{Outcome, Versus};
