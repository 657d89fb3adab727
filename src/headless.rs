//! Headless computer-vs-computer rounds.
//!
//! Every seat is driven by a [`CpuPilot`] and the coordinator is stepped with a fixed frame
//! time until one seat is left standing or the frame budget runs out.

use serde::{Deserialize, Serialize};

use crate::core::logger::SharedLogger;
use crate::core::{Match, MatchConfig, MatchState, MatchStats};
use crate::engine::{CpuPilot, Difficulty, Outcome, Versus};

/// Round setup, loadable from JSON. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersusConfig {
    /// One entry per seat
    pub seats: Vec<Difficulty>,
    pub seed: u32,
    /// Simulated frame time
    pub frame_ms: u32,
    /// Frames before the round is called off
    pub max_frames: u32,
    #[serde(rename = "match")]
    pub match_config: MatchConfig,
}

impl Default for VersusConfig {
    fn default() -> Self {
        Self {
            seats: vec![Difficulty::Medium, Difficulty::Hard],
            seed: 1,
            frame_ms: 16,
            // Five minutes at ~60 fps
            max_frames: 18_750,
            match_config: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatSummary {
    pub difficulty: Difficulty,
    pub state: MatchState,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub stats: MatchStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    pub frames: u32,
    pub elapsed_ms: u64,
    pub outcome: Outcome,
    pub seats: Vec<SeatSummary>,
}

/// Seat `index` of a round built from `config`
pub fn build_seat(config: &VersusConfig, index: usize, logger: &SharedLogger) -> Match {
    let difficulty = config.seats.get(index).copied().unwrap_or_default();
    let seed = config.seed.wrapping_add(index as u32);
    let pilot = CpuPilot::new(difficulty, seed.wrapping_mul(0x0001_0001))
        .with_decision_interval(config.match_config.cpu_decision_interval_ms)
        .with_logger(logger.clone());

    Match::with_logger(seed, config.match_config.clone(), logger.clone()).with_pilot(Box::new(pilot))
}

/// Play one round to completion or until the frame budget is spent
pub fn run_round(config: &VersusConfig, logger: SharedLogger) -> RoundSummary {
    let seats = (0..config.seats.len())
        .map(|i| build_seat(config, i, &logger))
        .collect();
    let mut versus = Versus::with_logger(seats, logger);

    let mut frames = 0u32;
    while frames < config.max_frames && !versus.is_finished() {
        versus.update(&[], config.frame_ms);
        frames += 1;
    }

    summarize(config, &versus, frames)
}

fn summarize(config: &VersusConfig, versus: &Versus, frames: u32) -> RoundSummary {
    let seats = versus
        .seats()
        .iter()
        .enumerate()
        .map(|(i, game)| SeatSummary {
            difficulty: config.seats.get(i).copied().unwrap_or_default(),
            state: game.state(),
            score: game.score(),
            lines: game.lines(),
            level: game.level(),
            stats: *game.stats(),
        })
        .collect();

    RoundSummary {
        frames,
        elapsed_ms: frames as u64 * config.frame_ms as u64,
        outcome: versus.outcome(),
        seats,
    }
}
