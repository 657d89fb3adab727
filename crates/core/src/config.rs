//! Session tuning.
//!
//! Defaults come from the constants in the types crate. Every field is optional when
//! deserializing, so a config file only needs the values it changes.

use serde::{Deserialize, Serialize};

use crate::rng::Randomizer;
use crate::types::{
    CPU_DECISION_INTERVAL_MS, DROP_INTERVAL_MS, INPUT_INTERVAL_MS, LEVEL_SPEED_MULTIPLIER,
    LINES_PER_LEVEL, LINE_SCORES, MIN_DROP_INTERVAL_MS,
};

/// Timing, scoring, and randomizer settings for one [`crate::Match`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Gravity interval at level 1
    pub drop_interval_ms: u32,
    /// Interval factor per level above 1
    pub level_speed_multiplier: f64,
    /// Gravity floor
    pub min_drop_interval_ms: u32,
    /// Debounce between two triggers of the same action
    pub input_interval_ms: u32,
    /// Computer player decision cadence
    pub cpu_decision_interval_ms: u32,
    /// Lines per level step
    pub lines_per_level: u32,
    /// Base points indexed by lines cleared
    pub line_scores: [u32; 5],
    pub randomizer: Randomizer,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            drop_interval_ms: DROP_INTERVAL_MS,
            level_speed_multiplier: LEVEL_SPEED_MULTIPLIER,
            min_drop_interval_ms: MIN_DROP_INTERVAL_MS,
            input_interval_ms: INPUT_INTERVAL_MS,
            cpu_decision_interval_ms: CPU_DECISION_INTERVAL_MS,
            lines_per_level: LINES_PER_LEVEL,
            line_scores: LINE_SCORES,
            randomizer: Randomizer::Uniform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg: MatchConfig =
            serde_json::from_str(r#"{ "drop_interval_ms": 500, "randomizer": "seven_bag" }"#)
                .expect("valid config");
        assert_eq!(cfg.drop_interval_ms, 500);
        assert_eq!(cfg.randomizer, Randomizer::SevenBag);
        assert_eq!(cfg.input_interval_ms, INPUT_INTERVAL_MS);
        assert_eq!(cfg.line_scores, LINE_SCORES);
    }

    #[test]
    fn test_default_roundtrips_through_json() {
        let cfg = MatchConfig::default();
        let json = serde_json::to_string(&cfg).expect("serialize");
        let back: MatchConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(cfg, back);
    }
}
