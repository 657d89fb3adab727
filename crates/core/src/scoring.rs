//! Scoring module - line clear points, drop points, leveling, gravity, and attack power
//!
//! Scoring follows the classic guideline values scaled by level:
//! single 100, double 300, triple 500, tetris 800 (times the current level, which starts at 1).
//! Soft drop pays 1 point per cell and hard drop 2 per cell.

use crate::config::MatchConfig;
use crate::types::{ATTACK_TABLE, HARD_DROP_POINTS, SOFT_DROP_POINTS};

/// Points for clearing `lines` rows at `level` using `table`
pub fn line_clear_score(lines: usize, level: u32, table: &[u32; 5]) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    table[lines].saturating_mul(level)
}

/// Points for a drop of `cells` rows
pub fn drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells * HARD_DROP_POINTS
    } else {
        cells * SOFT_DROP_POINTS
    }
}

/// Garbage rows sent to opponents for one clear
///
/// ```
/// use tetris_versus_core::scoring::attack_power;
///
/// assert_eq!(attack_power(1), 0);
/// assert_eq!(attack_power(2), 1);
/// assert_eq!(attack_power(4), 4);
/// ```
pub fn attack_power(lines_cleared: u32) -> u32 {
    ATTACK_TABLE
        .get(lines_cleared as usize)
        .copied()
        .unwrap_or(0)
}

/// Whether a round with `total_lines` cleared should leave `level`
pub fn qualifies_for_level_up(total_lines: u32, level: u32, lines_per_level: u32) -> bool {
    total_lines >= level.saturating_mul(lines_per_level)
}

/// Gravity interval for a level:
/// `max(floor, base * multiplier^(level - 1))`, truncated to whole milliseconds.
pub fn drop_interval_ms(level: u32, config: &MatchConfig) -> u32 {
    let steps = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    let scaled = config.drop_interval_ms as f64 * config.level_speed_multiplier.powi(steps);
    // Nudge past representation error so 800 * 0.9 lands on 720, not 719.
    let scaled = if scaled.is_finite() {
        (scaled + 1e-6) as u32
    } else {
        0
    };
    scaled.max(config.min_drop_interval_ms)
}
