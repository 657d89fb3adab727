//! Per-update event report and per-match statistics.

use serde::Serialize;

use crate::board::ClearedRows;

/// What happened during one [`crate::Match::update`] call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchEvents {
    pub piece_moved: bool,
    pub piece_rotated: bool,
    pub soft_drop: bool,
    pub hard_drop: bool,
    pub piece_locked: bool,
    pub piece_held: bool,
    pub lines_cleared: u32,
    /// Rows removed by the lock, top to bottom
    pub cleared_line_indices: ClearedRows,
    pub level_up: bool,
    /// Set on the update that ended the match
    pub game_over: bool,
}

impl MatchEvents {
    /// True when nothing was reported
    pub fn is_empty(&self) -> bool {
        !(self.piece_moved
            || self.piece_rotated
            || self.soft_drop
            || self.hard_drop
            || self.piece_locked
            || self.piece_held
            || self.level_up
            || self.game_over)
            && self.lines_cleared == 0
    }

    /// Fold a lock outcome into this report
    pub(crate) fn absorb_lock(&mut self, lock: LockOutcome) {
        self.piece_locked = true;
        self.lines_cleared += lock.lines;
        if lock.lines > 0 {
            self.cleared_line_indices = lock.rows;
        }
        self.level_up |= lock.level_up;
        self.game_over |= lock.game_over;
    }
}

/// Result of locking one piece
#[derive(Debug, Clone, Default)]
pub(crate) struct LockOutcome {
    pub lines: u32,
    pub rows: ClearedRows,
    pub level_up: bool,
    pub game_over: bool,
}

/// Running counters for one match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub pieces_placed: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub tetrises: u32,
    pub garbage_sent: u32,
    pub garbage_received: u32,
}

impl MatchStats {
    /// Bump the clear-size counter for an `n`-line clear
    pub fn record_clear(&mut self, lines: u32) {
        match lines {
            1 => self.singles += 1,
            2 => self.doubles += 1,
            3 => self.triples += 1,
            4 => self.tetrises += 1,
            _ => {}
        }
    }

    pub fn total_clears(&self) -> u32 {
        self.singles + self.doubles + self.triples + self.tetrises
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_events_are_empty() {
        let events = MatchEvents::default();
        assert!(events.is_empty());

        let moved = MatchEvents {
            piece_moved: true,
            ..Default::default()
        };
        assert!(!moved.is_empty());

        let cleared = MatchEvents {
            lines_cleared: 1,
            ..Default::default()
        };
        assert!(!cleared.is_empty());
    }

    #[test]
    fn test_record_clear_buckets() {
        let mut stats = MatchStats::default();
        for lines in [0, 1, 2, 2, 3, 4, 4, 4] {
            stats.record_clear(lines);
        }
        assert_eq!(stats.singles, 1);
        assert_eq!(stats.doubles, 2);
        assert_eq!(stats.triples, 1);
        assert_eq!(stats.tetrises, 3);
        assert_eq!(stats.total_clears(), 7);
    }

    #[test]
    fn test_events_serialize_rows() {
        let mut events = MatchEvents::default();
        events.absorb_lock(LockOutcome {
            lines: 2,
            rows: [18, 19].into_iter().collect(),
            level_up: false,
            game_over: false,
        });
        let json = serde_json::to_value(&events).expect("serialize");
        assert_eq!(json["lines_cleared"], 2);
        assert_eq!(json["cleared_line_indices"], serde_json::json!([18, 19]));
        assert_eq!(json["piece_locked"], true);
    }
}
