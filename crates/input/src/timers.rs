//! Per-action debounce bookkeeping.
//!
//! Times are session-clock milliseconds. A session clock only advances while the session is
//! running, so paused time never counts toward an interval.

use crate::types::{Action, ACTION_COUNT, INPUT_INTERVAL_MS};

/// Last trigger time of every action plus the minimum delay between triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTimers {
    last_trigger_ms: [Option<u64>; ACTION_COUNT],
    interval_ms: u32,
}

impl ActionTimers {
    pub fn new() -> Self {
        Self::with_interval(INPUT_INTERVAL_MS)
    }

    pub fn with_interval(interval_ms: u32) -> Self {
        Self {
            last_trigger_ms: [None; ACTION_COUNT],
            interval_ms,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// True if `action` never fired or its interval has elapsed at `now_ms`.
    pub fn ready(&self, action: Action, now_ms: u64) -> bool {
        match self.last_trigger_ms[action.index()] {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms as u64,
        }
    }

    /// Record a trigger of `action` at `now_ms`.
    pub fn mark(&mut self, action: Action, now_ms: u64) {
        self.last_trigger_ms[action.index()] = Some(now_ms);
    }

    pub fn last_trigger_ms(&self, action: Action) -> Option<u64> {
        self.last_trigger_ms[action.index()]
    }

    /// Forget every trigger
    pub fn reset(&mut self) {
        self.last_trigger_ms = [None; ACTION_COUNT];
    }
}

impl Default for ActionTimers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untriggered_action_is_ready_at_time_zero() {
        let timers = ActionTimers::new();
        assert!(timers.ready(Action::MoveLeft, 0));
    }

    #[test]
    fn test_interval_blocks_until_elapsed() {
        let mut timers = ActionTimers::with_interval(120);
        timers.mark(Action::MoveLeft, 1_000);

        assert!(!timers.ready(Action::MoveLeft, 1_000));
        assert!(!timers.ready(Action::MoveLeft, 1_119));
        assert!(timers.ready(Action::MoveLeft, 1_120));

        // Other actions are independent.
        assert!(timers.ready(Action::MoveRight, 1_000));
    }

    #[test]
    fn test_reset_forgets_triggers() {
        let mut timers = ActionTimers::new();
        timers.mark(Action::Hold, 5);
        timers.reset();
        assert_eq!(timers.last_trigger_ms(Action::Hold), None);
        assert!(timers.ready(Action::Hold, 5));
    }
}
