//! Per-frame action state handed to a session.

use crate::types::{Action, ACTION_COUNT};

/// Which actions are asserted this frame.
///
/// Stored as a fixed array indexed by [`Action::index`], so lookups never hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionSnapshot {
    pressed: [bool; ACTION_COUNT],
}

impl ActionSnapshot {
    /// Snapshot with nothing asserted
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot asserting exactly one action
    pub fn single(action: Action) -> Self {
        let mut s = Self::new();
        s.press(action);
        s
    }

    /// Snapshot asserting every action in `actions`
    pub fn from_actions(actions: &[Action]) -> Self {
        let mut s = Self::new();
        for &a in actions {
            s.press(a);
        }
        s
    }

    pub fn press(&mut self, action: Action) {
        self.pressed[action.index()] = true;
    }

    pub fn release(&mut self, action: Action) {
        self.pressed[action.index()] = false;
    }

    pub fn set(&mut self, action: Action, asserted: bool) {
        self.pressed[action.index()] = asserted;
    }

    #[inline]
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed[action.index()]
    }

    /// Release everything
    pub fn clear(&mut self) {
        self.pressed = [false; ACTION_COUNT];
    }

    pub fn is_empty(&self) -> bool {
        !self.pressed.iter().any(|&p| p)
    }

    /// Asserted actions in processing order
    pub fn iter_pressed(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL
            .iter()
            .copied()
            .filter(move |a| self.pressed[a.index()])
    }
}
