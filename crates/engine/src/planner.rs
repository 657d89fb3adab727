use arrayvec::ArrayVec;

use tetris_versus_core::{Match, MatchEvents, Piece};
use tetris_versus_types::{Action, Rotation, BOARD_WIDTH};

/// Longest action sequence a single placement can need
pub const MAX_PLAN_LEN: usize = 32;

/// Actions that walk the active piece to a placement, in execution order
pub type Plan = ArrayVec<Action, MAX_PLAN_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("hold requested when unavailable")]
    HoldUnavailable,
    #[error("could not rotate to target rotation")]
    RotationBlocked,
    #[error("target x would place piece out of bounds")]
    XOutOfBounds,
    #[error("could not move to target x due to collision")]
    XBlocked,
    #[error("game is not playable")]
    NotPlayable,
    #[error("no active piece")]
    NoActive,
    #[error("placement needs more steps than a plan holds")]
    PlanTooLong,
}

impl PlanError {
    pub fn code(self) -> &'static str {
        match self {
            PlanError::HoldUnavailable => "hold_unavailable",
            PlanError::PlanTooLong => "plan_too_long",
            PlanError::RotationBlocked
            | PlanError::XOutOfBounds
            | PlanError::XBlocked
            | PlanError::NotPlayable
            | PlanError::NoActive => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlanError::HoldUnavailable => "hold requested when unavailable",
            PlanError::RotationBlocked => "could not rotate to target rotation",
            PlanError::XOutOfBounds => "target x would place piece out of bounds",
            PlanError::XBlocked => "could not move to target x due to collision",
            PlanError::NotPlayable => "game is not playable",
            PlanError::NoActive => "no active piece",
            PlanError::PlanTooLong => "placement needs more steps than a plan holds",
        }
    }
}

/// Rotation steps from `from` to `to`: one CW, two CW, or one CCW.
pub fn rotation_steps(from: Rotation, to: Rotation) -> &'static [Action] {
    match from.cw_steps_to(to) {
        1 => &[Action::RotateCw],
        2 => &[Action::RotateCw, Action::RotateCw],
        3 => &[Action::RotateCcw],
        _ => &[],
    }
}

/// Build the action sequence from `active` to `(target_x, target_rot)`.
///
/// Rotation first, then one step per column, then a hard drop. The sequence is computed
/// from the piece alone; kicks that shift the piece while rotating are not anticipated.
pub fn plan_actions(active: &Piece, target_x: i8, target_rot: Rotation) -> Result<Plan, PlanError> {
    let mut plan = Plan::new();
    let mut push = |action| plan.try_push(action).map_err(|_| PlanError::PlanTooLong);

    for &action in rotation_steps(active.rotation, target_rot) {
        push(action)?;
    }

    let dx = target_x as i16 - active.x as i16;
    let step = if dx > 0 { Action::MoveRight } else { Action::MoveLeft };
    for _ in 0..dx.unsigned_abs() {
        push(step)?;
    }

    push(Action::HardDrop)?;
    Ok(plan)
}

/// Drive `game` to a placement immediately, bypassing input timing.
///
/// Each step must succeed; the first failure is returned and leaves the piece wherever it
/// got to. On success the piece is hard-dropped and the lock's events are returned.
pub fn apply_place(
    game: &mut Match,
    target_x: i8,
    target_rot: Rotation,
    use_hold: bool,
) -> Result<MatchEvents, PlanError> {
    if game.is_paused() || game.is_game_over() {
        return Err(PlanError::NotPlayable);
    }

    // Hold first if requested.
    if use_hold && !game.apply_action(Action::Hold).piece_held {
        return Err(PlanError::HoldUnavailable);
    }
    if game.is_game_over() {
        return Err(PlanError::NotPlayable);
    }

    let Some(active) = game.active() else {
        return Err(PlanError::NoActive);
    };

    for &action in rotation_steps(active.rotation, target_rot) {
        if !game.apply_action(action).piece_rotated {
            return Err(PlanError::RotationBlocked);
        }
    }

    let Some(active) = game.active() else {
        return Err(PlanError::NoActive);
    };

    // Validate x bounds based on current shape.
    let shape = active.shape();
    let min_dx = shape.iter().map(|&(dx, _)| dx as i16).min().unwrap_or(0);
    let max_dx = shape.iter().map(|&(dx, _)| dx as i16).max().unwrap_or(0);
    let target = target_x as i16;
    if target + min_dx < 0 || target + max_dx >= BOARD_WIDTH as i16 {
        return Err(PlanError::XOutOfBounds);
    }

    let dx = target_x - active.x;
    let step = if dx > 0 { Action::MoveRight } else { Action::MoveLeft };
    for _ in 0..dx.unsigned_abs() {
        if !game.apply_action(step).piece_moved {
            return Err(PlanError::XBlocked);
        }
    }

    Ok(game.apply_action(Action::HardDrop))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_versus_types::{CellKind, PieceKind};

    #[test]
    fn test_rotation_steps_table() {
        assert!(rotation_steps(Rotation::North, Rotation::North).is_empty());
        assert_eq!(rotation_steps(Rotation::North, Rotation::East), &[Action::RotateCw]);
        assert_eq!(
            rotation_steps(Rotation::East, Rotation::West),
            &[Action::RotateCw, Action::RotateCw]
        );
        assert_eq!(rotation_steps(Rotation::North, Rotation::West), &[Action::RotateCcw]);
    }

    #[test]
    fn test_plan_rotates_then_moves_then_drops() {
        let piece = Piece::new(PieceKind::T);
        let plan = plan_actions(&piece, 0, Rotation::West).expect("plan");
        assert_eq!(
            plan.as_slice(),
            &[
                Action::RotateCcw,
                Action::MoveLeft,
                Action::MoveLeft,
                Action::MoveLeft,
                Action::HardDrop
            ]
        );

        let plan = plan_actions(&piece, 5, Rotation::North).expect("plan");
        assert_eq!(
            plan.as_slice(),
            &[Action::MoveRight, Action::MoveRight, Action::HardDrop]
        );
    }

    #[test]
    fn test_place_rejected_when_paused() {
        let mut game = Match::new(1);
        game.pause();

        let a = game.active().expect("expected active piece");
        let err = apply_place(&mut game, a.x, a.rotation, false).unwrap_err();
        assert_eq!(err, PlanError::NotPlayable);
        assert_eq!(err.code(), "invalid_place");
        assert_eq!(err.to_string(), err.message());
    }

    #[test]
    fn test_place_rejected_when_x_out_of_bounds() {
        let mut game = Match::new(1);
        let a = game.active().expect("expected active piece");
        let err = apply_place(&mut game, -50, a.rotation, false).unwrap_err();
        assert_eq!(err, PlanError::XOutOfBounds);
    }

    #[test]
    fn test_place_rejects_extreme_x_without_overflow() {
        for x in [i8::MAX, i8::MAX - 1, i8::MIN] {
            let mut game = Match::new(1);
            let err = apply_place(&mut game, x, Rotation::North, false).unwrap_err();
            assert_eq!(err, PlanError::XOutOfBounds);
        }
    }

    #[test]
    fn test_place_rejected_when_x_blocked_by_collision() {
        let mut game = Match::new(1);
        assert!(game.set_active(Piece::new(PieceKind::O)));
        // The O spawns on columns 4 and 5; wall off column 3 beside it.
        game.board_mut().set(3, 1, Some(CellKind::Garbage));

        let err = apply_place(&mut game, 0, Rotation::North, false).unwrap_err();
        assert_eq!(err, PlanError::XBlocked);
    }

    #[test]
    fn test_second_hold_is_rejected() {
        let mut game = Match::new(4);
        game.apply_action(Action::Hold);
        let a = game.active().expect("expected active piece");
        let err = apply_place(&mut game, a.x, a.rotation, true).unwrap_err();
        assert_eq!(err, PlanError::HoldUnavailable);
        assert_eq!(err.code(), "hold_unavailable");
    }

    #[test]
    fn test_place_locks_at_target() {
        let mut game = Match::new(2);
        assert!(game.set_active(Piece::new(PieceKind::I)));

        let events = apply_place(&mut game, 6, Rotation::East, false).expect("placed");
        assert!(events.piece_locked);
        assert!(events.hard_drop);
        // I East fills box column 2.
        for y in 16..20 {
            assert!(game.board().is_occupied(8, y));
        }
    }
}
