//! Rotation with SRS wall kicks.

use crate::board::Board;
use crate::pieces::{kick_offsets, Piece};

/// Try to rotate `piece` a quarter turn on `board`.
///
/// The candidate keeps the piece position and takes the new rotation; kick offsets for the
/// transition are tried in table order and the first valid placement wins. Returns the
/// rotated copy together with the offset used, or `None` when every offset collides (the
/// input piece is never touched).
pub fn try_rotate(board: &Board, piece: &Piece, clockwise: bool) -> Option<(Piece, (i8, i8))> {
    let new_rotation = if clockwise {
        piece.rotation.rotate_cw()
    } else {
        piece.rotation.rotate_ccw()
    };
    let candidate = piece.rotated_to(new_rotation);

    kick_offsets(piece.kind, piece.rotation, clockwise)
        .iter()
        .map(|&(dx, dy)| (candidate.shifted(dx, dy), (dx, dy)))
        .find(|(trial, _)| board.is_valid_position(trial))
}
