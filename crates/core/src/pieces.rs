//! Pieces module - Tetromino shapes, spawn cells, and SRS kick tables
//!
//! Every shape is four mino offsets inside a 4x4 box whose top-left corner is the piece
//! position. Coordinates grow right (x) and down (y).
//! Reference: https://tetris.wiki/SRS

use crate::types::{PieceKind, Rotation, SPAWN_X};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// A tetromino placement: kind plus position and rotation.
///
/// `Piece` is a small value type. Trial moves and rotations always work on copies and only a
/// validated copy ever replaces a session's active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece at its kind's spawn cell, North rotation
    pub fn new(kind: PieceKind) -> Self {
        let (x, y) = spawn_position(kind);
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Create a piece at an explicit placement
    pub fn at(kind: PieceKind, x: i8, y: i8, rotation: Rotation) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
        }
    }

    /// Mino offsets for the current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four minos
    pub fn cells(&self) -> [(i8, i8); 4] {
        let shape = self.shape();
        let mut out = [(0i8, 0i8); 4];
        for (o, (dx, dy)) in out.iter_mut().zip(shape) {
            *o = (self.x + dx, self.y + dy);
        }
        out
    }

    /// Copy shifted by `(dx, dy)`
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Copy with a different rotation at the same position
    pub fn rotated_to(&self, rotation: Rotation) -> Self {
        Self { rotation, ..*self }
    }
}

/// Spawn cell `(x, y)` for a piece kind.
///
/// The I piece sits one row higher because its horizontal bar lives on row 1 of its box;
/// this puts the top mino row of every kind on board row 0.
pub fn spawn_position(kind: PieceKind) -> (i8, i8) {
    match kind {
        PieceKind::I => (SPAWN_X, -1),
        _ => (SPAWN_X, 0),
    }
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => get_o_shape(rotation),
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// I piece shapes
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        // N: horizontal, row 1
        Rotation::North => [(0, 1), (1, 1), (2, 1), (3, 1)],
        // E: vertical, column 2
        Rotation::East => [(2, 0), (2, 1), (2, 2), (2, 3)],
        // S: horizontal, row 2
        Rotation::South => [(0, 2), (1, 2), (2, 2), (3, 2)],
        // W: vertical, column 1
        Rotation::West => [(1, 0), (1, 1), (1, 2), (1, 3)],
    }
}

/// O piece shapes (same for all rotations)
fn get_o_shape(_rotation: Rotation) -> PieceShape {
    [(1, 0), (2, 0), (1, 1), (2, 1)]
}

fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (2, 2)],
        Rotation::South => [(1, 1), (2, 1), (0, 2), (1, 2)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::East => [(2, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (1, 2), (2, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (0, 2)],
    }
}

fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
    }
}

fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (0, 2)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// Kick-table group a piece kind belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickGroup {
    I,
    O,
    Jlstz,
}

impl KickGroup {
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => KickGroup::I,
            PieceKind::O => KickGroup::O,
            _ => KickGroup::Jlstz,
        }
    }
}

/// One row of the SRS tables: 5 offsets, tried in order
type KickRow = [(i8, i8); 5];

/// A 2x2 square has nothing to kick.
const O_KICKS: [(i8, i8); 1] = [(0, 0)];

/// JLSTZ kick table (shared by J, L, S, T, Z), indexed by [`transition_index`]
const JLSTZ_KICKS: [KickRow; 8] = [
    // 0->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 1->0
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->2
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->2
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 3->0
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

/// I piece kick table, indexed by [`transition_index`]
const I_KICKS: [KickRow; 8] = [
    // 0->1
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1->0
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->1
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->2
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 0->3
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// Row of the JLSTZ/I tables for a single quarter-turn transition.
fn transition_index(from: Rotation, clockwise: bool) -> usize {
    match (from, clockwise) {
        (Rotation::North, true) => 0,  // 0->1
        (Rotation::East, false) => 1,  // 1->0
        (Rotation::East, true) => 2,   // 1->2
        (Rotation::South, false) => 3, // 2->1
        (Rotation::South, true) => 4,  // 2->3
        (Rotation::West, false) => 5,  // 3->2
        (Rotation::West, true) => 6,   // 3->0
        (Rotation::North, false) => 7, // 0->3
    }
}

/// Ordered kick offsets to try when rotating `kind` out of `from`.
///
/// The first entry is always `(0, 0)` (plain rotation in place).
pub fn kick_offsets(kind: PieceKind, from: Rotation, clockwise: bool) -> &'static [(i8, i8)] {
    match KickGroup::of(kind) {
        KickGroup::O => &O_KICKS,
        KickGroup::I => &I_KICKS[transition_index(from, clockwise)],
        KickGroup::Jlstz => &JLSTZ_KICKS[transition_index(from, clockwise)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_new_uses_spawn_cell() {
        let t = Piece::new(PieceKind::T);
        assert_eq!((t.x, t.y), (3, 0));
        assert_eq!(t.rotation, Rotation::North);

        let i = Piece::new(PieceKind::I);
        assert_eq!((i.x, i.y), (3, -1));
    }

    #[test]
    fn test_every_spawn_touches_row_zero() {
        for kind in PieceKind::ALL {
            let top = Piece::new(kind).cells().iter().map(|&(_, y)| y).min();
            assert_eq!(top, Some(0), "{:?} should spawn with its top row on row 0", kind);
        }
    }

    #[test]
    fn test_cells_are_absolute() {
        let p = Piece::at(PieceKind::O, 4, 10, Rotation::North);
        assert_eq!(p.cells(), [(5, 10), (6, 10), (5, 11), (6, 11)]);
    }

    #[test]
    fn test_shifted_and_rotated_leave_original_untouched() {
        let p = Piece::new(PieceKind::L);
        let moved = p.shifted(1, 2);
        let turned = p.rotated_to(Rotation::South);

        assert_eq!((p.x, p.y, p.rotation), (3, 0, Rotation::North));
        assert_eq!((moved.x, moved.y), (4, 2));
        assert_eq!(turned.rotation, Rotation::South);
        assert_eq!((turned.x, turned.y), (p.x, p.y));
    }

    #[test]
    fn test_kick_rows_have_five_offsets_except_o() {
        for kind in PieceKind::ALL {
            for from in Rotation::ALL {
                for cw in [true, false] {
                    let kicks = kick_offsets(kind, from, cw);
                    let expected = if kind == PieceKind::O { 1 } else { 5 };
                    assert_eq!(kicks.len(), expected);
                    assert_eq!(kicks[0], (0, 0));
                }
            }
        }
    }

    #[test]
    fn test_kick_table_order_matches_srs() {
        assert_eq!(
            kick_offsets(PieceKind::T, Rotation::North, true),
            &[(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]
        );
        assert_eq!(
            kick_offsets(PieceKind::I, Rotation::West, true),
            &[(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)]
        );
        assert_eq!(
            kick_offsets(PieceKind::J, Rotation::North, false),
            &[(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]
        );
    }
}
