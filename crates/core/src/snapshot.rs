use crate::board::{HEIGHT, WIDTH};
use crate::events::MatchStats;
use crate::pieces::Piece;
use crate::session::MatchState;
use crate::types::{PieceKind, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Render-ready copy of a match.
///
/// `board` holds color codes: 0 empty, 1..=7 piece kinds, 8 garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSnapshot {
    pub board: [[u8; WIDTH]; HEIGHT],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub state: MatchState,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub stats: MatchStats,
}

impl MatchSnapshot {
    pub fn playable(&self) -> bool {
        self.state == MatchState::Running
    }

    /// Color code at `(x, y)`, including the active piece on top of the board
    pub fn code_at(&self, x: usize, y: usize) -> u8 {
        if let Some(active) = self.active {
            let piece = Piece::at(active.kind, active.x, active.y, active.rotation);
            let hit = piece
                .cells()
                .iter()
                .any(|&(cx, cy)| cx as isize == x as isize && cy as isize == y as isize);
            if hit {
                return active.kind.code();
            }
        }
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for MatchSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; WIDTH]; HEIGHT],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            hold: None,
            can_hold: true,
            state: MatchState::Running,
            piece_id: 0,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
            stats: MatchStats::default(),
        }
    }
}
