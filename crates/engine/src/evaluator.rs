//! Heuristic placement search.
//!
//! Every rotation and column of the active piece is dropped straight down from its current
//! row. Each landing spot is scored on the board it would leave behind (after full rows are
//! removed) with a weighted sum of five classic features, plus a small random jitter so
//! equal-looking boards do not always resolve the same way.

use serde::{Deserialize, Serialize};

use tetris_versus_core::board::{Board, HEIGHT, WIDTH};
use tetris_versus_core::{Piece, SimpleRng};
use tetris_versus_types::Rotation;

/// Search range of piece origins; a 4x4 box can hang up to three columns off either edge.
const X_MIN: i8 = -3;
const X_MAX: i8 = WIDTH as i8 + 3;

/// Computer skill level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn weights(self) -> Weights {
        match self {
            Difficulty::Easy => Weights::new(-0.5, 0.7, -0.3, -0.1, -0.2),
            Difficulty::Medium => Weights::new(-0.8, 1.0, -0.5, -0.3, -0.4),
            Difficulty::Hard => Weights::new(-1.2, 1.5, -0.8, -0.5, -0.6),
            Difficulty::Expert => Weights::new(-1.5, 2.0, -1.0, -0.8, -0.8),
        }
    }

    /// Half-width of the uniform noise added to every placement score
    pub fn jitter(self) -> f32 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Medium => 0.2,
            Difficulty::Hard | Difficulty::Expert => 0.1,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

/// Feature weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub height: f32,
    pub lines: f32,
    pub holes: f32,
    pub bumpiness: f32,
    pub wells: f32,
}

impl Weights {
    pub const fn new(height: f32, lines: f32, holes: f32, bumpiness: f32, wells: f32) -> Self {
        Self {
            height,
            lines,
            holes,
            bumpiness,
            wells,
        }
    }
}

/// Board features after a placement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlacementFeatures {
    /// Sum of column heights
    pub aggregate_height: u32,
    /// Full rows the placement completes
    pub lines: u32,
    /// Empty cells with a block somewhere above them in the same column
    pub holes: u32,
    /// Sum of height differences between neighbouring columns
    pub bumpiness: u32,
    /// Sum of triangular well depths, walls counting as infinitely high
    pub wells: u32,
}

/// A scored landing spot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
    /// Weighted score plus jitter; the search maximizes this
    pub score: f32,
    /// Weighted score without jitter
    pub base_score: f32,
    pub features: PlacementFeatures,
}

type Grid = [[bool; WIDTH]; HEIGHT];

/// Board features after locking `piece` on `board` and removing full rows.
///
/// Minos outside the grid are dropped, like a real lock.
pub fn placement_features(board: &Board, piece: &Piece) -> PlacementFeatures {
    let mut grid = board.occupancy();
    for (x, y) in piece.cells() {
        if (0..WIDTH as i8).contains(&x) && (0..HEIGHT as i8).contains(&y) {
            grid[y as usize][x as usize] = true;
        }
    }

    let lines = remove_full_rows(&mut grid);
    let heights = column_heights(&grid);

    PlacementFeatures {
        aggregate_height: heights.iter().sum(),
        lines,
        holes: count_holes(&grid),
        bumpiness: bumpiness(&heights),
        wells: wells(&heights),
    }
}

// ---------------- internal helpers ----------------

fn remove_full_rows(grid: &mut Grid) -> u32 {
    let mut write = HEIGHT;
    let mut removed = 0u32;
    for read in (0..HEIGHT).rev() {
        if grid[read].iter().all(|&c| c) {
            removed += 1;
            continue;
        }
        write -= 1;
        grid[write] = grid[read];
    }
    for row in grid.iter_mut().take(write) {
        *row = [false; WIDTH];
    }
    removed
}

fn column_heights(grid: &Grid) -> [u32; WIDTH] {
    let mut h = [0u32; WIDTH];
    for (c, height) in h.iter_mut().enumerate() {
        if let Some(r) = (0..HEIGHT).find(|&r| grid[r][c]) {
            *height = (HEIGHT - r) as u32;
        }
    }
    h
}

fn count_holes(grid: &Grid) -> u32 {
    let mut holes = 0u32;
    for c in 0..WIDTH {
        let mut covered = false;
        for row in grid.iter() {
            if row[c] {
                covered = true;
            } else if covered {
                holes += 1;
            }
        }
    }
    holes
}

fn bumpiness(heights: &[u32; WIDTH]) -> u32 {
    heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum()
}

fn wells(heights: &[u32; WIDTH]) -> u32 {
    let mut total = 0u32;
    for (i, &h) in heights.iter().enumerate() {
        let left = if i > 0 { heights[i - 1] } else { u32::MAX };
        let right = heights.get(i + 1).copied().unwrap_or(u32::MAX);
        let depth = left.min(right).saturating_sub(h);
        total += depth * (depth + 1) / 2;
    }
    total
}

/// Weighted placement search with per-evaluator jitter
#[derive(Debug, Clone)]
pub struct MoveEvaluator {
    weights: Weights,
    jitter: f32,
    rng: SimpleRng,
}

impl MoveEvaluator {
    pub fn new(difficulty: Difficulty, seed: u32) -> Self {
        Self::with_weights(difficulty.weights(), difficulty.jitter(), seed)
    }

    pub fn with_weights(weights: Weights, jitter: f32, seed: u32) -> Self {
        Self {
            weights,
            jitter: jitter.max(0.0),
            rng: SimpleRng::new(seed),
        }
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    pub fn jitter(&self) -> f32 {
        self.jitter
    }

    /// Deterministic part of a placement's score
    pub fn score_features(&self, f: &PlacementFeatures) -> f32 {
        let w = &self.weights;
        w.height * f.aggregate_height as f32
            + w.lines * f.lines as f32
            + w.holes * f.holes as f32
            + w.bumpiness * f.bumpiness as f32
            + w.wells * f.wells as f32
    }

    /// Best landing spot for `piece` on `board`, or `None` if nothing fits.
    ///
    /// Candidates are visited rotation-major then left to right; ties keep the first.
    pub fn best_move(&mut self, board: &Board, piece: &Piece) -> Option<Placement> {
        let mut best: Option<Placement> = None;

        for rotation in Rotation::ALL {
            for x in X_MIN..X_MAX {
                if x + 4 < 0 || x >= WIDTH as i8 {
                    continue;
                }
                let start = Piece::at(piece.kind, x, piece.y, rotation);
                let Some(landed) = drop_to_floor(board, start) else {
                    continue;
                };

                let features = placement_features(board, &landed);
                let base_score = self.score_features(&features);
                let score = base_score + self.rng.next_symmetric(self.jitter);

                if best.map_or(true, |b| score > b.score) {
                    best = Some(Placement {
                        x,
                        y: landed.y,
                        rotation,
                        score,
                        base_score,
                        features,
                    });
                }
            }
        }
        best
    }
}

/// Lowest valid position straight below `piece`, or `None` if `piece` itself does not fit
pub fn drop_to_floor(board: &Board, piece: Piece) -> Option<Piece> {
    if !board.is_valid_position(&piece) {
        return None;
    }
    let mut landed = piece;
    loop {
        let below = landed.shifted(0, 1);
        if !board.is_valid_position(&below) {
            return Some(landed);
        }
        landed = below;
    }
}
