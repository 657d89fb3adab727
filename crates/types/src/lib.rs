//! Shared data structures and tuning constants.
//!
//! Everything here is plain data with no dependencies, so the same definitions can be used by
//! the session engine, the computer player, and whatever renderer or input layer sits on top.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn column**: 3 for every piece
//!
//! # Timing Constants
//!
//! All timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DROP_INTERVAL_MS` | 800 | Gravity interval at level 1 |
//! | `LEVEL_SPEED_MULTIPLIER` | 0.9 | Interval factor applied per level |
//! | `MIN_DROP_INTERVAL_MS` | 50 | Gravity floor |
//! | `INPUT_INTERVAL_MS` | 120 | Minimum delay between two triggers of one action |
//! | `CPU_DECISION_INTERVAL_MS` | 400 | Computer player decision cadence |
//!
//! # Examples
//!
//! ```
//! use tetris_versus_types::{Action, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Action::from_str("hardDrop"), Some(Action::HardDrop));
//! assert_eq!(Action::HardDrop.index(), 5);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column every piece spawns at
pub const SPAWN_X: i8 = 3;

/// Gravity interval at level 1
pub const DROP_INTERVAL_MS: u32 = 800;

/// Gravity interval factor per level above 1
pub const LEVEL_SPEED_MULTIPLIER: f64 = 0.9;

/// Fastest gravity interval
pub const MIN_DROP_INTERVAL_MS: u32 = 50;

/// Minimum delay between two triggers of the same action
pub const INPUT_INTERVAL_MS: u32 = 120;

/// Computer player decision cadence
pub const CPU_DECISION_INTERVAL_MS: u32 = 400;

/// Lines needed per level step (`lines >= level * LINES_PER_LEVEL` levels up)
pub const LINES_PER_LEVEL: u32 = 10;

/// Level every round starts at
pub const START_LEVEL: u32 = 1;

/// Line clear base points, indexed by lines cleared and multiplied by the level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per cell for a successful soft drop step
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell descended by a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// Garbage rows sent for 0..=4 cleared lines
pub const ATTACK_TABLE: [u32; 5] = [0, 0, 1, 2, 4];

/// The seven tetromino piece kinds
///
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

/// An RGB display color.
pub type Rgb = (u8, u8, u8);

/// Color used for garbage rows.
pub const GARBAGE_COLOR: Rgb = (128, 128, 128);

impl PieceKind {
    /// All kinds, in a fixed order (used by randomizers).
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use tetris_versus_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Display color of this kind.
    pub fn color(&self) -> Rgb {
        match self {
            PieceKind::I => (0, 255, 255),
            PieceKind::O => (255, 255, 0),
            PieceKind::T => (128, 0, 128),
            PieceKind::S => (0, 255, 0),
            PieceKind::Z => (255, 0, 0),
            PieceKind::J => (0, 0, 255),
            PieceKind::L => (255, 165, 0),
        }
    }

    /// Stable 1-based code used by snapshot grids (0 means empty).
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North** (0): Spawn orientation
/// - **East** (1): Rotated 90° clockwise
/// - **South** (2): Rotated 180°
/// - **West** (3): Rotated 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use tetris_versus_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// ```
    /// use tetris_versus_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Clockwise state number (0..=3)
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for a state number, taken mod 4
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Number of clockwise quarter turns from `self` to `target` (0..=3)
    pub fn cw_steps_to(&self, target: Rotation) -> u8 {
        (target.index() + 4 - self.index()) % 4
    }

    /// Parse rotation from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "north" | "n", "east" | "e", "south" | "s", "west" | "w"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Some(Rotation::North),
            "east" | "e" => Some(Rotation::East),
            "south" | "s" => Some(Rotation::South),
            "west" | "w" => Some(Rotation::West),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Number of gameplay actions
pub const ACTION_COUNT: usize = 7;

/// Gameplay actions a player (human or computer) can trigger.
///
/// The discriminants are dense so per-action state can live in fixed arrays indexed by
/// [`Action::index`]. Pause and restart are session commands, not actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Drop piece to the lowest valid position and lock it
    HardDrop,
    /// Hold current piece (once per piece)
    Hold,
}

impl Action {
    /// Every action, in the order a session processes them within one update.
    pub const ALL: [Action; ACTION_COUNT] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::SoftDrop,
        Action::RotateCw,
        Action::RotateCcw,
        Action::HardDrop,
        Action::Hold,
    ];

    /// Dense array index
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse action from string
    ///
    /// ```
    /// use tetris_versus_types::Action;
    ///
    /// assert_eq!(Action::from_str("moveLeft"), Some(Action::MoveLeft));
    /// assert_eq!(Action::from_str("rotateCw"), Some(Action::RotateCw));
    /// assert_eq!(Action::from_str("pause"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Action::MoveLeft),
            "moveright" => Some(Action::MoveRight),
            "softdrop" => Some(Action::SoftDrop),
            "rotatecw" => Some(Action::RotateCw),
            "rotateccw" => Some(Action::RotateCcw),
            "harddrop" => Some(Action::HardDrop),
            "hold" => Some(Action::Hold),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::MoveLeft => "moveLeft",
            Action::MoveRight => "moveRight",
            Action::SoftDrop => "softDrop",
            Action::RotateCw => "rotateCw",
            Action::RotateCcw => "rotateCcw",
            Action::HardDrop => "hardDrop",
            Action::Hold => "hold",
        }
    }
}

/// What fills an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Locked mino of a player piece
    Piece(PieceKind),
    /// Row injected by an opponent's attack
    Garbage,
}

impl CellKind {
    /// Display color of the cell.
    pub fn color(&self) -> Rgb {
        match self {
            CellKind::Piece(kind) => kind.color(),
            CellKind::Garbage => GARBAGE_COLOR,
        }
    }

    /// Snapshot code: 1..=7 for piece kinds, 8 for garbage.
    pub fn code(&self) -> u8 {
        match self {
            CellKind::Piece(kind) => kind.code(),
            CellKind::Garbage => 8,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(CellKind)`: Occupied cell
pub type Cell = Option<CellKind>;
