//! Core types module - shared data structures and rule constants
//!
//! Pure data shared by the engine, the input layer, and the terminal view.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Coordinates are `(x, y)` with
//! `x` growing to the right and `y` growing downwards; row 0 is the top row.
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LOCK_BONUS` | 10 | Points awarded for every lock |
//! | `LINE_SCORES` | 0/100/300/500/800 | Points for 0..=4 rows cleared at once |
//! | `LEVEL_SCORE_STEP` | 300 | Score span of one speed level |
//! | `BASE_TICK_MS` | 300 | Tick interval numerator for the driver |
//! | `SPEED_FACTOR` | 1.2 | Per-level speed multiplier for the driver |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.letter(), 'T');
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! assert_eq!(DEFAULT_BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default board height in cells
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

/// Points awarded each time a piece locks, regardless of its shape
pub const LOCK_BONUS: u32 = 10;

/// Line clear scoring table, indexed by rows cleared in one pass
///
/// Counts above 4 are clamped to the last entry by the scorer.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Score span of one speed level (level N starts once `score / 300 >= N - 1`)
pub const LEVEL_SCORE_STEP: u32 = 300;

/// Tick interval at level 1 before the speed factor is applied
pub const BASE_TICK_MS: u32 = 300;

/// Driver cadence divisor per level: `BASE_TICK_MS / (level * SPEED_FACTOR)`
pub const SPEED_FACTOR: f64 = 1.2;

/// The seven piece kinds
///
/// Each kind has a fixed canonical shape (see `blockfall_core::pieces`) and a
/// display color:
/// - **I**: Cyan
/// - **O**: Yellow
/// - **T**: Purple
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in table order.
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
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Self::from_letter(ch),
            _ => None,
        }
    }

    /// Parse a single tag letter (case-insensitive).
    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase tag letter stored on the board for this kind.
    pub fn letter(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Display color as a CSS hex string.
    pub fn color_hex(&self) -> &'static str {
        match self {
            PieceKind::I => "#00f0f0",
            PieceKind::O => "#f0f000",
            PieceKind::T => "#a000f0",
            PieceKind::S => "#00f000",
            PieceKind::Z => "#f00000",
            PieceKind::J => "#0000f0",
            PieceKind::L => "#f0a000",
        }
    }

    /// Display color as an RGB triple (same values as [`PieceKind::color_hex`]).
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0x00, 0xf0, 0xf0),
            PieceKind::O => (0xf0, 0xf0, 0x00),
            PieceKind::T => (0xa0, 0x00, 0xf0),
            PieceKind::S => (0x00, 0xf0, 0x00),
            PieceKind::Z => (0xf0, 0x00, 0x00),
            PieceKind::J => (0x00, 0x00, 0xf0),
            PieceKind::L => (0xf0, 0xa0, 0x00),
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Player commands forwarded by a driver to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece to its lowest valid position and lock it
    HardDrop,
}

impl GameAction {
    /// All actions, in legend order.
    pub const ALL: [GameAction; 5] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::Rotate,
        GameAction::SoftDrop,
        GameAction::HardDrop,
    ];

    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
        }
    }

    /// Human-readable legend text.
    pub fn description(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "Move Left",
            GameAction::MoveRight => "Move Right",
            GameAction::SoftDrop => "Soft Drop",
            GameAction::Rotate => "Rotate",
            GameAction::HardDrop => "Hard Drop",
        }
    }
}

/// One line of the controls legend shown by a driver
///
/// `key` is `None` while the binding is still hidden from the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub action: GameAction,
    pub key: Option<String>,
}
