//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond conversions, making them
//! usable in any context (engine, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LOCK_DELAY_MS` | 500 | Grace period before a grounded piece locks |
//! | `LOCK_RESET_LIMIT` | 15 | Max lock timer resets per piece |
//! | `MOVE_REPEAT_MS` | 100 | Minimum interval between held horizontal moves |
//! | `SOFT_DROP_REPEAT_MS` | 50 | Minimum interval between held soft-drop steps |
//! | `REPEAT_DELAY_MS` | 150 | Hold time before a held input starts repeating |
//! | `MIN_DROP_INTERVAL_MS` | 16 | Gravity is capped at one row per 60Hz frame |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, HeldInput, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//! assert_eq!(piece.color().to_hex(), "#a000f0");
//!
//! let cmd = Command::from_str("moveLeft").unwrap();
//! assert_eq!(cmd, Command::Press(HeldInput::Left));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of upcoming pieces exposed for the preview display.
pub const NEXT_QUEUE_LEN: usize = 5;

/// Lock delay when piece is grounded (500ms)
pub const LOCK_DELAY_MS: u32 = 500;

/// Maximum number of lock timer resets per piece (15)
pub const LOCK_RESET_LIMIT: u8 = 15;

/// Minimum re-trigger interval for a held horizontal move.
pub const MOVE_REPEAT_MS: u32 = 100;

/// Minimum re-trigger interval for a held soft drop.
pub const SOFT_DROP_REPEAT_MS: u32 = 50;

/// Delay between the first step of a held input and its first repeat.
pub const REPEAT_DELAY_MS: u32 = 150;

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity by level, in cells per frame at 60Hz.
///
/// Index 0 = level 1. Levels past the end of the table reuse the last entry.
pub const GRAVITY_TABLE: [f64; 15] = [
    0.01667, 0.021017, 0.026977, 0.035256, 0.04693, 0.06361, 0.0879, 0.1236, 0.1775, 0.2598,
    0.388, 0.59, 0.92, 1.46, 2.36,
];

/// Drop interval floor (one row per 60Hz frame).
pub const MIN_DROP_INTERVAL_MS: u32 = 16;

/// Line clear scoring table, multiplied by the current level.
///
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Combo scoring base value (50 points per combo step, times level)
pub const COMBO_BASE: u32 = 50;

/// Back-to-back bonus numerator (3/2 = 1.5x multiplier)
pub const B2B_NUMERATOR: u32 = 3;

/// Back-to-back bonus denominator
pub const B2B_DENOMINATOR: u32 = 2;

/// Points per cell travelled by a soft drop.
pub const SOFT_DROP_POINTS_PER_CELL: u32 = 1;

/// Points per cell travelled by a hard drop.
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS-style `#rrggbb` representation.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
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
    /// Every kind, in template order.
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
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
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

    /// Display color of the piece and of the board cells it fills.
    pub fn color(&self) -> Rgb {
        match self {
            PieceKind::I => Rgb::new(0x00, 0xf0, 0xf0),
            PieceKind::O => Rgb::new(0xf0, 0xf0, 0x00),
            PieceKind::T => Rgb::new(0xa0, 0x00, 0xf0),
            PieceKind::S => Rgb::new(0x00, 0xf0, 0x00),
            PieceKind::Z => Rgb::new(0xf0, 0x00, 0x00),
            PieceKind::J => Rgb::new(0x00, 0x00, 0xf0),
            PieceKind::L => Rgb::new(0xf0, 0xa0, 0x00),
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a piece of the given kind
pub type Cell = Option<PieceKind>;

/// Inputs that repeat while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeldInput {
    Left,
    Right,
    SoftDrop,
}

/// Commands accepted by the engine.
///
/// Held inputs are level-triggered: the engine repeats them on its own clock
/// between `Press` and `Release`. Everything else acts once per command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Start holding a repeatable input
    Press(HeldInput),
    /// Stop holding a repeatable input
    Release(HeldInput),
    /// Rotate piece 90° clockwise
    Rotate,
    /// Instantly drop and lock the piece
    HardDrop,
    /// Swap the active piece with the held slot
    Hold,
    /// Toggle pause state
    Pause,
    /// Reinitialize the whole game
    Restart,
}

impl Command {
    /// Parse a command from its textual name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::{Command, HeldInput};
    ///
    /// assert_eq!(Command::from_str("softDropOn"), Some(Command::Press(HeldInput::SoftDrop)));
    /// assert_eq!(Command::from_str("HARDDROP"), Some(Command::HardDrop));
    /// assert_eq!(Command::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::Press(HeldInput::Left)),
            "moveleftoff" => Some(Command::Release(HeldInput::Left)),
            "moveright" => Some(Command::Press(HeldInput::Right)),
            "moverightoff" => Some(Command::Release(HeldInput::Right)),
            "softdropon" => Some(Command::Press(HeldInput::SoftDrop)),
            "softdropoff" => Some(Command::Release(HeldInput::SoftDrop)),
            "rotate" => Some(Command::Rotate),
            "harddrop" => Some(Command::HardDrop),
            "hold" => Some(Command::Hold),
            "pause" => Some(Command::Pause),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Press(HeldInput::Left) => "moveLeft",
            Command::Release(HeldInput::Left) => "moveLeftOff",
            Command::Press(HeldInput::Right) => "moveRight",
            Command::Release(HeldInput::Right) => "moveRightOff",
            Command::Press(HeldInput::SoftDrop) => "softDropOn",
            Command::Release(HeldInput::SoftDrop) => "softDropOff",
            Command::Rotate => "rotate",
            Command::HardDrop => "hardDrop",
            Command::Hold => "hold",
            Command::Pause => "pause",
            Command::Restart => "restart",
        }
    }
}

/// Event emitted each time a piece locks into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Points awarded for the clear (line score plus combo bonus).
    pub line_clear_score: u32,
    pub combo: u32,
    pub back_to_back: bool,
    /// The piece spawned after this lock collided immediately.
    pub game_over: bool,
}
