//! Read-only view of a game for renderers.
//!
//! A snapshot is a plain `Copy` value; producing one never allocates, so a
//! frontend can refresh it every frame with [`GameState::snapshot_into`].
//!
//! [`GameState::snapshot_into`]: crate::GameState::snapshot_into

use serde::Serialize;

use crate::piece::Piece;
use crate::shape::Shape;
use crate::types::{Cell, LockEvent, PieceKind, Rgb, BOARD_HEIGHT, BOARD_WIDTH, NEXT_QUEUE_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
    pub color: Rgb,
}

impl PieceSnapshot {
    /// Absolute board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
            color: value.color(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct TimersSnapshot {
    pub gravity_ms: u32,
    /// `None` while the piece is airborne.
    pub lock_remaining_ms: Option<u32>,
    pub lock_moves_used: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<PieceSnapshot>,
    pub ghost: Option<PieceSnapshot>,
    pub next_queue: [PieceKind; NEXT_QUEUE_LEN],
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub combo: u32,
    pub back_to_back: bool,
    pub elapsed_ms: u64,
    pub paused: bool,
    pub game_over: bool,
    pub timers: TimersSnapshot,
    pub last_event: Option<LockEvent>,
}

impl GameSnapshot {
    /// Reset to the state of a fresh, unstarted game.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Cheap fingerprint of the visible state, for render throttling.
    pub fn fingerprint(&self) -> u64 {
        use std::hash::{Hash, Hasher};
        let mut h = std::collections::hash_map::DefaultHasher::new();
        self.board.hash(&mut h);
        self.active.hash(&mut h);
        self.ghost.hash(&mut h);
        self.next_queue.hash(&mut h);
        (self.hold, self.can_hold).hash(&mut h);
        (self.score, self.lines, self.level, self.combo, self.back_to_back).hash(&mut h);
        (self.paused, self.game_over).hash(&mut h);
        // The clock display only changes once per second.
        (self.elapsed_ms / 1000).hash(&mut h);
        h.finish()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            next_queue: [PieceKind::I; NEXT_QUEUE_LEN],
            hold: None,
            can_hold: true,
            score: 0,
            lines: 0,
            level: 1,
            combo: 0,
            back_to_back: false,
            elapsed_ms: 0,
            paused: false,
            game_over: false,
            timers: TimersSnapshot::default(),
            last_event: None,
        }
    }
}
