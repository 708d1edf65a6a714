//! Lock delay state machine.
//!
//! ```text
//!   Airborne --ground()--> Grounded --advance(): timer hits 0 or resets exhausted--> Locked
//!       ^                     |  \__ on_move(): refill timer while resets remain
//!       +------ clear() ------+
//! ```
//!
//! The owning engine calls [`LockDelay::clear`] whenever the piece is no longer
//! blocked directly below, and on every spawn/hold.

use crate::types::{LOCK_DELAY_MS, LOCK_RESET_LIMIT};

/// Result of advancing the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockPhase {
    /// Not touching anything below.
    Airborne,
    /// Grounded with time left.
    Grounded,
    /// Commit the piece now.
    Locked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockDelay {
    duration_ms: u32,
    max_resets: u8,
    remaining_ms: u32,
    moves_used: u8,
    active: bool,
}

impl LockDelay {
    pub fn new(duration_ms: u32, max_resets: u8) -> Self {
        Self {
            duration_ms,
            max_resets,
            remaining_ms: 0,
            moves_used: 0,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn moves_used(&self) -> u8 {
        self.moves_used
    }

    /// A downward move failed. Starts the countdown if not already running.
    pub fn ground(&mut self) {
        if !self.active {
            self.active = true;
            self.remaining_ms = self.duration_ms;
            self.moves_used = 0;
        }
    }

    /// A move or rotation succeeded while grounded.
    ///
    /// Refills the timer and spends one reset while resets remain; after that
    /// the timer is left alone. Returns whether the timer was refilled.
    pub fn on_move(&mut self) -> bool {
        if !self.active || self.moves_used >= self.max_resets {
            return false;
        }
        self.remaining_ms = self.duration_ms;
        self.moves_used += 1;
        true
    }

    /// Count down by `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: u32) -> LockPhase {
        if !self.active {
            return LockPhase::Airborne;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 || self.moves_used >= self.max_resets {
            LockPhase::Locked
        } else {
            LockPhase::Grounded
        }
    }

    /// Back to airborne.
    pub fn clear(&mut self) {
        self.active = false;
        self.remaining_ms = 0;
        self.moves_used = 0;
    }
}

impl Default for LockDelay {
    fn default() -> Self {
        Self::new(LOCK_DELAY_MS, LOCK_RESET_LIMIT)
    }
}
