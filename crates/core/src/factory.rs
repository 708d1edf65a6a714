//! Factory module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm used in modern Tetris.
//! Each bag contains one of each piece (I, O, T, S, Z, J, L), shuffled with
//! Fisher-Yates. The queue in front of the bag is topped up from the bag and
//! always holds at least [`NEXT_QUEUE_LEN`] kinds for the preview.
//!
//! The default factory is seeded from the OS; [`PieceFactory::seeded`] gives a
//! reproducible sequence for tests and benches.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::piece::Piece;
use crate::types::{PieceKind, NEXT_QUEUE_LEN};

/// Bag randomizer plus lookahead queue.
#[derive(Debug, Clone)]
pub struct PieceFactory {
    /// Remaining kinds of the current bag; drawn from the back.
    bag: ArrayVec<PieceKind, 7>,
    /// Upcoming kinds, front is next.
    queue: VecDeque<PieceKind>,
    rng: StdRng,
}

impl PieceFactory {
    /// Create a factory seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Create a factory with a fixed seed (deterministic sequence).
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        let mut factory = Self {
            bag: ArrayVec::new(),
            queue: VecDeque::with_capacity(NEXT_QUEUE_LEN + 1),
            rng,
        };
        factory.refill();
        factory
    }

    /// Top the queue up to the preview length, opening a new shuffled bag
    /// whenever the current one runs out.
    pub fn refill(&mut self) {
        while self.queue.len() < NEXT_QUEUE_LEN {
            if self.bag.is_empty() {
                self.bag.extend(PieceKind::ALL);
                self.bag.shuffle(&mut self.rng);
            }
            if let Some(kind) = self.bag.pop() {
                self.queue.push_back(kind);
            }
        }
    }

    /// Take the next kind off the queue.
    pub fn next_kind(&mut self) -> PieceKind {
        // The queue is never empty after refill(); the fallback keeps this total.
        let kind = self.queue.pop_front().unwrap_or_else(|| {
            self.refill();
            self.queue.pop_front().unwrap_or(PieceKind::I)
        });
        self.refill();
        kind
    }

    /// Take the next kind off the queue as a freshly spawned piece.
    pub fn next(&mut self) -> Piece {
        Piece::spawn(self.next_kind())
    }

    /// Upcoming kinds for the preview display.
    pub fn preview(&self) -> [PieceKind; NEXT_QUEUE_LEN] {
        let mut out = [PieceKind::I; NEXT_QUEUE_LEN];
        for (slot, kind) in out.iter_mut().zip(self.queue.iter()) {
            *slot = *kind;
        }
        out
    }

    /// Number of queued kinds.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Kinds left in the current bag.
    pub fn bag(&self) -> &[PieceKind] {
        &self.bag
    }

    /// Discard bag and queue (new game), keeping the RNG stream.
    pub fn reset(&mut self) {
        self.bag.clear();
        self.queue.clear();
        self.refill();
    }
}

impl Default for PieceFactory {
    fn default() -> Self {
        Self::new()
    }
}
