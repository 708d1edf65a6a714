//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation
//! logic. It does no I/O and never reads a clock on its own: the host passes a
//! monotonic millisecond timestamp to [`GameState::tick`].
//!
//! # Module Structure
//!
//! - [`shape`]: occupancy matrices, clockwise rotation and kick offsets
//! - [`piece`]: an active piece (kind, shape, position)
//! - [`factory`]: 7-bag randomizer with a five-piece preview queue
//! - [`board`]: 10x20 grid with collision detection and line clearing
//! - [`lock_delay`]: grounded-piece grace period with a reset cap
//! - [`scoring`]: line clears, combo, back-to-back, levels and gravity
//! - [`clock`]: tick deltas, gravity accumulation, held-input repeat gates
//! - [`game_state`]: the engine tying everything together
//! - [`snapshot`]: read-only, allocation-free view for renderers
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every run of seven pieces contains each kind once
//! - **Simple rotation**: clockwise only, with horizontal kicks `0, -1, +1, -2, +2`
//! - **Lock Delay**: 500ms once grounded, refilled by at most 15 moves/rotations
//! - **Ghost Piece**: where the current piece would land
//! - **Hold**: store one piece for later use (once per spawned piece)
//! - **Scoring**: 100/300/500/800 × level, combo bonus, 3/2 back-to-back on 4-line clears
//!
//! # Example
//!
//! ```
//! use blockfall_core::{EngineConfig, GameState, PieceFactory};
//! use blockfall_core::types::Command;
//!
//! let mut game = GameState::with_factory(EngineConfig::default(), PieceFactory::seeded(12345));
//! game.start();
//!
//! game.apply(Command::Rotate);
//! game.apply(Command::HardDrop);
//! game.tick(0);
//!
//! // Hard drop awards points
//! assert!(game.score() > 0);
//! ```

pub mod board;
pub mod clock;
pub mod config;
pub mod error;
pub mod factory;
pub mod game_state;
pub mod lock_delay;
pub mod piece;
pub mod scoring;
pub mod shape;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use clock::GameClock;
pub use config::EngineConfig;
pub use error::{ConfigError, Result};
pub use factory::PieceFactory;
pub use game_state::GameState;
pub use lock_delay::{LockDelay, LockPhase};
pub use piece::Piece;
pub use scoring::{ScoreResult, Scoring};
pub use shape::{template, Shape, KICK_OFFSETS};
pub use snapshot::{GameSnapshot, PieceSnapshot, TimersSnapshot};
