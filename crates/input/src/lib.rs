//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. Movement keys
//! become press/release pairs so the engine can run its own repeat timers;
//! terminals that never report key releases are handled with a timeout.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{InputHandler, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
pub use map::{edge_command, held_input, should_quit};
