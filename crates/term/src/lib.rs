//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout frameworks and instead renders a
//! [`GameSnapshot`](blockfall_core::GameSnapshot) into a simple framebuffer
//! that is diffed and flushed to the terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, Weight};
pub use game_view::{AnchorY, GameView, Viewport, PANEL_WIDTH};
pub use renderer::{encode_frame, TerminalRenderer};
