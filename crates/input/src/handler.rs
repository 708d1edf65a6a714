//! Held-key tracking for terminal environments.
//!
//! Turns raw key events into engine commands: one `Press` when a movement key
//! goes down, one `Release` when it comes up. Terminals that never emit
//! release events only send repeated presses while a key is held, so a key
//! that has not been seen for `key_release_timeout_ms` is released
//! automatically by [`InputHandler::update`].

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{edge_command, held_input};
use crate::types::{Command, HeldInput};

// A tap should not turn into a sustained "held" state in terminals without
// key-release events.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

const HELD_INPUTS: [HeldInput; 3] = [HeldInput::Left, HeldInput::Right, HeldInput::SoftDrop];

fn slot(input: HeldInput) -> usize {
    match input {
        HeldInput::Left => 0,
        HeldInput::Right => 1,
        HeldInput::SoftDrop => 2,
    }
}

/// Tracks which movement keys are down.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Last time each held input was seen (ms), `None` when up.
    last_seen_ms: [Option<u64>; 3],
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            last_seen_ms: [None; 3],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn is_held(&self, input: HeldInput) -> bool {
        self.last_seen_ms[slot(input)].is_some()
    }

    /// Translate one key event observed at `now_ms`.
    pub fn handle_key_event(&mut self, key: KeyEvent, now_ms: u64) -> Option<Command> {
        if let Some(input) = held_input(key.code) {
            let seen = &mut self.last_seen_ms[slot(input)];
            return match key.kind {
                KeyEventKind::Release => seen.take().map(|_| Command::Release(input)),
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    let was_held = seen.replace(now_ms).is_some();
                    (!was_held).then_some(Command::Press(input))
                }
            };
        }

        match key.kind {
            KeyEventKind::Press => edge_command(key.code),
            KeyEventKind::Repeat | KeyEventKind::Release => None,
        }
    }

    /// Release keys that have gone quiet for longer than the timeout.
    pub fn update(&mut self, now_ms: u64) -> ArrayVec<Command, 3> {
        let mut commands = ArrayVec::new();
        let timeout = u64::from(self.key_release_timeout_ms);

        for input in HELD_INPUTS {
            let seen = &mut self.last_seen_ms[slot(input)];
            if let Some(t) = *seen {
                if now_ms.saturating_sub(t) > timeout {
                    *seen = None;
                    commands.push(Command::Release(input));
                }
            }
        }

        commands
    }

    /// Release everything that is still held.
    pub fn reset(&mut self) -> ArrayVec<Command, 3> {
        let mut commands = ArrayVec::new();
        for input in HELD_INPUTS {
            if self.last_seen_ms[slot(input)].take().is_some() {
                commands.push(Command::Release(input));
            }
        }
        commands
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
