//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, factory, lock delay,
//! scoring and clock. It handles piece movement, rotation, hold, line clears
//! and the game lifecycle.
//!
//! Every mutating entry point is inert while paused or after game over; the
//! only way out of game over is [`Command::Restart`].

use tracing::{debug, info};

use crate::board::Board;
use crate::clock::GameClock;
use crate::config::EngineConfig;
use crate::factory::PieceFactory;
use crate::lock_delay::{LockDelay, LockPhase};
use crate::piece::Piece;
use crate::shape::KICK_OFFSETS;
use crate::scoring::Scoring;
use crate::snapshot::{GameSnapshot, PieceSnapshot, TimersSnapshot};
use crate::types::{Command, HeldInput, LockEvent, PieceKind, NEXT_QUEUE_LEN};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    factory: PieceFactory,
    active: Option<Piece>,
    hold: Option<PieceKind>,
    can_hold: bool,
    lock_delay: LockDelay,
    scoring: Scoring,
    clock: GameClock,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    started: bool,
    paused: bool,
    game_over: bool,
}

impl GameState {
    /// Create a new game with an OS-seeded piece factory
    pub fn new(config: EngineConfig) -> Self {
        Self::with_factory(config, PieceFactory::new())
    }

    /// Create a new game drawing pieces from `factory`
    pub fn with_factory(config: EngineConfig, factory: PieceFactory) -> Self {
        Self {
            config,
            board: Board::new(),
            factory,
            active: None,
            hold: None,
            can_hold: true,
            lock_delay: LockDelay::new(config.lock_delay_ms, config.lock_reset_limit),
            scoring: Scoring::new(),
            clock: GameClock::new(
                config.move_repeat_ms,
                config.soft_drop_repeat_ms,
                config.repeat_delay_ms,
            ),
            last_event: None,
            started: false,
            paused: false,
            game_over: false,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Started, not paused, not over.
    pub fn playable(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn level(&self) -> u32 {
        self.scoring.level()
    }

    pub fn lines(&self) -> u32 {
        self.scoring.lines()
    }

    pub fn combo(&self) -> u32 {
        self.scoring.combo()
    }

    pub fn back_to_back(&self) -> bool {
        self.scoring.back_to_back()
    }

    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_queue(&self) -> [PieceKind; NEXT_QUEUE_LEN] {
        self.factory.preview()
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for puzzle setups and tests.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn lock_delay(&self) -> &LockDelay {
        &self.lock_delay
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// Replace the active piece (puzzle setups and tests).
    ///
    /// Lock delay starts over as for a fresh spawn.
    pub fn set_active(&mut self, piece: Piece) {
        self.active = Some(piece);
        self.lock_delay.clear();
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.active = self.active.map(PieceSnapshot::from);
        out.ghost = self.ghost().map(PieceSnapshot::from);
        out.next_queue = self.factory.preview();
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.score = self.scoring.score();
        out.lines = self.scoring.lines();
        out.level = self.scoring.level();
        out.combo = self.scoring.combo();
        out.back_to_back = self.scoring.back_to_back();
        out.elapsed_ms = self.clock.elapsed_ms();
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.timers = TimersSnapshot {
            gravity_ms: self.clock.gravity_ms(),
            lock_remaining_ms: self
                .lock_delay
                .is_active()
                .then(|| self.lock_delay.remaining_ms()),
            lock_moves_used: self.lock_delay.moves_used(),
        };
        out.last_event = self.last_event;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn the next piece from the queue.
    ///
    /// Returns false (and ends the game) if it collides at the spawn position.
    pub fn spawn_piece(&mut self) -> bool {
        let piece = self.factory.next();
        self.can_hold = true;
        self.lock_delay.clear();
        self.activate(piece)
    }

    /// Make `piece` the active piece, ending the game if it does not fit.
    fn activate(&mut self, piece: Piece) -> bool {
        if self.board.collides(&piece, 0, 0) {
            self.active = None;
            self.game_over = true;
            self.clock.release_all();
            info!(
                kind = piece.kind.as_str(),
                score = self.scoring.score(),
                lines = self.scoring.lines(),
                "game over"
            );
            return false;
        }
        debug!(kind = piece.kind.as_str(), x = piece.x, "spawned piece");
        self.active = Some(piece);
        true
    }

    /// Try to shift the active piece.
    ///
    /// A successful move refills the lock timer if grounded. A failed downward
    /// move grounds the piece instead.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if !self.board.collides(&active, dx, dy) {
            self.active = Some(active.offset(dx, dy));
            if dx != 0 || dy != 0 {
                self.lock_delay.on_move();
            }
            return true;
        }

        if dy > 0 {
            self.lock_delay.ground();
        }
        false
    }

    /// Rotate the active piece clockwise, trying each horizontal kick in turn.
    ///
    /// If no kick fits the piece is left exactly as it was.
    pub fn try_rotate(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.shape.rotate_cw();
        for kick in KICK_OFFSETS {
            let candidate = Piece {
                shape: rotated,
                x: active.x + kick,
                ..active
            };
            if !self.board.collides(&candidate, 0, 0) {
                self.active = Some(candidate);
                self.lock_delay.on_move();
                return true;
            }
        }

        false
    }

    /// Drop the active piece to the bottom and lock it immediately.
    ///
    /// Returns the number of rows dropped.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.playable() {
            return 0;
        }
        let Some(active) = self.active else {
            return 0;
        };

        let mut drop_distance: i8 = 0;
        while !self.board.collides(&active, 0, drop_distance + 1) {
            drop_distance += 1;
        }

        self.active = Some(active.offset(0, drop_distance));
        let distance = drop_distance as u32;
        self.scoring.add_drop(distance, true);
        self.lock_piece();
        distance
    }

    /// Swap active piece with hold piece
    ///
    /// The piece coming out of hold starts from its template at the spawn
    /// position; rotation is not remembered.
    pub fn hold(&mut self) -> bool {
        if !self.playable() || !self.can_hold {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let next = match self.hold.replace(active.kind) {
            Some(held) => Piece::spawn(held),
            None => self.factory.next(),
        };
        debug!(held = active.kind.as_str(), next = next.kind.as_str(), "hold");

        self.can_hold = false;
        self.lock_delay.clear();
        self.activate(next);
        true
    }

    /// Landing preview for the active piece.
    pub fn ghost(&self) -> Option<Piece> {
        let mut ghost = self.active?;
        while !self.board.collides(&ghost, 0, 1) {
            ghost.y += 1;
        }
        Some(ghost)
    }

    /// Lock the active piece onto the board, score any line clears and spawn
    /// the next piece.
    pub fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.merge(&piece);
        let lines_cleared = self.board.clear_lines();
        let result = self.scoring.apply_clear(lines_cleared);

        debug!(
            kind = piece.kind.as_str(),
            x = piece.x,
            y = piece.y,
            lines_cleared,
            points = result.total,
            b2b = result.b2b_applied,
            "locked piece"
        );

        self.spawn_piece();

        self.last_event = Some(LockEvent {
            lines_cleared,
            line_clear_score: result.total,
            combo: self.scoring.combo(),
            back_to_back: self.scoring.back_to_back(),
            game_over: self.game_over,
        });
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Whether the active piece is resting on something.
    pub fn is_grounded(&self) -> bool {
        self.active
            .is_some_and(|piece| self.board.collides(&piece, 0, 1))
    }

    /// Advance the simulation to `now_ms` (monotonic milliseconds).
    ///
    /// Order per tick: held-input repeats, lock delay, gravity.
    pub fn tick(&mut self, now_ms: u64) {
        if !self.playable() {
            return;
        }

        let elapsed_ms = self.clock.begin_tick(now_ms);

        // Held inputs repeat on their own wall-clock gates.
        if self.clock.horizontal_due(now_ms) {
            if self.clock.is_held(HeldInput::Left) {
                self.try_move(-1, 0);
            }
            if self.clock.is_held(HeldInput::Right) {
                self.try_move(1, 0);
            }
        }
        if self.clock.soft_drop_due(now_ms) && self.try_move(0, 1) {
            self.scoring.add_drop(1, false);
        }

        if self.lock_delay.is_active() {
            if !self.is_grounded() {
                self.lock_delay.clear();
            } else if self.lock_delay.advance(elapsed_ms) == LockPhase::Locked {
                self.lock_piece();
            }
        }

        if self.playable() && self.active.is_some() && !self.lock_delay.is_active() {
            let interval = self.scoring.drop_interval_ms();
            if self.clock.accumulate_gravity(elapsed_ms, interval) {
                self.try_move(0, 1);
            }
        }
    }

    /// Apply an engine command. Returns whether it had any effect.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Restart => {
                self.restart();
                true
            }
            Command::Pause => self.toggle_pause(),
            // Held state tracks the keyboard across a pause; ticks stay inert
            // until resume.
            Command::Release(input) => {
                self.clock.release(input);
                true
            }
            Command::Press(input) if self.paused => {
                self.clock.press(input);
                true
            }
            _ if !self.playable() => false,
            Command::Press(input) => {
                self.clock.press(input);
                true
            }
            Command::Rotate => self.try_rotate(),
            Command::HardDrop => {
                self.hard_drop();
                true
            }
            Command::Hold => self.hold(),
        }
    }

    fn toggle_pause(&mut self) -> bool {
        if self.game_over || !self.started {
            return false;
        }
        self.paused = !self.paused;
        // Never credit the paused span as elapsed time.
        self.clock.suspend();
        info!(paused = self.paused, "pause toggled");
        true
    }

    /// Reinitialize everything except configuration and the RNG stream.
    pub fn restart(&mut self) {
        info!(score = self.scoring.score(), "restart");
        let config = self.config;
        self.factory.reset();
        self.board.clear();
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.lock_delay = LockDelay::new(config.lock_delay_ms, config.lock_reset_limit);
        self.scoring = Scoring::new();
        self.clock = GameClock::new(
            config.move_repeat_ms,
            config.soft_drop_repeat_ms,
            config.repeat_delay_ms,
        );
        self.last_event = None;
        self.started = false;
        self.paused = false;
        self.game_over = false;
        self.start();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    fn game(seed: u64) -> GameState {
        let mut state = GameState::with_factory(EngineConfig::default(), PieceFactory::seeded(seed));
        state.start();
        state
    }

    fn fill_row_except(board: &mut Board, y: i8, gap: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            if !gap.contains(&x) {
                board.set(x, y, Some(PieceKind::Z));
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::with_factory(EngineConfig::default(), PieceFactory::seeded(1));
        assert!(!state.started());
        assert!(!state.game_over());
        assert!(!state.paused());
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert!(state.active().is_none());
        assert!(state.hold_piece().is_none());
    }

    #[test]
    fn test_start_spawns_first_queued_piece() {
        let mut state = GameState::with_factory(EngineConfig::default(), PieceFactory::seeded(4));
        let first = state.next_queue()[0];
        state.start();
        let active = state.active().unwrap();
        assert_eq!(active.kind, first);
        assert_eq!(active, Piece::spawn(first));
    }

    #[test]
    fn test_try_move() {
        let mut state = game(12345);
        let x = state.active().unwrap().x;

        assert!(state.try_move(1, 0));
        assert_eq!(state.active().unwrap().x, x + 1);
        assert!(state.try_move(-1, 0));
        assert_eq!(state.active().unwrap().x, x);
    }

    #[test]
    fn test_move_stops_at_wall() {
        let mut state = game(12345);
        let mut moved = 0;
        for _ in 0..10 {
            if state.try_move(-1, 0) {
                moved += 1;
            }
        }
        assert!(moved <= 4);
        assert_eq!(state.active().unwrap().x, 0);
    }

    #[test]
    fn test_failed_down_move_grounds() {
        let mut state = game(1);
        state.set_active(Piece::spawn(PieceKind::O).offset(0, 18));
        assert!(!state.lock_delay().is_active());
        assert!(!state.try_move(0, 1));
        assert!(state.lock_delay().is_active());
        assert_eq!(state.lock_delay().remaining_ms(), 500);
    }

    #[test]
    fn test_rotation_success_at_left_wall() {
        let mut state = game(1);
        let vertical = Piece {
            kind: PieceKind::I,
            shape: Shape::from_rows(&[&[1], &[1], &[1], &[1]]),
            x: 0,
            y: 5,
        };
        state.set_active(vertical);
        assert!(state.try_rotate());
        let rotated = state.active().unwrap();
        assert_eq!((rotated.shape.rows(), rotated.shape.cols()), (1, 4));
        assert_eq!(rotated.x, 0);
    }

    #[test]
    fn test_rotation_uses_kick() {
        let mut state = game(1);
        // Vertical I near the right wall: only the -2 kick fits the flat bar.
        let vertical = Piece {
            kind: PieceKind::I,
            shape: Shape::from_rows(&[&[1], &[1], &[1], &[1]]),
            x: 8,
            y: 5,
        };
        state.set_active(vertical);
        assert!(state.try_rotate());
        let rotated = state.active().unwrap();
        assert_eq!(rotated.shape.cols(), 4);
        assert_eq!(rotated.x, 6);
    }

    #[test]
    fn test_rotation_reverts_when_nothing_fits() {
        let mut state = game(1);
        // Flat I on the floor at the left wall cannot stand up anywhere.
        let flat = Piece::spawn(PieceKind::I);
        let flat = Piece { x: 0, y: 19, ..flat };
        state.set_active(flat);
        let before = state.active().unwrap();

        assert!(!state.try_rotate());
        let after = state.active().unwrap();
        assert_eq!(after.shape, before.shape);
        assert_eq!(after.x, before.x);
        assert_eq!(after, before);
    }

    #[test]
    fn test_move_refills_lock_delay() {
        let mut state = game(1);
        state.set_active(Piece::spawn(PieceKind::O).offset(0, 18));
        state.try_move(0, 1);
        assert!(state.lock_delay().is_active());
        state.tick(0);
        state.tick(300);
        assert_eq!(state.lock_delay().remaining_ms(), 200);
        assert!(state.try_move(-1, 0));
        assert_eq!(state.lock_delay().remaining_ms(), 500);
        assert_eq!(state.lock_delay().moves_used(), 1);
    }

    #[test]
    fn test_lock_reset_cap_through_ticks() {
        let mut state = game(1);
        state.set_active(Piece::spawn(PieceKind::O).offset(0, 18));
        state.try_move(0, 1);
        state.tick(0);

        let mut now = 0;
        for i in 0..15 {
            now += 100;
            state.tick(now);
            let dx = if i % 2 == 0 { -1 } else { 1 };
            assert!(state.try_move(dx, 0));
        }
        assert_eq!(state.lock_delay().moves_used(), 15);

        // Resets are spent; the next tick commits the piece.
        state.tick(now + 16);
        assert_eq!(state.board().filled_count(), 4);
    }

    #[test]
    fn test_hard_drop_o_piece_end_to_end() {
        let mut state = game(2);
        state.set_active(Piece::spawn(PieceKind::O));
        let next_kind = state.next_queue()[0];

        let dropped = state.hard_drop();
        assert_eq!(dropped, 18);
        assert_eq!(state.score(), 36);

        let board = state.board();
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(board.get(x, y), Some(Some(PieceKind::O)));
        }
        assert_eq!(board.filled_count(), 4);

        let active = state.active().unwrap();
        assert_eq!(active.kind, next_kind);
        assert!(state.can_hold());

        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 0);
        assert!(!ev.game_over);
    }

    #[test]
    fn test_hard_drop_clears_lines() {
        let mut state = game(3);
        for y in 16..20 {
            fill_row_except(state.board_mut(), y, &[0]);
        }
        let vertical = Piece {
            kind: PieceKind::I,
            shape: Shape::from_rows(&[&[1], &[1], &[1], &[1]]),
            x: 0,
            y: 0,
        };
        state.set_active(vertical);
        state.hard_drop();

        assert_eq!(state.lines(), 4);
        // 800 for the clear, 2 * 16 for the drop.
        assert_eq!(state.score(), 800 + 32);
        assert_eq!(state.board().filled_count(), 0);
        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 4);
        assert_eq!(ev.line_clear_score, 800);
        assert!(ev.back_to_back);
    }

    #[test]
    fn test_hold() {
        let mut state = game(12345);
        let initial_kind = state.active().unwrap().kind;
        let queued = state.next_queue()[0];

        assert!(state.hold());
        assert_eq!(state.hold_piece(), Some(initial_kind));
        assert_eq!(state.active().unwrap().kind, queued);
        assert!(!state.can_hold());

        // Only once per piece.
        assert!(!state.hold());
        assert!(!state.apply(Command::Hold));

        state.hard_drop();
        assert!(state.can_hold());

        // Swap returns the held kind in its spawn orientation.
        state.try_rotate();
        assert!(state.hold());
        let active = state.active().unwrap();
        assert_eq!(active, Piece::spawn(initial_kind));
    }

    #[test]
    fn test_hold_resets_lock_delay() {
        let mut state = game(5);
        let grounded = Piece::spawn(PieceKind::O).offset(0, 18);
        state.set_active(grounded);
        state.try_move(0, 1);
        assert!(state.lock_delay().is_active());
        assert!(state.hold());
        assert!(!state.lock_delay().is_active());
    }

    #[test]
    fn test_ghost_is_landing_position() {
        let mut state = game(6);
        state.set_active(Piece::spawn(PieceKind::O));
        let ghost = state.ghost().unwrap();
        assert_eq!(ghost.y, 18);
        assert_eq!(ghost.x, 4);
        // Pure: the active piece did not move.
        assert_eq!(state.active().unwrap().y, 0);
    }

    #[test]
    fn test_gravity_drops_one_row_per_interval() {
        let mut state = game(7);
        let y = state.active().unwrap().y;
        state.tick(0);
        state.tick(999);
        assert_eq!(state.active().unwrap().y, y);
        state.tick(1000);
        assert_eq!(state.active().unwrap().y, y + 1);
    }

    #[test]
    fn test_lock_after_delay() {
        let mut state = game(8);
        state.set_active(Piece::spawn(PieceKind::O).offset(0, 18));

        state.tick(0);
        // Gravity attempt fails and grounds the piece.
        state.tick(1000);
        assert!(state.lock_delay().is_active());
        assert_eq!(state.board().filled_count(), 0);

        state.tick(1499);
        assert_eq!(state.board().filled_count(), 0);
        state.tick(1500);
        assert_eq!(state.board().filled_count(), 4);
        assert!(!state.lock_delay().is_active());
    }

    #[test]
    fn test_leaving_ledge_clears_lock_delay() {
        let mut state = game(9);
        // Ledge under columns 4..=5 only.
        state.board_mut().set(4, 10, Some(PieceKind::J));
        state.board_mut().set(5, 10, Some(PieceKind::J));
        state.set_active(Piece::spawn(PieceKind::O).offset(0, 8));
        state.try_move(0, 1);
        assert!(state.lock_delay().is_active());

        state.tick(0);
        assert!(state.try_move(-1, 0));
        assert!(state.try_move(-1, 0));
        state.tick(16);
        assert!(!state.lock_delay().is_active());
    }

    #[test]
    fn test_soft_drop_held_repeats_and_scores() {
        let mut state = game(10);
        let y = state.active().unwrap().y;
        assert!(state.apply(Command::Press(HeldInput::SoftDrop)));

        state.tick(0);
        assert_eq!(state.active().unwrap().y, y + 1);
        assert_eq!(state.score(), 1);

        state.tick(100);
        assert_eq!(state.active().unwrap().y, y + 1);

        state.tick(151);
        assert_eq!(state.active().unwrap().y, y + 2);
        state.tick(202);
        assert_eq!(state.active().unwrap().y, y + 3);
        assert_eq!(state.score(), 3);

        state.apply(Command::Release(HeldInput::SoftDrop));
        state.tick(400);
        assert_eq!(state.active().unwrap().y, y + 3);
    }

    #[test]
    fn test_horizontal_held_repeats() {
        let mut state = game(11);
        let x = state.active().unwrap().x;
        state.apply(Command::Press(HeldInput::Right));
        state.tick(0);
        assert_eq!(state.active().unwrap().x, x + 1);
        state.tick(150);
        assert_eq!(state.active().unwrap().x, x + 1);
        state.tick(151);
        assert_eq!(state.active().unwrap().x, x + 2);
        state.tick(251);
        assert_eq!(state.active().unwrap().x, x + 2);
        state.tick(252);
        assert_eq!(state.active().unwrap().x, x + 3);
    }

    #[test]
    fn test_pause_is_fully_inert() {
        let mut state = game(12);
        state.tick(0);
        assert!(state.apply(Command::Pause));
        assert!(state.paused());

        let before = state.active();
        assert!(!state.try_move(1, 0));
        assert!(!state.try_rotate());
        assert_eq!(state.hard_drop(), 0);
        assert!(!state.hold());
        assert!(!state.apply(Command::Rotate));
        state.tick(50_000);
        assert_eq!(state.active(), before);
        assert_eq!(state.board().filled_count(), 0);
    }

    #[test]
    fn test_key_pressed_while_paused_moves_after_resume() {
        let mut state = game(18);
        state.set_active(Piece::spawn(PieceKind::O));
        state.tick(0);
        state.apply(Command::Pause);

        assert!(state.apply(Command::Press(HeldInput::Left)));
        assert!(state.clock().is_held(HeldInput::Left));
        state.tick(1_000);
        assert_eq!(state.active().unwrap().x, 4);

        state.apply(Command::Pause);
        state.tick(2_000);
        assert_eq!(state.active().unwrap().x, 3);
    }

    #[test]
    fn test_resume_does_not_credit_paused_time() {
        let mut state = game(13);
        let y = state.active().unwrap().y;
        state.tick(0);
        state.tick(900);
        state.apply(Command::Pause);
        state.tick(60_000);
        state.apply(Command::Pause);

        // First tick after resume has zero elapsed time.
        state.tick(120_000);
        assert_eq!(state.active().unwrap().y, y);
        assert_eq!(state.snapshot().elapsed_ms, 900);

        state.tick(120_100);
        assert_eq!(state.active().unwrap().y, y + 1);
    }

    #[test]
    fn test_game_over_on_blocked_spawn() {
        let mut state = game(14);
        for y in 0..2 {
            fill_row_except(state.board_mut(), y, &[0]);
        }
        assert!(!state.spawn_piece());
        assert!(state.game_over());
        assert!(state.active().is_none());

        // Terminal: only restart is accepted.
        assert!(!state.apply(Command::Rotate));
        assert!(!state.apply(Command::Pause));
        assert!(!state.apply(Command::Hold));
        state.tick(10_000);

        assert!(state.apply(Command::Restart));
        assert!(!state.game_over());
        assert!(state.active().is_some());
        assert_eq!(state.board().filled_count(), 0);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_lock_event_reports_game_over() {
        let mut state = game(15);
        for y in 0..BOARD_HEIGHT as i8 {
            fill_row_except(state.board_mut(), y, &[0, 9]);
        }
        state.set_active(Piece {
            kind: PieceKind::I,
            shape: Shape::from_rows(&[&[1], &[1], &[1], &[1]]),
            x: 0,
            y: 0,
        });
        state.lock_piece();
        assert!(state.game_over());
        assert!(state.take_last_event().unwrap().game_over);
    }

    #[test]
    fn test_restart_clears_everything() {
        let mut state = game(16);
        state.hold();
        state.hard_drop();
        state.apply(Command::Press(HeldInput::Left));
        assert!(state.apply(Command::Restart));

        assert_eq!(state.score(), 0);
        assert!(state.hold_piece().is_none());
        assert!(state.can_hold());
        assert_eq!(state.board().filled_count(), 0);
        assert!(!state.clock().is_held(HeldInput::Left));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = game(17);
        state.set_active(Piece::spawn(PieceKind::T));
        let snap = state.snapshot();
        let active = snap.active.unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!(active.color, PieceKind::T.color());
        assert_eq!(snap.ghost.unwrap().y, 18);
        assert_eq!(snap.next_queue, state.next_queue());
        assert_eq!(snap.level, 1);
        assert!(snap.playable());
        assert!(snap.timers.lock_remaining_ms.is_none());
    }
}
