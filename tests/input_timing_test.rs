//! Input handler and engine driven together, frame by frame, like the binary.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use blockfall::core::{EngineConfig, GameState, Piece, PieceFactory};
use blockfall::input::{held_input, InputHandler};
use blockfall::types::PieceKind;

const FRAME_MS: u64 = 16;

fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
}

fn game_with_o() -> GameState {
    let mut game = GameState::with_factory(EngineConfig::default(), PieceFactory::seeded(21));
    game.start();
    game.set_active(Piece::spawn(PieceKind::O));
    game
}

/// Deliver each event at its timestamp, then update the handler and tick the
/// engine once per frame until `until_ms`.
fn run(game: &mut GameState, input: &mut InputHandler, events: &[(u64, KeyEvent)], until_ms: u64) {
    let mut pending = events.iter().peekable();
    let mut now = 0;
    while now <= until_ms {
        while let Some(&&(at, event)) = pending.peek() {
            if at > now {
                break;
            }
            if let Some(command) = input.handle_key_event(event, at) {
                game.apply(command);
            }
            pending.next();
        }
        for command in input.update(now) {
            game.apply(command);
        }
        game.tick(now);
        now += FRAME_MS;
    }
}

#[test]
fn test_tap_without_release_events_moves_one_cell() {
    for (code, expected_x) in [(KeyCode::Left, 3), (KeyCode::Right, 5)] {
        let mut game = game_with_o();
        let mut input = InputHandler::new();

        run(&mut game, &mut input, &[(5, key(code, KeyEventKind::Press))], 320);

        assert_eq!(game.active().unwrap().x, expected_x, "{code:?}");
        assert!(!input.is_held(held_input(code).unwrap()));
    }
}

#[test]
fn test_soft_drop_tap_without_release_events_drops_one_row() {
    let mut game = game_with_o();
    let mut input = InputHandler::new();

    run(&mut game, &mut input, &[(5, key(KeyCode::Down, KeyEventKind::Press))], 320);

    assert_eq!(game.active().unwrap().y, 1);
    assert_eq!(game.score(), 1);
}

#[test]
fn test_auto_repeated_presses_keep_sliding() {
    let mut game = game_with_o();
    let mut input = InputHandler::new();

    // Terminal auto-repeat: one press, a pause, then a steady stream.
    let mut events: Vec<(u64, KeyEvent)> = vec![(0, key(KeyCode::Left, KeyEventKind::Press))];
    events.extend((250..=600).step_by(30).map(|t| (t, key(KeyCode::Left, KeyEventKind::Press))));

    run(&mut game, &mut input, &events, 700);

    assert_eq!(game.active().unwrap().x, 0);
}

#[test]
fn test_held_key_with_release_events_repeats_until_released() {
    let mut game = game_with_o();
    let mut input = InputHandler::new().with_key_release_timeout_ms(u32::MAX);

    let events: [(u64, KeyEvent); 2] = [
        (0, key(KeyCode::Left, KeyEventKind::Press)),
        (300, key(KeyCode::Left, KeyEventKind::Release)),
    ];
    run(&mut game, &mut input, &events, 800);

    // First step, then a repeat after the delay, then one more per interval.
    assert_eq!(game.active().unwrap().x, 1);
}
