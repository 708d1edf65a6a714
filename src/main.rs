//! Terminal runner (default binary).
//!
//! Polls crossterm input, feeds commands into the engine, ticks it once per
//! frame with a monotonic timestamp and renders the snapshot through the
//! framebuffer renderer.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};

use blockfall::core::{EngineConfig, GameSnapshot, GameState, PieceFactory};
use blockfall::input::{should_quit, InputHandler, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::Command;

/// Target frame interval (~60 FPS).
const FRAME_MS: u64 = 16;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file overriding engine timings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (stdout belongs to the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Maximum log level written to the log file
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    /// Release a held key after this long without events (terminals without
    /// key release reporting)
    #[arg(long, default_value_t = DEFAULT_KEY_RELEASE_TIMEOUT_MS)]
    key_release_timeout_ms: u32,

    /// Seed for a reproducible piece sequence
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    let config = load_config(args.config.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &args, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(args.log_level)
        .init();
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = EngineConfig::from_json(&text)
        .with_context(|| format!("invalid config {}", path.display()))?;
    info!(?config, "loaded config");
    Ok(config)
}

fn run(term: &mut TerminalRenderer, args: &Args, config: EngineConfig) -> Result<()> {
    // With real release events a key is held until it is released. Otherwise
    // a tap stays "held" until the timeout, so repeats must not start sooner.
    let (timeout_ms, config) = if term.key_release_events() {
        (u32::MAX, config)
    } else {
        let timeout_ms = args.key_release_timeout_ms;
        let delay_ms = config.repeat_delay_ms.max(timeout_ms);
        (timeout_ms, config.with_repeat_delay_ms(delay_ms))
    };
    let mut input = InputHandler::new().with_key_release_timeout_ms(timeout_ms);

    let factory = args.seed.map_or_else(PieceFactory::new, PieceFactory::seeded);
    let mut game = GameState::with_factory(config, factory);
    game.start();
    info!(
        seed = ?args.seed,
        repeat_delay_ms = config.repeat_delay_ms,
        "game started"
    );

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut last_drawn: Option<(u64, u16, u16)> = None;

    let epoch = Instant::now();
    let now_ms = || epoch.elapsed().as_millis() as u64;
    let frame = Duration::from_millis(FRAME_MS);
    let mut next_frame = Instant::now();

    loop {
        // Render, skipping frames where nothing visible changed.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let frame_key = (snap.fingerprint(), w, h);
        if last_drawn != Some(frame_key) {
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            last_drawn = Some(frame_key);
        }

        next_frame += frame;
        let now = Instant::now();
        if next_frame < now {
            next_frame = now;
        }

        // Input until the next frame is due.
        while event::poll(next_frame.saturating_duration_since(Instant::now()))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        info!(score = game.score(), lines = game.lines(), "quit");
                        return Ok(());
                    }
                    if let Some(command) = input.handle_key_event(key, now_ms()) {
                        game.apply(command);
                        if command == Command::Restart {
                            // The engine already dropped its held inputs.
                            let _ = input.reset();
                        }
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    last_drawn = None;
                }
                _ => {}
            }
        }

        // Tick.
        let now = now_ms();
        for command in input.update(now) {
            game.apply(command);
        }
        game.tick(now);

        if let Some(event) = game.take_last_event() {
            debug!(
                lines = event.lines_cleared,
                points = event.line_clear_score,
                combo = event.combo,
                b2b = event.back_to_back,
                game_over = event.game_over,
                "lock event"
            );
        }
    }
}
