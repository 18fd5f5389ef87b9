use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_invaders::compute::{init_state, tick};
use space_invaders::display::{self, terminal::TerminalCanvas};
use space_invaders::frontend::{self, KeyHoldTracker};
use space_invaders::input::handle_key;
use space_invaders::{Config, GameError};

fn init_logging(config: &Config) -> anyhow::Result<()> {
    // stderr shares the screen with the game, so only log to a file.
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Each tick: drain input, update, repaint,
/// then sleep out the rest of the period.
fn game_loop<W: Write>(
    out: &mut W,
    canvas: &mut TerminalCanvas,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    key_release_events: bool,
) -> anyhow::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let period = config.tick_period();
    let mut state = init_state(&mut rng, config.bounds);
    let mut holds = KeyHoldTracker::new();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending events (non-blocking) ──────────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => {
                    if frontend::is_quit(&key) {
                        log::info!("quit at level {} with score {}", state.level, state.score);
                        return Ok(());
                    }
                    if let Some(input) = frontend::translate(&key) {
                        if !key_release_events {
                            holds.observe(input, state.frame);
                        }
                        state = handle_key(&state, input);
                    }
                }
                Event::Resize(cols, rows) => match canvas.resize(cols, rows) {
                    Ok(()) => log::debug!("terminal resized to {cols}x{rows}"),
                    Err(e) => log::warn!("ignoring resize: {e}"),
                },
                _ => {}
            }
        }

        if !key_release_events {
            for release in holds.expire(state.frame) {
                state = handle_key(&state, release);
            }
        }

        state = tick(&state, &mut rng);

        display::render(canvas, &state);
        canvas.present(out).context("drawing frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < period {
            thread::sleep(period - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate()?;
    init_logging(&config)?;
    log::info!("starting with {config:?}");

    let (cols, rows) = terminal::size().map_err(GameError::from)?;
    let mut canvas = TerminalCanvas::new(cols, rows)?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-release events (kitty protocol) make held keys exact; otherwise
    // `KeyHoldTracker` infers releases from the key-repeat stream.
    let key_release_events = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::info!("key release events: {key_release_events}");

    // Blocking reads live on their own thread so the loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, &mut canvas, &rx, &config, key_release_events);

    // Always restore the terminal
    if key_release_events {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("{e:#}");
    }
    result
}
