use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing_subscriber::EnvFilter;

use bug_crossing::compute::{apply_input, init_state, tick};
use bug_crossing::config::GameConfig;
use bug_crossing::display::{self, Viewport};
use bug_crossing::entities::{GameEvent, GameState};
use bug_crossing::input::Action;
use bug_crossing::render::SpriteSheet;

const CONFIG_ENV: &str = "BUG_CROSSING_CONFIG";
const LOG_ENV: &str = "BUG_CROSSING_LOG";

/// Largest `dt` handed to the simulation, so a stalled terminal does not
/// teleport the bugs.
const MAX_DT: f64 = 0.25;

// ── Setup ─────────────────────────────────────────────────────────────────────

/// The screen belongs to the game, so logs only go to a file, and only when
/// one is named.
fn init_tracing() -> Result<()> {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("creating log file {}", PathBuf::from(&path).display()))?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
    Ok(())
}

/// First CLI argument, then the environment, then built-in defaults.
fn load_config() -> Result<GameConfig> {
    let path = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(CONFIG_ENV))
        .map(PathBuf::from);
    match path {
        Some(path) => Ok(GameConfig::load(&path)?),
        None => Ok(GameConfig::default()),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Each frame: drain key events and apply them, advance the world by the
/// measured `dt`, draw, then check whether a new game was requested.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    keys: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let sheet = SpriteSheet::standard();
    let viewport = Viewport::default();
    let frame_budget = Duration::from_secs_f64(1.0 / f64::from(config.frame.target_fps));

    let (events_tx, events_rx) = mpsc::channel::<GameEvent>();
    let mut state: GameState = init_state(config, &mut rng);
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = keys.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            // One move per press; repeats and releases are ignored.
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                _ => {
                    state = apply_input(&state, Action::from_key(&code), &events_tx);
                }
            }
        }

        let dt = last.elapsed().as_secs_f64().min(MAX_DT);
        last = Instant::now();
        state = tick(&state, dt);

        display::render(out, &state, &sheet, &viewport)?;

        // ── New game requested? ───────────────────────────────────────────────
        while let Ok(GameEvent::StartNewGame) = events_rx.try_recv() {
            tracing::info!(frames = state.frame, "starting new game");
            state = init_state(config, &mut rng);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing()?;
    let config = load_config()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Needed to tell presses from releases; terminals without support fall
    // back to press-only events.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                tracing::error!(%err, "terminal event read failed");
                break;
            }
        }
    });

    tracing::info!(enemies = config.enemies.count, "bug crossing starting");
    let result = game_loop(&mut out, &config, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("game loop failed")
}
