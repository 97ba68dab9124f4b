mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use sprite_shooter::audio::{self, AudioSink, Bell, Mute};
use sprite_shooter::clock::{Clock, SystemClock};
use sprite_shooter::compute::{init_state, tick, FrameInput, Held};
use sprite_shooter::config::GameConfig;

#[derive(Parser, Debug)]
#[command(about = "Shoot the falling targets before they reach the bottom")]
struct Args {
    /// RON config file. Defaults to ./sprite_shooter.ron if present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed the RNG for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs here instead of the configured or default location.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Disable the hit bell.
    #[arg(long)]
    mute: bool,
}

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// at 60 FPS, 8 frames (≈133 ms) outlasts the OS key-repeat interval.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

fn held_directions(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Held {
    Held {
        left: is_held(
            key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        ),
        right: is_held(
            key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        ),
        up: is_held(
            key_frame,
            &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
            frame,
        ),
        down: is_held(
            key_frame,
            &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
            frame,
        ),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event for every key, and each frame the still-fresh keys become the held
/// directions handed to `tick`.  A reset request is latched and applied by
/// `tick` at the next frame boundary.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    rng: &mut StdRng,
    sink: &mut impl AudioSink,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let clock = SystemClock::new();
    let frame_len = config.rules.frame_duration();
    let mut state = init_state(config.rules.clone(), clock.now());

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut reset = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            log::info!("quit requested");
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => reset = true,
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = FrameInput {
            held: held_directions(&key_frame, frame),
            reset,
        };
        let (next, report) = tick(state, &input, &clock, rng);
        state = next;
        audio::play_frame(&report, sink);

        let size = terminal::size()?;
        display::render(out, &state, clock.now(), size)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("could not create log file {:?}", path))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (config, warning) = GameConfig::load(args.config.as_deref()).context("loading config")?;
    let log_path = args.log_file.clone().unwrap_or_else(|| config.log_path());
    init_logging(&log_path)?;
    if let Some(warning) = warning {
        log::warn!("{}", warning);
    }
    log::info!("sprite_shooter starting, rules: {:?}", config.rules);

    let (cols, rows) = terminal::size().context("querying terminal size")?;
    if cols < display::MIN_COLS || rows < display::MIN_ROWS {
        bail!(
            "terminal is {}x{}, need at least {}x{}",
            cols,
            rows,
            display::MIN_COLS,
            display::MIN_ROWS
        );
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
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
            Err(_) => break,
        }
    });

    let result = if config.sound && !args.mute {
        game_loop(&mut out, &config, &mut rng, &mut Bell::new(stdout()), &rx)
    } else {
        game_loop(&mut out, &config, &mut rng, &mut Mute, &rx)
    };

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("exiting on error: {:#}", e);
    }
    result
}
