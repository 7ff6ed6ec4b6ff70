mod audio;
mod config;
mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
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
use tracing_subscriber::EnvFilter;

use space_invaders::host::AssetCache;
use space_invaders::{Command, GameSession};

use crate::audio::TerminalAudio;
use crate::config::{Args, Config};
use crate::display::Screen;

// ── Held keys ─────────────────────────────────────────────────────────────────

/// How long a movement or fire key stays down after its last press or repeat
/// event. Longer than the gap between OS auto-repeat events, so a key held on
/// a terminal without release events never drops out between repeats.
const HOLD_WINDOW: Duration = Duration::from_millis(133);

/// `HOLD_WINDOW` expressed in ticks of `frame` length (at least one).
fn hold_window_ticks(frame: Duration) -> u64 {
    let ticks = HOLD_WINDOW.as_secs_f64() / frame.as_secs_f64();
    (ticks.ceil() as u64).max(1)
}

/// Returns true if `key` was seen within the last `window` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64, window: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= window)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64, window: u64) -> bool {
    keys.iter().any(|key| is_held(key_frame, key, frame, window))
}

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const FIRE_KEYS: [KeyCode; 1] = [KeyCode::Char(' ')];

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so log lines go to a file.
fn init_tracing(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Tick loop; returns when a quit key is pressed.
///
/// Pause, restart and quit fire once on their press event. Movement and fire
/// are re-issued as commands on every tick while `key_frame` says the key is
/// down, so the ship can strafe and shoot at once. A `Release` event clears a
/// key straight away; without release events a key lapses once its last
/// press is older than the hold window.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    assets: &AssetCache,
    audio: &mut TerminalAudio,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
) -> std::io::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let window = hold_window_ticks(config.frame);

    // Key -> tick of its latest press or repeat.
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Input ─────────────────────────────────────────────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => {
                            session.handle(Command::TogglePause);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            session.handle(Command::Restart);
                        }
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

        // ── Held commands, then one tick ──────────────────────────────────────
        if any_held(&key_frame, &LEFT_KEYS, frame, window) {
            session.handle(Command::MoveLeft);
        } else if any_held(&key_frame, &RIGHT_KEYS, frame, window) {
            session.handle(Command::MoveRight);
        }
        if any_held(&key_frame, &FIRE_KEYS, frame, window) {
            session.handle(Command::Fire);
        }

        session.update(&mut rng);
        session.play_sounds(audio);

        let (cols, rows) = terminal::size()?;
        let mut screen = Screen::new(assets, cols, rows);
        session.draw(&mut screen);
        screen.draw_controls_hint();
        audio.ring(out)?;
        screen.present(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < config.frame {
            thread::sleep(config.frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = Args::parse().into_config()?;
    init_tracing(&config.log_file)?;

    let mut assets = AssetCache::new();
    let mut session = GameSession::new(&mut assets);
    let mut audio = TerminalAudio::new(&assets, config.bell);
    tracing::info!(
        images = assets.image_count(),
        sounds = assets.sound_count(),
        seed = ?config.seed,
        "session ready"
    );

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events are optional; without them held keys time out.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads happen off the tick thread.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, &mut session, &assets, &mut audio, &rx, &config);

    // Undo the terminal setup whether or not the loop failed.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    tracing::info!(score = session.score(), frames = session.frame(), "session ended");
    result.context("game loop failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_window_scales_with_frame_rate() {
        assert_eq!(hold_window_ticks(Duration::from_secs_f64(1.0 / 60.0)), 8);
        assert_eq!(hold_window_ticks(Duration::from_secs_f64(1.0 / 30.0)), 4);
        assert_eq!(hold_window_ticks(Duration::from_secs(1)), 1);
    }

    #[test]
    fn held_keys_expire_after_the_window() {
        let mut key_frame = HashMap::new();
        key_frame.insert(KeyCode::Char('a'), 10);
        assert!(any_held(&key_frame, &LEFT_KEYS, 14, 4));
        assert!(!any_held(&key_frame, &LEFT_KEYS, 15, 4));
        assert!(!any_held(&key_frame, &RIGHT_KEYS, 10, 4));
    }
}
