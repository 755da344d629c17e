mod display;
mod sound;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use slinger::clock::MonotonicClock;
use slinger::config::ArenaConfig;
use slinger::driver::{Flow, Session};
use slinger::input::InputEvent;

use crate::display::{CELL_H, CELL_W};
use crate::sound::CuePlayer;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

type ArenaSession = Session<MonotonicClock, StdRng>;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Environment ───────────────────────────────────────────────────────────────

/// Logs go to `SLINGER_LOG` when set; the terminal itself is busy drawing,
/// so stderr logging is off unless `RUST_LOG` asks for it.
fn init_logging() {
    let log_file = std::env::var("SLINGER_LOG")
        .ok()
        .and_then(|path| match std::fs::File::create(&path) {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("cannot open log file {}: {}", path, e);
                None
            }
        });

    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(file) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
}

fn make_rng() -> StdRng {
    match std::env::var("SLINGER_SEED").ok().and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => {
            info!("using RNG seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame the held state of the movement keys is
/// compared with the session's flags and the difference is fed in as
/// press/release events.  Fire and restart act on the press edge only.
///
/// When the arena reaches game over no more ticks are requested: the loop
/// blocks on the input channel until Enter restarts or the player quits.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut ArenaSession,
    rx: &mpsc::Receiver<Event>,
    sound: &CuePlayer,
) -> std::io::Result<()> {
    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    if is_quit(code, modifiers) {
                        return Ok(());
                    }
                    if code == KeyCode::Char(' ') {
                        session.handle(InputEvent::Fire);
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

        // ── Sync movement flags with held keys ────────────────────────────────
        let left = any_held(&key_frame, &LEFT_KEYS, frame);
        let right = any_held(&key_frame, &RIGHT_KEYS, frame);
        let flags = session.input();
        if left != flags.left {
            session.handle(if left { InputEvent::LeftPressed } else { InputEvent::LeftReleased });
        }
        if right != flags.right {
            session.handle(if right { InputEvent::RightPressed } else { InputEvent::RightReleased });
        }

        let flow = session.step();
        sound.play_all(out, &session.take_cues());
        display::render(out, session.state())?;

        if flow == Flow::Stopped {
            key_frame.clear();
            if !wait_for_restart(session, rx) {
                return Ok(());
            }
            continue;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

/// Block until Enter (returns `true`) or a quit key (returns `false`).
fn wait_for_restart(session: &mut ArenaSession, rx: &mpsc::Receiver<Event>) -> bool {
    loop {
        let Ok(ev) = rx.recv() else {
            return false;
        };
        if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) = ev {
            if is_quit(code, modifiers) {
                return false;
            }
            if code == KeyCode::Enter && session.handle(InputEvent::Restart) == Flow::Continue {
                // Movement keys held across the restart start released.
                let flags = session.input();
                if flags.left {
                    session.handle(InputEvent::LeftReleased);
                }
                if flags.right {
                    session.handle(InputEvent::RightReleased);
                }
                return true;
            }
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

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
            Err(e) => {
                warn!("input thread stopped: {}", e);
                break;
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let config = ArenaConfig::for_arena(width as i32 * CELL_W, height as i32 * CELL_H);
    info!("terminal {}x{} cells, arena {}x{} px", width, height, config.width, config.height);

    let sound = CuePlayer::new(std::env::var_os("SLINGER_MUTE").is_some());
    let mut session = Session::new(config, MonotonicClock::new(), make_rng());
    game_loop(out, &mut session, rx, &sound)?;

    info!("quit with score {}", session.state().score);
    Ok(())
}
