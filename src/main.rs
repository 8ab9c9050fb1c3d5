mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc::{self, TryRecvError};
use std::thread;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::thread_rng;

use beam_fighter::config::GameConfig;
use beam_fighter::entities::{HeldKeys, InputEvent};
use beam_fighter::game::{Exit, FramePacer, GameLoop, InputSource};

use crate::display::TerminalSurface;

const TITLE: &str = "Fight, Kokaton!";

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 5 frames (100 ms at
/// 50 FPS) is refreshed before it expires.
const HOLD_WINDOW: u64 = 5;

const UP_KEYS: [KeyCode; 3] = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN_KEYS: [KeyCode; 3] = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

/// Keyboard input fed by the reader thread.
///
/// Instead of acting on each key event individually, we record the frame
/// number of the last press/repeat event for every key. Works on two
/// classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): proper
///   `Press` / `Repeat` / `Release` events, so keys drop out on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`). Keys expire after `HOLD_WINDOW` frames of silence.
struct KeyboardInput {
    rx: mpsc::Receiver<Event>,
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl KeyboardInput {
    fn new(rx: mpsc::Receiver<Event>) -> Self {
        Self { rx, key_frame: HashMap::new(), frame: 0 }
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| {
            self.key_frame
                .get(key)
                .is_some_and(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
        })
    }
}

impl InputSource for KeyboardInput {
    fn drain_events(&mut self) -> Vec<InputEvent> {
        self.frame += 1;
        let mut events = Vec::new();

        loop {
            let ev = match self.rx.try_recv() {
                Ok(ev) => ev,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("keyboard reader stopped; quitting");
                    events.push(InputEvent::Quit);
                    break;
                }
            };
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };

            match kind {
                KeyEventKind::Press => {
                    self.key_frame.insert(code, self.frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            events.push(InputEvent::Quit);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            events.push(InputEvent::Quit);
                        }
                        KeyCode::Char(' ') => events.push(InputEvent::Fire),
                        _ => {}
                    }
                }
                // Refresh timestamp so the key stays "held"
                KeyEventKind::Repeat => {
                    self.key_frame.insert(code, self.frame);
                }
                KeyEventKind::Release => {
                    self.key_frame.remove(&code);
                }
            }
        }
        events
    }

    fn held(&self) -> HeldKeys {
        HeldKeys {
            up: self.any_held(&UP_KEYS),
            down: self.any_held(&DOWN_KEYS),
            left: self.any_held(&LEFT_KEYS),
            right: self.any_held(&RIGHT_KEYS),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    // Logs go to stderr; redirect it to keep them off the game screen.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("entering alternate screen")?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::SetTitle(TITLE))?;

    // Request key-release (and key-repeat) events from the terminal.
    // Terminals without the kitty protocol fall back to hold windows.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let (exit, score) = result?;
    info!("game ended: {exit:?}");
    match exit {
        Exit::Lost => println!("Game Over — Score: {score}"),
        Exit::Won => println!("Game Clear — Score: {score}"),
        Exit::Quit => println!("Score: {score}"),
    }
    Ok(())
}

fn run<W: Write>(out: &mut W, rx: mpsc::Receiver<Event>) -> Result<(Exit, u32)> {
    let config = GameConfig::default();
    let surface = TerminalSurface::new(out, config.field);
    let input = KeyboardInput::new(rx);

    let mut game = GameLoop::start(config, &mut thread_rng(), surface, input, FramePacer::new())?;
    let exit = game.run()?;
    Ok((exit, game.state().score.value))
}
