//! The frame loop and the seams it drives.
//!
//! `GameLoop` owns the game state and three collaborators: a [`Surface`]
//! to draw on, an [`InputSource`] to poll, and a [`Pacer`] that keeps the
//! frame rate. The binary plugs in a terminal; tests plug in fakes.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rand::Rng;

use crate::compute::{
    init_state, move_player, resolve_collisions, spawn_beam, step_beam, step_bomb,
    step_explosion,
};
use crate::config::GameConfig;
use crate::entities::{
    Anchor, GameState, GameStatus, HeldKeys, InputEvent, Rect, Rgb, Sprite, TextSize, TextStyle,
};

// ── Collaborators ────────────────────────────────────────────────────────────

/// Something frames can be drawn on. Nothing is visible until `present`.
pub trait Surface {
    /// Paint the background over the whole field.
    fn clear(&mut self) -> io::Result<()>;
    fn draw(&mut self, sprite: Sprite, rect: &Rect) -> io::Result<()>;
    fn draw_text(&mut self, text: &str, at: Anchor, style: TextStyle) -> io::Result<()>;
    fn present(&mut self) -> io::Result<()>;
}

pub trait InputSource {
    /// Take every press queued since the last call. Never blocks.
    fn drain_events(&mut self) -> Vec<InputEvent>;
    /// Direction keys held right now.
    fn held(&self) -> HeldKeys;
}

pub trait Pacer {
    /// Block until the next frame boundary at `fps` frames per second.
    fn tick(&mut self, fps: u32);
    /// Block for a fixed real-time delay.
    fn hold(&mut self, duration: Duration);
}

/// Wall-clock pacer: sleeps off whatever is left of the frame budget.
#[derive(Debug, Default)]
pub struct FramePacer {
    last_tick: Option<Instant>,
}

impl FramePacer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Pacer for FramePacer {
    fn tick(&mut self, fps: u32) {
        let budget = Duration::from_secs(1) / fps.max(1);
        if let Some(last) = self.last_tick {
            let elapsed = last.elapsed();
            if elapsed < budget {
                thread::sleep(budget - elapsed);
            } else if elapsed > budget * 2 {
                warn!("frame overran its budget: {elapsed:?} > {budget:?}");
            }
        }
        self.last_tick = Some(Instant::now());
    }

    fn hold(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

// ── Loop ─────────────────────────────────────────────────────────────────────

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    Lost,
    Won,
    /// The player asked to quit mid-game.
    Quit,
}

const BANNER_STYLE: TextStyle = TextStyle { color: Rgb::RED, size: TextSize::Large };
const SCORE_STYLE: TextStyle = TextStyle { color: Rgb::BLUE, size: TextSize::Small };

pub struct GameLoop<S, I, P> {
    config: GameConfig,
    state: GameState,
    surface: S,
    input: I,
    pacer: P,
}

impl<S: Surface, I: InputSource, P: Pacer> GameLoop<S, I, P> {
    /// Validate `config` and lay out a fresh game.
    pub fn start(
        config: GameConfig,
        rng: &mut impl Rng,
        surface: S,
        input: I,
        pacer: P,
    ) -> Result<Self> {
        config.validate().context("invalid game configuration")?;
        let state = init_state(&config, rng);
        info!(
            "starting game: {} bombs on a {}x{} field",
            state.bombs.len(),
            state.field.width,
            state.field.height
        );
        Ok(Self::with_state(config, state, surface, input, pacer))
    }

    /// Resume from an arbitrary state.
    pub fn with_state(config: GameConfig, state: GameState, surface: S, input: I, pacer: P) -> Self {
        Self { config, state, surface, input, pacer }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Run frames until the game is lost, won or quit.
    pub fn run(&mut self) -> Result<Exit> {
        loop {
            if let Some(exit) = self.step()? {
                return Ok(exit);
            }
        }
    }

    /// Run one frame. `Some` once the loop has to stop.
    pub fn step(&mut self) -> Result<Option<Exit>> {
        for event in self.input.drain_events() {
            match event {
                InputEvent::Quit => {
                    info!("quit requested at frame {}", self.state.frame);
                    return Ok(Some(Exit::Quit));
                }
                InputEvent::Fire => {
                    let beam = spawn_beam(&self.state.player, self.config.beam_size);
                    debug!("beam fired from {:?} at {}°", beam.rect.center(), beam.degrees);
                    self.state.beams.push(beam);
                }
            }
        }

        self.surface.clear().context("drawing background")?;

        self.state = resolve_collisions(&self.state, &self.config);
        match self.state.status {
            GameStatus::Lost => {
                self.finish("Game Over")?;
                return Ok(Some(Exit::Lost));
            }
            GameStatus::Won => {
                self.finish("Game Clear")?;
                return Ok(Some(Exit::Won));
            }
            GameStatus::Running => {}
        }

        self.advance().context("rendering frame")?;
        self.pacer.tick(self.config.frame_rate);
        Ok(None)
    }

    /// Move and draw every entity, then show the frame.
    fn advance(&mut self) -> io::Result<()> {
        let field = self.state.field;
        let keys = self.input.held();

        self.state.player = move_player(&self.state.player, keys, field);
        let player = &self.state.player;
        self.surface.draw(player.sprite(), &player.rect)?;

        for beam in self.state.beams.iter_mut() {
            if let Some(next) = step_beam(beam, field) {
                *beam = next;
                self.surface.draw(beam.sprite(), &beam.rect)?;
            }
        }

        for bomb in self.state.bombs.iter_mut() {
            *bomb = step_bomb(bomb, field);
            self.surface.draw(bomb.sprite(), &bomb.rect)?;
        }

        for explosion in self.state.explosions.iter_mut() {
            if let Some(next) = step_explosion(explosion) {
                *explosion = next;
                self.surface.draw(explosion.sprite(), &explosion.rect)?;
            }
        }

        let (sx, sy) = self.config.score_anchor;
        self.surface
            .draw_text(&self.state.score.label(), Anchor::Center(sx, sy), SCORE_STYLE)?;

        self.surface.present()?;
        self.state.frame += 1;
        Ok(())
    }

    /// Show the end-of-game banner and keep it up for a moment.
    fn finish(&mut self, banner: &str) -> Result<()> {
        info!(
            "{banner} at frame {} with score {}",
            self.state.frame, self.state.score.value
        );
        let (bx, by) = self.config.banner_anchor;
        self.surface
            .draw_text(banner, Anchor::TopLeft(bx, by), BANNER_STYLE)
            .and_then(|()| self.surface.present())
            .context("drawing end-of-game banner")?;
        self.pacer.hold(self.config.end_hold);
        Ok(())
    }
}
