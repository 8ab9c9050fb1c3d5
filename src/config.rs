//! Game tuning constants, gathered into one struct handed to the game loop.

use std::time::Duration;

use anyhow::{ensure, Result};

use crate::entities::{Field, Rect, Rgb};

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub field: Field,
    pub bomb_count: usize,
    pub bomb_radius: i32,
    pub bomb_color: Rgb,
    /// Per-axis bomb speed; bombs start moving down-right.
    pub bomb_speed: i32,
    pub player_start: (i32, i32),
    pub player_size: (i32, i32),
    pub player_step: i32,
    /// Unrotated beam image size; the box grows when the image is rotated.
    pub beam_size: (i32, i32),
    pub explosion_size: (i32, i32),
    pub explosion_life: u32,
    pub frame_rate: u32,
    /// How long the Game Over / Game Clear banner stays up.
    pub end_hold: Duration,
    /// Center of the score text.
    pub score_anchor: (i32, i32),
    /// Top-left of the end-of-game banner.
    pub banner_anchor: (i32, i32),
}

impl Default for GameConfig {
    fn default() -> Self {
        let field = Field { width: 1100, height: 650 };
        Self {
            field,
            bomb_count: 5,
            bomb_radius: 10,
            bomb_color: Rgb::RED,
            bomb_speed: 5,
            player_start: (300, 200),
            player_size: (90, 90),
            player_step: 5,
            beam_size: (60, 20),
            explosion_size: (60, 60),
            explosion_life: 10,
            frame_rate: 50,
            end_hold: Duration::from_secs(1),
            score_anchor: (100, field.height - 50),
            banner_anchor: (field.width / 2 - 150, field.height / 2),
        }
    }
}

impl GameConfig {
    /// Reject values the game cannot start with.
    pub fn validate(&self) -> Result<()> {
        let Field { width, height } = self.field;
        ensure!(width > 0 && height > 0, "field must be non-empty, got {width}x{height}");
        ensure!(self.frame_rate > 0, "frame rate must be positive");
        ensure!(self.bomb_count > 0, "at least one bomb is required");
        ensure!(self.bomb_radius > 0, "bomb radius must be positive");
        ensure!(
            2 * self.bomb_radius < width && 2 * self.bomb_radius < height,
            "bomb diameter {} does not fit the {width}x{height} field",
            2 * self.bomb_radius
        );
        ensure!(self.player_step > 0, "player step must be positive");
        ensure!(
            self.beam_size.0 > 0 && self.beam_size.1 > 0,
            "beam size must be positive"
        );

        let (cx, cy) = self.player_start;
        let start = Rect::from_center(cx, cy, self.player_size.0, self.player_size.1);
        ensure!(
            start.left() >= 0 && start.top() >= 0 && start.right() <= width && start.bottom() <= height,
            "player start box {start:?} lies outside the field"
        );
        Ok(())
    }
}
