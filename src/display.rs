//! Rendering layer — all terminal output lives here.
//!
//! `TerminalSurface` implements the game's `Surface` by scaling the pixel
//! field onto the terminal's character grid. No game logic is performed;
//! this module only translates draw calls into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal,
    QueueableCommand,
};
use beam_fighter::entities::{Anchor, Direction, Field, Rect, Rgb, Sprite, TextSize, TextStyle};
use beam_fighter::game::Surface;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::Yellow;
const C_BEAM: Color = Color::Cyan;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

const CONTROLS_HINT: &str = "←↑↓→ / WASD : Move   SPACE : Fire   Q : Quit";

fn color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.0, g: rgb.1, b: rgb.2 }
}

// ── Glyph table ───────────────────────────────────────────────────────────────

fn player_glyph(facing: Direction) -> &'static str {
    match facing {
        Direction::Right => "(→)",
        Direction::UpRight => "(↗)",
        Direction::Up => "(↑)",
        Direction::UpLeft => "(↖)",
        Direction::Left => "(←)",
        Direction::DownLeft => "(↙)",
        Direction::Down => "(↓)",
        Direction::DownRight => "(↘)",
    }
}

/// Closest line glyph for a beam rotated by `degrees`.
fn beam_glyph(degrees: f64) -> &'static str {
    let octant = (degrees / 45.0).round().rem_euclid(4.0) as i32;
    match octant {
        0 => "━━",
        1 => "╱",
        2 => "┃",
        _ => "╲",
    }
}

fn explosion_glyph(frame: u8) -> &'static str {
    if frame == 0 {
        "\\*/"
    } else {
        "/*\\"
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

pub struct TerminalSurface<W: Write> {
    out: W,
    field: Field,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, field: Field) -> Self {
        Self { out, field, cols: 80, rows: 24 }
    }

    /// Terminal cell holding field point `(x, y)`, if it is on screen.
    fn cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= self.field.width || y >= self.field.height {
            return None;
        }
        let col = i64::from(x) * i64::from(self.cols) / i64::from(self.field.width);
        let row = i64::from(y) * i64::from(self.rows) / i64::from(self.field.height);
        Some((col as u16, row as u16))
    }

    /// Print `text` centered on a field point, clipped at the right edge.
    fn put_centered(&mut self, (x, y): (i32, i32), text: &str, fg: Color) -> std::io::Result<()> {
        let Some((col, row)) = self.cell(x, y) else {
            return Ok(());
        };
        let half = text.chars().count() as u16 / 2;
        self.put(col.saturating_sub(half), row, text, fg)
    }

    fn put(&mut self, col: u16, row: u16, text: &str, fg: Color) -> std::io::Result<()> {
        let room = self.cols.saturating_sub(col) as usize;
        let clipped: String = text.chars().take(room).collect();
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(fg))?;
        self.out.queue(Print(clipped))?;
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear(&mut self) -> std::io::Result<()> {
        let (cols, rows) = terminal::size()?;
        self.cols = cols.max(1);
        self.rows = rows.max(1);

        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.put(1, self.rows - 1, CONTROLS_HINT, C_HINT)
    }

    fn draw(&mut self, sprite: Sprite, rect: &Rect) -> std::io::Result<()> {
        let center = rect.center();
        match sprite {
            Sprite::Player(facing) => self.put_centered(center, player_glyph(facing), C_PLAYER),
            Sprite::Beam { degrees } => self.put_centered(center, beam_glyph(degrees), C_BEAM),
            // Colour-keyed corners: only the disc itself shows.
            Sprite::Bomb { color: rgb, .. } => self.put_centered(center, "●", color(rgb)),
            Sprite::Explosion { frame } => {
                self.put_centered(center, explosion_glyph(frame), C_EXPLOSION)
            }
        }
    }

    fn draw_text(&mut self, text: &str, at: Anchor, text_style: TextStyle) -> std::io::Result<()> {
        if text_style.size == TextSize::Large {
            self.out.queue(style::SetAttribute(Attribute::Bold))?;
        }
        match at {
            Anchor::Center(x, y) => self.put_centered((x, y), text, color(text_style.color))?,
            Anchor::TopLeft(x, y) => {
                if let Some((col, row)) = self.cell(x, y) {
                    self.put(col, row, text, color(text_style.color))?;
                }
            }
        }
        self.out.queue(style::SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows - 1))?;
        self.out.flush()
    }
}
