//! All game entity types — pure data, no game rules.

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in field pixels, anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of size `w`×`h` whose center lands on `(cx, cy)`.
    pub fn from_center(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self { x: cx - w / 2, y: cy - h / 2, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn set_center(&mut self, (cx, cy): (i32, i32)) {
        self.x = cx - self.w / 2;
        self.y = cy - self.h / 2;
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// True when the two boxes share interior area.
    /// Touching edges do not count, and an empty box never overlaps anything.
    pub fn collides(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Play-field dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub width: i32,
    pub height: i32,
}

// ── Facing ───────────────────────────────────────────────────────────────────

/// The eight directions the player can face, counter-clockwise from right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::UpRight,
        Direction::Up,
        Direction::UpLeft,
        Direction::Left,
        Direction::DownLeft,
        Direction::Down,
        Direction::DownRight,
    ];

    /// Unit step on each axis (screen coordinates, y grows downward).
    pub fn unit(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::UpRight => (1, -1),
            Direction::Up => (0, -1),
            Direction::UpLeft => (-1, -1),
            Direction::Left => (-1, 0),
            Direction::DownLeft => (-1, 1),
            Direction::Down => (0, 1),
            Direction::DownRight => (1, 1),
        }
    }

    /// Classify a displacement by its signs. `None` for a zero displacement.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx.signum(), dy.signum()) {
            (1, 0) => Some(Direction::Right),
            (1, -1) => Some(Direction::UpRight),
            (0, -1) => Some(Direction::Up),
            (-1, -1) => Some(Direction::UpLeft),
            (-1, 0) => Some(Direction::Left),
            (-1, 1) => Some(Direction::DownLeft),
            (0, 1) => Some(Direction::Down),
            (1, 1) => Some(Direction::DownRight),
            _ => None,
        }
    }

    /// Rotation of the matching pre-rendered sprite, in degrees.
    pub fn degrees(self) -> f64 {
        match self {
            Direction::Right => 0.0,
            Direction::UpRight => 45.0,
            Direction::Up => 90.0,
            Direction::UpLeft => 135.0,
            Direction::Left => 180.0,
            Direction::DownLeft => -135.0,
            Direction::Down => -90.0,
            Direction::DownRight => -45.0,
        }
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Snapshot of the direction keys held this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Discrete key presses, drained once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Fire,
    Quit,
}

// ── Assets ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
}

/// Asset key handed to the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sprite {
    /// One of the eight pre-rotated player images.
    Player(Direction),
    /// The beam image rotated to its direction of travel.
    Beam { degrees: f64 },
    /// A filled circle; box corners are transparent.
    Bomb { color: Rgb, radius: i32 },
    /// Explosion animation frame, 0 or 1 (1 is the flip of 0 on both axes).
    Explosion { frame: u8 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSize {
    /// HUD text such as the score.
    Small,
    /// End-of-game banners.
    Large,
}

/// Where a piece of text is pinned, in field pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft(i32, i32),
    Center(i32, i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Rgb,
    pub size: TextSize,
}

// ── Entities ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub facing: Direction,
    /// Pixels moved per held direction key per frame.
    pub step: i32,
}

impl Player {
    pub fn sprite(&self) -> Sprite {
        Sprite::Player(self.facing)
    }
}

/// A straight-moving shot. Velocity is fixed at spawn.
#[derive(Clone, Debug)]
pub struct Beam {
    pub rect: Rect,
    pub vx: i32,
    pub vy: i32,
    /// Sprite rotation matching the direction of travel.
    pub degrees: f64,
}

impl Beam {
    pub fn sprite(&self) -> Sprite {
        Sprite::Beam { degrees: self.degrees }
    }
}

/// A bouncing target.
#[derive(Clone, Debug)]
pub struct Bomb {
    pub rect: Rect,
    pub vx: i32,
    pub vy: i32,
    pub color: Rgb,
    pub radius: i32,
}

impl Bomb {
    pub fn sprite(&self) -> Sprite {
        Sprite::Bomb { color: self.color, radius: self.radius }
    }
}

/// Short-lived two-frame explosion left behind by a destroyed bomb.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub rect: Rect,
    /// Index of the frame shown last, 0 or 1.
    pub frame: u8,
    /// Remaining frames to display.
    pub life: u32,
}

impl Explosion {
    pub fn sprite(&self) -> Sprite {
        Sprite::Explosion { frame: self.frame }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub value: u32,
}

impl Score {
    pub fn increment(&mut self) {
        self.value += 1;
    }

    pub fn label(&self) -> String {
        format!("Score: {}", self.value)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// The player touched a bomb.
    Lost,
    /// Every bomb was destroyed.
    Won,
}

/// The entire game state. Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub bombs: Vec<Bomb>,
    pub beams: Vec<Beam>,
    pub explosions: Vec<Explosion>,
    pub score: Score,
    pub status: GameStatus,
    pub frame: u64,
    pub field: Field,
}
