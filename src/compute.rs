//! Pure game-logic functions.
//!
//! Functions take immutable references to entities or to the whole
//! `GameState` and return fresh values. Randomness only enters through an
//! injected RNG, so tests can seed it.

use log::debug;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Beam, Bomb, Direction, Explosion, Field, GameState, GameStatus, HeldKeys, Player, Rect,
    Score,
};

/// Bomb placements tried before accepting one that overlaps the player.
const SPAWN_ATTEMPTS: usize = 64;

// ── Bounds ───────────────────────────────────────────────────────────────────

/// Horizontal and vertical containment of `rect` inside `field`.
///
/// Each flag is false when the box crosses the respective pair of edges.
pub fn check_bound(rect: &Rect, field: Field) -> (bool, bool) {
    let horizontal = rect.left() >= 0 && rect.right() <= field.width;
    let vertical = rect.top() >= 0 && rect.bottom() <= field.height;
    (horizontal, vertical)
}

fn fully_inside(rect: &Rect, field: Field) -> bool {
    check_bound(rect, field) == (true, true)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state: the player at its start position, facing right,
/// and `bomb_count` bombs scattered over the field.
pub fn init_state(config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let (cx, cy) = config.player_start;
    let (pw, ph) = config.player_size;
    let player = Player {
        rect: Rect::from_center(cx, cy, pw, ph),
        facing: Direction::Right,
        step: config.player_step,
    };

    let bombs = (0..config.bomb_count)
        .map(|_| spawn_bomb(config, &player.rect, &mut *rng))
        .collect();

    GameState {
        player,
        bombs,
        beams: Vec::new(),
        explosions: Vec::new(),
        score: Score::default(),
        status: GameStatus::Running,
        frame: 0,
        field: config.field,
    }
}

/// A bomb centered uniformly at random such that its box starts inside the
/// field, preferring spots clear of `avoid`.
pub fn spawn_bomb(config: &GameConfig, avoid: &Rect, rng: &mut impl Rng) -> Bomb {
    let r = config.bomb_radius;
    let Field { width, height } = config.field;
    let mut place = || {
        let cx = rng.gen_range(r..(width - r));
        let cy = rng.gen_range(r..(height - r));
        Rect::from_center(cx, cy, 2 * r, 2 * r)
    };

    let mut rect = place();
    for _ in 1..SPAWN_ATTEMPTS {
        if !rect.collides(avoid) {
            break;
        }
        rect = place();
    }

    Bomb {
        rect,
        vx: config.bomb_speed,
        vy: config.bomb_speed,
        color: config.bomb_color,
        radius: r,
    }
}

pub fn new_explosion(center: (i32, i32), config: &GameConfig) -> Explosion {
    let (w, h) = config.explosion_size;
    Explosion {
        rect: Rect::from_center(center.0, center.1, w, h),
        frame: 0,
        life: config.explosion_life,
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Apply the held direction keys to the player.
///
/// The summed displacement is all-or-nothing: if the moved box leaves the
/// field on either axis the player stays put. Facing still follows any
/// nonzero displacement, rolled back or not.
pub fn move_player(player: &Player, keys: HeldKeys, field: Field) -> Player {
    let pressed = [
        (keys.up, Direction::Up),
        (keys.down, Direction::Down),
        (keys.left, Direction::Left),
        (keys.right, Direction::Right),
    ];
    let (dx, dy) = pressed
        .iter()
        .filter(|(held, _)| *held)
        .map(|(_, dir)| dir.unit())
        .fold((0, 0), |(ax, ay), (ux, uy)| {
            (ax + ux * player.step, ay + uy * player.step)
        });

    let mut next = player.clone();
    next.rect.move_by(dx, dy);
    if !fully_inside(&next.rect, field) {
        next.rect = player.rect;
    }
    if let Some(dir) = Direction::from_delta(dx, dy) {
        next.facing = dir;
    }
    next
}

// ── Beams ────────────────────────────────────────────────────────────────────

/// Sprite angle for a velocity, counter-clockwise from +x with y pointing up.
pub fn beam_degrees(vx: i32, vy: i32) -> f64 {
    f64::from(-vy).atan2(f64::from(vx)).to_degrees()
}

/// Bounding box of a `w`×`h` image after rotating it by `degrees`.
pub fn rotated_size((w, h): (i32, i32), degrees: f64) -> (i32, i32) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let (w, h) = (f64::from(w), f64::from(h));
    ((w * cos + h * sin).round() as i32, (w * sin + h * cos).round() as i32)
}

/// Fire a beam in the player's facing direction from the player's leading edge.
pub fn spawn_beam(player: &Player, beam_size: (i32, i32)) -> Beam {
    let (ux, uy) = player.facing.unit();
    let (vx, vy) = (ux * player.step, uy * player.step);
    let degrees = beam_degrees(vx, vy);
    let (w, h) = rotated_size(beam_size, degrees);

    let (pcx, pcy) = player.rect.center();
    let center = (pcx + player.rect.w * ux, pcy + player.rect.h * uy);
    Beam {
        rect: Rect::from_center(center.0, center.1, w, h),
        vx,
        vy,
        degrees,
    }
}

/// Advance a beam by its velocity.
///
/// Returns `None` when the beam is already outside the field: it neither
/// moves nor gets drawn, and the next collision pass prunes it.
pub fn step_beam(beam: &Beam, field: Field) -> Option<Beam> {
    if !fully_inside(&beam.rect, field) {
        return None;
    }
    let mut next = beam.clone();
    next.rect.move_by(beam.vx, beam.vy);
    Some(next)
}

// ── Bombs ────────────────────────────────────────────────────────────────────

/// Reflect off whichever edges the bomb crosses, then move it.
pub fn step_bomb(bomb: &Bomb, field: Field) -> Bomb {
    let (horizontal, vertical) = check_bound(&bomb.rect, field);
    let mut next = bomb.clone();
    if !horizontal {
        next.vx = -next.vx;
    }
    if !vertical {
        next.vy = -next.vy;
    }
    next.rect.move_by(next.vx, next.vy);
    next
}

// ── Explosions ───────────────────────────────────────────────────────────────

/// Burn one frame of life and flip to the other image.
///
/// Returns `None` once the life is spent; nothing is drawn then.
pub fn step_explosion(explosion: &Explosion) -> Option<Explosion> {
    if explosion.life == 0 {
        return None;
    }
    Some(Explosion {
        life: explosion.life - 1,
        frame: explosion.frame ^ 1,
        ..explosion.clone()
    })
}

// ── Per-frame collision pass ─────────────────────────────────────────────────

/// Run the collision checks on pre-movement positions, then prune.
///
/// For each bomb in order, a player overlap ends the game on the spot.
/// Otherwise every live beam overlapping that bomb is tested in order; the
/// first one destroys it, spawning an explosion and scoring a point. Hits
/// are only marked during the pass, so indices stay valid. Afterwards
/// destroyed bombs, spent or out-of-field beams and finished explosions are
/// dropped, and an empty bomb list wins the game.
pub fn resolve_collisions(state: &GameState, config: &GameConfig) -> GameState {
    let mut killed_bombs: Vec<usize> = Vec::new();
    let mut used_beams: Vec<usize> = Vec::new();
    let mut explosions = state.explosions.clone();
    let mut score = state.score.clone();

    for (bi, bomb) in state.bombs.iter().enumerate() {
        if state.player.rect.collides(&bomb.rect) {
            debug!("player hit by bomb {bi} at {:?}", bomb.rect.center());
            return GameState {
                score,
                status: GameStatus::Lost,
                ..state.clone()
            };
        }

        for (ji, beam) in state.beams.iter().enumerate() {
            if killed_bombs.contains(&bi) || used_beams.contains(&ji) {
                continue;
            }
            if beam.rect.collides(&bomb.rect) {
                debug!("beam {ji} destroyed bomb {bi} at {:?}", bomb.rect.center());
                explosions.push(new_explosion(bomb.rect.center(), config));
                killed_bombs.push(bi);
                used_beams.push(ji);
                score.increment();
            }
        }
    }

    let bombs: Vec<Bomb> = state
        .bombs
        .iter()
        .enumerate()
        .filter(|(i, _)| !killed_bombs.contains(i))
        .map(|(_, b)| b.clone())
        .collect();

    let beams: Vec<Beam> = state
        .beams
        .iter()
        .enumerate()
        .filter(|(i, b)| !used_beams.contains(i) && fully_inside(&b.rect, state.field))
        .map(|(_, b)| b.clone())
        .collect();

    let explosions: Vec<Explosion> = explosions.into_iter().filter(|e| e.life > 0).collect();

    let status = if bombs.is_empty() {
        GameStatus::Won
    } else {
        GameStatus::Running
    };

    GameState {
        bombs,
        beams,
        explosions,
        score,
        status,
        ..state.clone()
    }
}
