use beam_fighter::entities::*;

fn player_at(cx: i32, cy: i32) -> Player {
    Player {
        rect: Rect::from_center(cx, cy, 90, 90),
        facing: Direction::Right,
        step: 5,
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_edges_and_center() {
    let r = Rect::from_center(300, 200, 90, 90);
    assert_eq!((r.left(), r.top()), (255, 155));
    assert_eq!((r.right(), r.bottom()), (345, 245));
    assert_eq!(r.center(), (300, 200));
}

#[test]
fn rect_set_center_keeps_size() {
    let mut r = Rect::new(0, 0, 20, 20);
    r.set_center((50, 60));
    assert_eq!(r, Rect::new(40, 50, 20, 20));
}

#[test]
fn rect_move_by() {
    let mut r = Rect::new(10, 10, 4, 4);
    r.move_by(5, -5);
    assert_eq!((r.x, r.y), (15, 5));
}

#[test]
fn rect_overlap() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(a.collides(&Rect::new(5, 5, 10, 10)));
    assert!(a.collides(&Rect::new(-5, -5, 10, 10)));
    // Fully contained
    assert!(a.collides(&Rect::new(2, 2, 2, 2)));
}

#[test]
fn rect_touching_edges_do_not_overlap() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(!a.collides(&Rect::new(10, 0, 10, 10)));
    assert!(!a.collides(&Rect::new(0, 10, 10, 10)));
}

#[test]
fn empty_rect_never_overlaps() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(!a.collides(&Rect::new(5, 5, 0, 3)));
    assert!(!Rect::new(5, 5, 3, 0).collides(&a));
}

// ── Direction ─────────────────────────────────────────────────────────────────

#[test]
fn every_direction_classifies_back_from_its_unit() {
    for dir in Direction::ALL {
        let (ux, uy) = dir.unit();
        assert_eq!(Direction::from_delta(ux * 5, uy * 5), Some(dir));
    }
}

#[test]
fn zero_delta_has_no_direction() {
    assert_eq!(Direction::from_delta(0, 0), None);
}

#[test]
fn diagonal_sprites_sit_between_their_neighbours() {
    assert_eq!(Direction::UpRight.degrees(), 45.0);
    assert_eq!(Direction::UpLeft.degrees(), 135.0);
    assert_eq!(Direction::DownLeft.degrees(), -135.0);
    assert_eq!(Direction::DownRight.degrees(), -45.0);
}

// ── Score ─────────────────────────────────────────────────────────────────────

#[test]
fn score_increments_by_one() {
    let mut score = Score::default();
    assert_eq!(score.value, 0);
    score.increment();
    score.increment();
    assert_eq!(score.value, 2);
    assert_eq!(score.label(), "Score: 2");
}

// ── Sprites ───────────────────────────────────────────────────────────────────

#[test]
fn player_sprite_follows_facing() {
    let mut p = player_at(300, 200);
    assert_eq!(p.sprite(), Sprite::Player(Direction::Right));
    p.facing = Direction::DownLeft;
    assert_eq!(p.sprite(), Sprite::Player(Direction::DownLeft));
}

// ── GameState ─────────────────────────────────────────────────────────────────

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: player_at(300, 200),
        bombs: Vec::new(),
        beams: Vec::new(),
        explosions: Vec::new(),
        score: Score::default(),
        status: GameStatus::Running,
        frame: 0,
        field: Field { width: 1100, height: 650 },
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.rect.move_by(99, 0);
    cloned.score.increment();
    cloned.bombs.push(Bomb {
        rect: Rect::new(5, 5, 20, 20),
        vx: 5,
        vy: 5,
        color: Rgb::RED,
        radius: 10,
    });

    assert_eq!(original.player.rect.center(), (300, 200));
    assert_eq!(original.score.value, 0);
    assert!(original.bombs.is_empty());
}
