use std::time::Duration;

use beam_fighter::config::GameConfig;
use beam_fighter::entities::{Field, Rgb};

#[test]
fn defaults_match_the_arcade_layout() {
    let c = GameConfig::default();
    assert_eq!(c.field, Field { width: 1100, height: 650 });
    assert_eq!(c.bomb_count, 5);
    assert_eq!(c.bomb_radius, 10);
    assert_eq!(c.bomb_color, Rgb::RED);
    assert_eq!(c.player_start, (300, 200));
    assert_eq!(c.explosion_life, 10);
    assert_eq!(c.frame_rate, 50);
    assert_eq!(c.end_hold, Duration::from_secs(1));
    assert_eq!(c.score_anchor, (100, 600));
    assert_eq!(c.banner_anchor, (400, 325));
}

#[test]
fn defaults_validate() {
    assert!(GameConfig::default().validate().is_ok());
}

#[test]
fn zero_frame_rate_is_rejected() {
    let c = GameConfig { frame_rate: 0, ..GameConfig::default() };
    assert!(c.validate().is_err());
}

#[test]
fn empty_field_is_rejected() {
    let c = GameConfig { field: Field { width: 0, height: 650 }, ..GameConfig::default() };
    assert!(c.validate().is_err());
}

#[test]
fn no_bombs_is_rejected() {
    let c = GameConfig { bomb_count: 0, ..GameConfig::default() };
    assert!(c.validate().is_err());
}

#[test]
fn oversized_bombs_are_rejected() {
    let c = GameConfig { bomb_radius: 400, ..GameConfig::default() };
    let err = c.validate().unwrap_err();
    assert!(err.to_string().contains("does not fit"));
}

#[test]
fn player_starting_off_field_is_rejected() {
    let c = GameConfig { player_start: (20, 200), ..GameConfig::default() };
    assert!(c.validate().is_err());
}
