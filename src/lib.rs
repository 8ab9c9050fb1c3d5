//! Beam Fighter: dodge bouncing bombs and shoot them down with beams.
//!
//! The library holds everything that is not terminal I/O: entity data,
//! pure per-frame logic, configuration and the game loop itself, which
//! talks to the outside world only through the traits in [`game`].

pub mod compute;
pub mod config;
pub mod entities;
pub mod game;
