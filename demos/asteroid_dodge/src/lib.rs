//! Asteroid Dodge: steer a ship left and right to avoid falling asteroids.
//!
//! The game logic is plain data plus a few functions so it can be tested
//! without a window; [`DodgeGame`] wires it into the `dodge2d` engine.

pub mod collision;
pub mod config;
pub mod controls;
pub mod entities;
pub mod game;
pub mod motion;
pub mod scene;

pub use config::{GameConfig, Palette, Playfield, RespawnPolicy};
pub use entities::{Asteroid, Ship};
pub use game::DodgeGame;
