//! Game constants and tunables.

use dodge2d::Color;

use crate::entities::{Asteroid, Ship};

pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

/// Horizontal distance the ship moves per arrow-key press.
pub const MOVE_STEP: f32 = 10.0;

/// What happens to an asteroid once it falls past the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RespawnPolicy {
    /// Move back above the screen (`y = -height`) at a random `x`.
    #[default]
    ResetToTop,
    /// Reproduce the old wrap bug: the reset to the top is lost, so the
    /// asteroid keeps the overflowed `y` it fell to and its `x` never changes.
    /// It stays below the screen for good.
    Legacy,
}

/// Visible game area in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub ship: Color,
    pub asteroid: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [0.0, 0.0, 0.0, 1.0],
            ship: [0.0, 1.0, 0.0, 1.0],
            asteroid: [1.0, 0.0, 0.0, 1.0],
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub title: String,
    pub playfield: Playfield,
    pub move_step: f32,
    pub palette: Palette,
    pub respawn: RespawnPolicy,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
}

impl GameConfig {
    #[must_use]
    pub fn with_respawn(mut self, respawn: RespawnPolicy) -> Self {
        self.respawn = respawn;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Asteroid Dodge".into(),
            playfield: Playfield::default(),
            move_step: MOVE_STEP,
            palette: Palette::default(),
            respawn: RespawnPolicy::default(),
            ship: Ship::new(375.0, 550.0, 50.0, 20.0),
            asteroids: vec![
                Asteroid::new(100.0, 0.0, 2.0, 30.0, 30.0),
                Asteroid::new(300.0, 150.0, 3.0, 30.0, 30.0),
                Asteroid::new(500.0, 300.0, 4.0, 30.0, 30.0),
            ],
        }
    }
}
