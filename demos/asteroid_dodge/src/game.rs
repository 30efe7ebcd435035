use anyhow::Result;
use dodge2d::{EngineContext, Game, KeyInput};
use fastrand::Rng;

use crate::collision;
use crate::config::GameConfig;
use crate::controls;
use crate::entities::{Asteroid, Ship};
use crate::motion;
use crate::scene;

/// The whole game: one ship, a fixed set of asteroids.
///
/// Collisions are detected and logged but do not end the game.
pub struct DodgeGame {
    config: GameConfig,
    ship: Ship,
    asteroids: Vec<Asteroid>,
    rng: Rng,
    in_contact: bool,
}

impl DodgeGame {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, Rng::new())
    }

    /// Build a game with an explicit random source, e.g. a seeded one.
    pub fn with_rng(config: GameConfig, rng: Rng) -> Self {
        Self {
            ship: config.ship,
            asteroids: config.asteroids.clone(),
            config,
            rng,
            in_contact: false,
        }
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    /// Whether the ship overlapped an asteroid after the last tick.
    pub fn in_contact(&self) -> bool {
        self.in_contact
    }

    pub fn handle_key(&mut self, input: &KeyInput) {
        if controls::apply_key(&mut self.ship, input, self.config.move_step) {
            log::trace!("ship moved to x = {}", self.ship.x);
        }
    }

    /// One fixed update: move asteroids, then test the ship against them.
    pub fn tick(&mut self) -> bool {
        let wrapped = motion::advance_all(
            &mut self.asteroids,
            &self.config.playfield,
            self.config.respawn,
            &mut self.rng,
        );
        if wrapped > 0 {
            log::trace!("{wrapped} asteroid(s) respawned");
        }

        let hit = collision::any_collision(&self.ship, &self.asteroids);
        if hit != self.in_contact {
            if hit {
                log::debug!("ship hit an asteroid at x = {}", self.ship.x);
            } else {
                log::debug!("ship clear of asteroids");
            }
            self.in_contact = hit;
        }
        hit
    }
}

impl Game for DodgeGame {
    fn init(&mut self, _ctx: &mut EngineContext) -> Result<()> {
        log::info!(
            "Starting with {} asteroid(s), respawn policy {:?}",
            self.asteroids.len(),
            self.config.respawn
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext) -> Result<()> {
        for input in ctx.input_mut().take_key_events() {
            self.handle_key(&input);
        }

        while ctx.should_run_fixed_update() {
            self.tick();
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut EngineContext) -> Result<()> {
        let palette = self.config.palette;
        let renderer = ctx.renderer();
        let mut frame = renderer.begin_frame()?;

        renderer.clear(&mut frame, palette.background)?;
        scene::draw_scene(&mut frame, &self.ship, &self.asteroids, &palette);

        renderer.end_frame(frame)?;
        Ok(())
    }
}
