use std::process;

use anyhow::Result;
use asteroid_dodge::{DodgeGame, GameConfig};
use dodge2d::Engine;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        eprintln!("asteroid_dodge: {err:#}");
        process::exit(-1);
    }
}

fn run() -> Result<()> {
    let config = GameConfig::default();
    Engine::new()
        .with_title(config.title.clone())
        .with_size(config.playfield.width as u32, config.playfield.height as u32)
        .with_vsync(true)
        .run(DodgeGame::new(config))
}
