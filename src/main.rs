//! Asteroid Drift headless runner
//!
//! Drives the simulation with a scripted pilot, logs progress, and prints the
//! final frame as JSON. Usage: `asteroid-drift [config.json] [frames]`.

#[cfg(not(target_arch = "wasm32"))]
use asteroid_drift::{Game, GameConfig, GamePhase, Key, TickInput};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_FRAMES: u64 = 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroid Drift (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    let frames = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(frames)) => frames,
        Some(Err(e)) => {
            log::error!("invalid frame count: {e}");
            std::process::exit(1);
        }
        None => DEFAULT_FRAMES,
    };

    let mut game = match Game::new(&config) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    log::info!("Game initialized with seed: {}", game.tuning().seed);

    let mut losses = 0u32;
    for step in 0..frames {
        let was_playing = game.phase() == GamePhase::Playing;
        game.step(&pilot(&game, step));
        if was_playing && game.phase() == GamePhase::GameOver {
            losses += 1;
        }
        if step % 60 == 0 {
            log::info!(
                "step {step}: frame {} phase {:?} asteroids {} bullets {}",
                game.frame(),
                game.phase(),
                game.asteroids().count(),
                game.bullets().count()
            );
        }
    }
    log::info!("Finished {frames} steps, ship lost {losses} times");

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("failed to serialize snapshot: {e}");
            std::process::exit(1);
        }
    }
}

/// Sweep the gun back and forth while firing; restart after a loss
#[cfg(not(target_arch = "wasm32"))]
fn pilot(game: &Game, step: u64) -> TickInput {
    if game.phase() == GamePhase::GameOver {
        return TickInput::new(&[Key::Restart]);
    }
    let turn = if (step / 90) % 2 == 0 {
        Key::RotateRight
    } else {
        Key::RotateLeft
    };
    TickInput::new(&[turn, Key::Fire])
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is the product on wasm; hosts embed `Game` directly
}
