//! Game state and its lifecycle
//!
//! [`Game`] owns the player, both populations, the latest input snapshot and
//! the simulated clock. `reset` is the only way entities come into being at
//! session level, both at startup and on restart after a game over.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::asteroid::Asteroid;
use super::asteroid_control::AsteroidControl;
use super::bullet::{Bullet, BulletControl};
use super::player::Player;
use super::random::RngState;
use super::tick::Key;
use super::vector::Vector2;
use crate::config::{ConfigError, GameConfig, Tuning};
use crate::consts::SIM_DT;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Ship was hit; waiting for a restart
    GameOver,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) tuning: Tuning,
    pub(crate) rng_state: RngState,
    pub(crate) player: Player,
    pub(crate) asteroids: AsteroidControl,
    pub(crate) bullets: BulletControl,
    /// Keys held during the most recent step
    pub(crate) keys: Vec<Key>,
    pub(crate) phase: GamePhase,
    /// Playing steps since the last reset
    pub(crate) frame: u64,
}

impl Game {
    /// Validate the configuration and start a fresh session
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_tuning(config.resolve()?))
    }

    /// Start a fresh session from an already validated configuration
    pub fn from_tuning(tuning: Tuning) -> Self {
        let mut rng_state = RngState::new(tuning.seed);
        let (player, asteroids, bullets) = build_session(&tuning, &mut rng_state);
        Self {
            tuning,
            rng_state,
            player,
            asteroids,
            bullets,
            keys: Vec::new(),
            phase: GamePhase::Playing,
            frame: 0,
        }
    }

    /// Rebuild the player and both populations and resume play
    pub fn reset(&mut self) {
        let (player, asteroids, bullets) = build_session(&self.tuning, &mut self.rng_state);
        self.player = player;
        self.asteroids = asteroids;
        self.bullets = bullets;
        self.keys.clear();
        self.phase = GamePhase::Playing;
        self.frame = 0;
        log::info!(
            "Game reset (seed {}, stream {})",
            self.rng_state.seed,
            self.rng_state.stream
        );
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Asteroids still in play
    pub fn asteroids(&self) -> impl Iterator<Item = &Asteroid> {
        self.asteroids.live()
    }

    /// Bullets still in flight
    pub fn bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.live()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulation time since the last reset
    pub fn now(&self) -> Duration {
        Duration::from_secs_f64(self.frame as f64 * SIM_DT)
    }

    /// Read-only view for renderers and logging
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            frame: self.frame,
            player: &self.player,
            ship: self.player.triangle(),
            asteroids: self.asteroids().collect(),
            bullets: self.bullets().collect(),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub frame: u64,
    pub player: &'a Player,
    /// Ship silhouette, nose first
    pub ship: [Vector2; 3],
    pub asteroids: Vec<&'a Asteroid>,
    pub bullets: Vec<&'a Bullet>,
}

fn build_session(
    tuning: &Tuning,
    rng_state: &mut RngState,
) -> (Player, AsteroidControl, BulletControl) {
    let arena = tuning.arena;
    let center = Vector2::new(
        arena.min.x + arena.width() / 2.0,
        arena.min.y + arena.height() / 2.0,
    );
    let player = Player::new(
        center,
        tuning.player_radius,
        arena,
        tuning.player_speed,
        tuning.player_rotation_speed,
        tuning.gun,
    );
    let asteroids = AsteroidControl::new(
        tuning.asteroid_factory(),
        tuning.asteroid_spawn_rate,
        rng_state.next_rng(),
    );
    let bullets = BulletControl::new(arena);
    (player, asteroids, bullets)
}
