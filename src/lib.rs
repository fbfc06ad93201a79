//! Asteroid Drift - a bounded-arena asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, game state)
//! - `config`: Data-driven game tuning, loaded once at startup

pub mod config;
pub mod sim;

pub use config::{ConfigError, GameConfig, Tuning};
pub use sim::{Game, GamePhase, Key, TickInput};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, never variable)
    pub const SIM_DT: f64 = 1.0 / 60.0;

    /// Arena dimensions
    pub const ARENA_WIDTH: f64 = 1280.0;
    pub const ARENA_HEIGHT: f64 = 720.0;

    /// Player defaults
    pub const PLAYER_RADIUS: u32 = 20;
    pub const PLAYER_MOVE_SPEED: f64 = 300.0;
    /// Degrees per second
    pub const PLAYER_ROTATION_SPEED: f64 = 270.0;
    pub const PLAYER_FIRE_RATE: &str = "200ms";

    /// Bullet defaults
    pub const BULLET_RADIUS: u32 = 3;
    pub const BULLET_SPEED: f64 = 600.0;

    /// Asteroid defaults
    pub const ASTEROID_MIN_RADIUS: u32 = 20;
    /// Number of discrete size classes (min radius multiples)
    pub const ASTEROID_KINDS: u32 = 3;
    pub const ASTEROID_SPAWN_RATE: &str = "1s";
    pub const ASTEROID_MIN_SPEED: f64 = 40.0;
    pub const ASTEROID_MAX_SPEED: f64 = 100.0;
    /// Scale (degrees) of the Gaussian heading perturbation at spawn
    pub const ASTEROID_MAX_ANGLE: f64 = 30.0;

    /// Split children diverge by a uniform angle in this range (degrees)
    pub const SPLIT_ANGLE_MIN: f64 = 20.0;
    pub const SPLIT_ANGLE_MAX: f64 = 50.0;
    /// Speed boost applied to split children (multiplicative)
    pub const SPLIT_SPEED_FACTOR: f64 = 1.2;
}
