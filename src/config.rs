//! Game configuration
//!
//! [`GameConfig`] is the serializable, human-editable form: every field
//! defaults to the matching value in [`crate::consts`], and durations are
//! written as strings such as `"500ms"` or `"1m30s"`. A config is checked once
//! with [`GameConfig::resolve`], which yields the parsed [`Tuning`] the
//! simulation actually runs on. There is no runtime reconfiguration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{AsteroidFactory, GunConfig, Rect};

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid duration {value:?} for `{field}`")]
    InvalidDuration { field: &'static str, value: String },

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// User-facing game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub arena_width: f64,
    pub arena_height: f64,

    // === Player ===
    pub player_radius: u32,
    /// Units per second
    pub player_speed: f64,
    /// Degrees per second
    pub player_rotation_speed: f64,

    // === Gun ===
    pub bullet_radius: u32,
    pub bullet_speed: f64,
    /// Minimum time between shots
    pub fire_rate: String,

    // === Asteroids ===
    pub asteroid_min_radius: u32,
    /// Number of size classes: radii are `min_radius * 1..=kinds`
    pub asteroid_kinds: u32,
    pub asteroid_spawn_rate: String,
    pub asteroid_min_speed: f64,
    pub asteroid_max_speed: f64,
    pub asteroid_max_angle: f64,

    /// RNG seed; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_MOVE_SPEED,
            player_rotation_speed: PLAYER_ROTATION_SPEED,

            bullet_radius: BULLET_RADIUS,
            bullet_speed: BULLET_SPEED,
            fire_rate: PLAYER_FIRE_RATE.to_string(),

            asteroid_min_radius: ASTEROID_MIN_RADIUS,
            asteroid_kinds: ASTEROID_KINDS,
            asteroid_spawn_rate: ASTEROID_SPAWN_RATE.to_string(),
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            asteroid_max_angle: ASTEROID_MAX_ANGLE,

            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON text (missing keys keep their defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Validate and parse into the form the simulation consumes
    pub fn resolve(&self) -> Result<Tuning, ConfigError> {
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "arena_width/arena_height",
                reason: "arena must have a positive size",
            });
        }
        if self.asteroid_min_radius == 0 {
            return Err(ConfigError::InvalidValue {
                field: "asteroid_min_radius",
                reason: "must be at least 1",
            });
        }
        if self.asteroid_kinds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "asteroid_kinds",
                reason: "must be at least 1",
            });
        }
        // Speeds are drawn from whole numbers in [min, max)
        if self.asteroid_min_speed < 0.0
            || self.asteroid_max_speed.floor() <= self.asteroid_min_speed.floor()
        {
            return Err(ConfigError::InvalidValue {
                field: "asteroid_min_speed/asteroid_max_speed",
                reason: "need 0 <= min < max",
            });
        }

        let fire_rate = parse_duration("fire_rate", &self.fire_rate)?;
        let spawn_rate = parse_duration("asteroid_spawn_rate", &self.asteroid_spawn_rate)?;

        Ok(Tuning {
            arena: Rect::new(0.0, 0.0, self.arena_width, self.arena_height),
            player_radius: self.player_radius,
            player_speed: self.player_speed,
            player_rotation_speed: self.player_rotation_speed,
            gun: GunConfig {
                radius: self.bullet_radius,
                speed: self.bullet_speed,
                rate_limit: fire_rate,
            },
            asteroid_min_radius: self.asteroid_min_radius,
            asteroid_kinds: self.asteroid_kinds,
            asteroid_spawn_rate: spawn_rate,
            asteroid_min_speed: self.asteroid_min_speed,
            asteroid_max_speed: self.asteroid_max_speed,
            asteroid_max_angle: self.asteroid_max_angle,
            seed: self.seed.unwrap_or_else(rand::random),
        })
    }
}

/// Validated, parsed configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    pub arena: Rect,
    pub player_radius: u32,
    pub player_speed: f64,
    pub player_rotation_speed: f64,
    pub gun: GunConfig,
    pub asteroid_min_radius: u32,
    pub asteroid_kinds: u32,
    pub asteroid_spawn_rate: Duration,
    pub asteroid_min_speed: f64,
    pub asteroid_max_speed: f64,
    pub asteroid_max_angle: f64,
    pub seed: u64,
}

impl Tuning {
    /// The edge-spawn generator bound to this configuration
    pub fn asteroid_factory(&self) -> AsteroidFactory {
        AsteroidFactory {
            min_radius: self.asteroid_min_radius,
            kind: self.asteroid_kinds,
            bounds: self.arena,
            max_speed: self.asteroid_max_speed,
            min_speed: self.asteroid_min_speed,
            max_angle: self.asteroid_max_angle,
        }
    }
}

/// Parse a duration string made of `<number><unit>` terms, e.g. `"1m30s"`
///
/// Units: `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`. A bare `"0"` is allowed.
pub fn parse_duration(field: &'static str, text: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration {
        field,
        value: text.to_string(),
    };

    let mut rest = text.trim();
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total_nanos: u64 = 0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(invalid());
        }
        let value: f64 = rest[..number_len].parse().map_err(|_| invalid())?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let nanos_per_unit = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            _ => return Err(invalid()),
        };
        rest = &rest[unit_len..];

        let nanos = (value * nanos_per_unit).round();
        if !nanos.is_finite() || nanos > u64::MAX as f64 {
            return Err(invalid());
        }
        total_nanos = total_nanos
            .checked_add(nanos as u64)
            .ok_or_else(invalid)?;
    }

    Ok(Duration::from_nanos(total_nanos))
}
