//! The player's ship
//!
//! A circle that moves along its heading, turns in place, and fires bullets
//! from its nose at a limited rate. It never leaves the arena: its center is
//! clamped to the arena shrunk by its own radius.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bullet::Bullet;
use super::collision::{CircularHitbox, HasHitbox};
use super::tick::Key;
use super::vector::{Rect, Vector2};
use crate::consts::SIM_DT;

/// Ship heading at spawn: nose pointing up the screen
pub const INITIAL_HEADING: Vector2 = Vector2::new(0.0, -1.0);

/// Why a shot was not fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FireError {
    #[error("gun is not ready yet")]
    GunNotReady,
}

/// Bullet shape and fire-rate limit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GunConfig {
    pub radius: u32,
    pub speed: f64,
    pub rate_limit: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub hitbox: CircularHitbox,
    /// Degrees per second
    pub rotation_speed: f64,
    /// Region the center may occupy
    pub bounds: Rect,
    pub gun: GunConfig,
    last_fired_at: Option<Duration>,
}

impl Player {
    pub fn new(
        center: Vector2,
        radius: u32,
        arena: Rect,
        speed: f64,
        rotation_speed: f64,
        gun: GunConfig,
    ) -> Self {
        Self {
            hitbox: CircularHitbox::new(center, radius, speed, INITIAL_HEADING),
            rotation_speed,
            bounds: arena.inset(f64::from(radius)),
            gun,
            last_fired_at: None,
        }
    }

    /// Apply held keys in order, then keep the ship inside its bounds
    pub fn update(&mut self, keys: &[Key]) {
        let distance = self.hitbox.speed * SIM_DT;
        let turn = self.rotation_speed * SIM_DT;

        for key in keys {
            match key {
                Key::Forward => {
                    let mut step = self.hitbox.direction;
                    self.hitbox.center.add(*step.scale(distance));
                }
                Key::Backward => {
                    let mut step = self.hitbox.direction;
                    self.hitbox.center.subtract(*step.scale(distance));
                }
                // Screen Y points down, so a negative angle turns left
                Key::RotateLeft => {
                    self.hitbox.direction.rotate(-turn);
                }
                Key::RotateRight => {
                    self.hitbox.direction.rotate(turn);
                }
                Key::Fire | Key::Restart => {}
            }
        }

        self.hitbox.center.clamp(&self.bounds);
    }

    /// Ship silhouette: nose first, then the two rear corners
    pub fn triangle(&self) -> [Vector2; 3] {
        let radius = f64::from(self.hitbox.radius);
        let heading = self.hitbox.direction.normalized();

        let mut forward = heading;
        forward.scale(radius);
        let mut side = heading;
        side.rotate(90.0).scale(radius / 1.5);

        let center = self.hitbox.center;
        let mut nose = center;
        nose.add(forward);
        let mut left = center;
        left.subtract(forward).subtract(side);
        let mut right = center;
        right.subtract(forward).add(side);

        [nose, left, right]
    }

    /// Fire from the nose along the current heading
    ///
    /// `now` is simulation time; shots closer together than the gun's rate
    /// limit are refused.
    pub fn fire(&mut self, now: Duration) -> Result<Bullet, FireError> {
        if let Some(last) = self.last_fired_at {
            if now.saturating_sub(last) < self.gun.rate_limit {
                return Err(FireError::GunNotReady);
            }
        }
        self.last_fired_at = Some(now);

        let nose = self.triangle()[0];
        Ok(Bullet::new(
            nose,
            self.gun.radius,
            self.gun.speed,
            self.hitbox.direction,
        ))
    }

    pub fn last_fired_at(&self) -> Option<Duration> {
        self.last_fired_at
    }
}

impl HasHitbox for Player {
    fn hitbox(&self) -> &CircularHitbox {
        &self.hitbox
    }
}
