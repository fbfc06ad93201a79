//! The live asteroid population
//!
//! Owns the asteroid list, the spawn timer, and its own generator (spawn
//! edges, split angles), so its update never touches state shared with the
//! player or bullets.

use std::time::Duration;

use rand::Rng;
use rand_pcg::Pcg32;

use super::asteroid::{Asteroid, AsteroidFactory, Edge};
use super::collision::HasHitbox;
use super::vector::Rect;
use crate::consts::{SPLIT_ANGLE_MAX, SPLIT_ANGLE_MIN, SPLIT_SPEED_FACTOR};

#[derive(Debug, Clone)]
pub struct AsteroidControl {
    pub(crate) asteroids: Vec<Asteroid>,
    pub radius_min: u32,
    pub kind: u32,
    pub bounds: Rect,
    pub spawn_rate: Duration,
    pub(crate) last_spawn_at: Option<Duration>,
    factory: AsteroidFactory,
    rng: Pcg32,
}

impl AsteroidControl {
    pub fn new(factory: AsteroidFactory, spawn_rate: Duration, rng: Pcg32) -> Self {
        Self {
            asteroids: Vec::new(),
            radius_min: factory.min_radius,
            kind: factory.kind,
            bounds: factory.bounds,
            spawn_rate,
            last_spawn_at: None,
            factory,
            rng,
        }
    }

    /// Advance every asteroid, destroy the ones that drifted off-screen, and
    /// spawn a new one when the spawn interval has elapsed at `now`
    pub fn update(&mut self, now: Duration) {
        for asteroid in &mut self.asteroids {
            asteroid.update();
            // Asteroids may linger one radius past the edge
            let margin = self.bounds.expand(f64::from(asteroid.hitbox.radius));
            if !margin.contains(&asteroid.hitbox.center) {
                asteroid.destroy();
            }
        }

        let due = match self.last_spawn_at {
            Some(last) => now.saturating_sub(last) >= self.spawn_rate,
            None => true,
        };
        if due {
            self.last_spawn_at = Some(now);
            let asteroid = self.spawn_asteroid();
            log::debug!("Spawned {asteroid}");
            self.add_asteroid(asteroid);
        }
    }

    /// A fresh asteroid on a random edge (not yet added)
    pub fn spawn_asteroid(&mut self) -> Asteroid {
        let edge = Edge::random(&mut self.rng);
        self.factory.new_asteroid(edge, &mut self.rng)
    }

    pub fn add_asteroid(&mut self, asteroid: Asteroid) {
        self.asteroids.push(asteroid);
    }

    /// Resolve a hit on the asteroid at `index`
    ///
    /// Asteroids larger than `radius_min` split into two smaller, faster
    /// children diverging from the parent's heading; the parent is destroyed
    /// either way. No-op when the index is absent or already destroyed.
    pub fn hit_asteroid(&mut self, index: usize) {
        let Some(parent) = self.asteroids.get_mut(index) else {
            return;
        };
        if parent.is_destroyed() {
            return;
        }
        parent.destroy();
        let parent = parent.hitbox;

        if parent.radius <= self.radius_min {
            log::debug!("Asteroid {index} destroyed");
            return;
        }

        let new_radius = parent.radius - self.radius_min;
        let new_speed = parent.speed * SPLIT_SPEED_FACTOR;
        let theta = self.rng.random_range(SPLIT_ANGLE_MIN..SPLIT_ANGLE_MAX);

        for angle in [theta, -theta] {
            let mut direction = parent.direction;
            direction.rotate(angle);

            let mut offset = direction;
            offset.scale(f64::from(parent.radius));
            let mut center = parent.center;
            center.add(offset);

            self.add_asteroid(Asteroid::new(center, new_radius, new_speed, direction));
        }
        log::debug!(
            "Asteroid {index} split into two of radius {new_radius} (+/-{theta:.1} deg)"
        );
    }

    /// Drop destroyed asteroids; indices are invalid afterwards
    pub fn clean(&mut self) {
        self.asteroids.retain(|a| !a.is_destroyed());
    }

    /// All asteroids, including ones destroyed since the last `clean`
    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn live(&self) -> impl Iterator<Item = &Asteroid> {
        self.asteroids.iter().filter(|a| !a.is_destroyed())
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }

    pub fn factory(&self) -> &AsteroidFactory {
        &self.factory
    }
}
