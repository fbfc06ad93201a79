//! Bullets and the live bullet population

use serde::{Deserialize, Serialize};

use super::collision::{CircularHitbox, HasHitbox};
use super::vector::{Rect, Vector2};
use crate::consts::SIM_DT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub hitbox: CircularHitbox,
}

impl Bullet {
    pub fn new(center: Vector2, radius: u32, speed: f64, direction: Vector2) -> Self {
        Self {
            hitbox: CircularHitbox::new(center, radius, speed, direction),
        }
    }

    pub fn update(&mut self) {
        self.hitbox.advance(SIM_DT);
    }

    pub fn destroy(&mut self) {
        self.hitbox.destroy();
    }
}

impl HasHitbox for Bullet {
    fn hitbox(&self) -> &CircularHitbox {
        &self.hitbox
    }
}

/// Owns every bullet in flight
#[derive(Debug, Clone)]
pub struct BulletControl {
    pub(crate) bullets: Vec<Bullet>,
    pub bounds: Rect,
}

impl BulletControl {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bullets: Vec::new(),
            bounds,
        }
    }

    /// Advance all bullets; any whose center leaves the arena is destroyed.
    ///
    /// No radius margin here, unlike asteroids: bullets vanish at the edge.
    pub fn update(&mut self) {
        for bullet in &mut self.bullets {
            bullet.update();
            if !self.bounds.contains(&bullet.hitbox.center) {
                bullet.destroy();
            }
        }
    }

    pub fn add_bullet(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    /// Destroy the bullet at `index` (no-op when absent or already destroyed)
    pub fn hit_bullet(&mut self, index: usize) {
        if let Some(bullet) = self.bullets.get_mut(index) {
            if !bullet.is_destroyed() {
                bullet.destroy();
            }
        }
    }

    /// Drop destroyed bullets; indices are invalid afterwards
    pub fn clean(&mut self) {
        self.bullets.retain(|b| !b.is_destroyed());
    }

    /// All bullets, including ones destroyed since the last `clean`
    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn live(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter().filter(|b| !b.is_destroyed())
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }
}
