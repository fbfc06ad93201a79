//! Circle-circle collision shared by every entity
//!
//! Player, bullets and asteroids all embed a [`CircularHitbox`] and expose it
//! through [`HasHitbox`], so a single predicate covers every pairing.

use serde::{Deserialize, Serialize};

use super::vector::Vector2;

/// A moving circle: position, size, and straight-line velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularHitbox {
    pub center: Vector2,
    pub radius: u32,
    /// Units per second along `direction`
    pub speed: f64,
    /// Heading; not required to be unit length
    pub direction: Vector2,
    pub destroyed: bool,
}

impl CircularHitbox {
    pub fn new(center: Vector2, radius: u32, speed: f64, direction: Vector2) -> Self {
        Self {
            center,
            radius,
            speed,
            direction,
            destroyed: false,
        }
    }

    /// Straight-line motion over one timestep
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        let mut step = self.direction;
        step.scale(self.speed * dt);
        self.center.add(step);
    }

    /// Mark destroyed; repeated calls are harmless
    #[inline]
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}

/// Anything with a circular hitbox
pub trait HasHitbox {
    fn hitbox(&self) -> &CircularHitbox;

    /// Center and radius of the collision circle
    fn hitbox_circle(&self) -> (Vector2, u32) {
        let hitbox = self.hitbox();
        (hitbox.center, hitbox.radius)
    }

    /// Circles touch or overlap (tangent counts)
    fn is_collided<H: HasHitbox + ?Sized>(&self, other: &H) -> bool {
        let (a, ra) = self.hitbox_circle();
        let (b, rb) = other.hitbox_circle();
        a.distance(&b) <= f64::from(ra) + f64::from(rb)
    }

    fn is_destroyed(&self) -> bool {
        self.hitbox().destroyed
    }
}

impl HasHitbox for CircularHitbox {
    fn hitbox(&self) -> &CircularHitbox {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn circle(x: f64, y: f64, radius: u32) -> CircularHitbox {
        CircularHitbox::new(Vector2::new(x, y), radius, 0.0, Vector2::ZERO)
    }

    #[test]
    fn test_overlap_collides() {
        let a = circle(100.0, 100.0, 20);
        assert!(a.is_collided(&circle(110.0, 110.0, 15)));
    }

    #[test]
    fn test_far_apart_misses() {
        let a = circle(100.0, 100.0, 20);
        assert!(!a.is_collided(&circle(200.0, 200.0, 10)));
    }

    #[test]
    fn test_tangent_collides() {
        let a = circle(100.0, 100.0, 20);
        assert!(a.is_collided(&circle(130.0, 100.0, 10)));
        assert!(!a.is_collided(&circle(130.5, 100.0, 10)));
    }

    #[test]
    fn test_zero_radius_same_point() {
        let a = circle(5.0, 5.0, 0);
        assert!(a.is_collided(&circle(5.0, 5.0, 0)));
    }

    #[test]
    fn test_advance() {
        let mut hitbox = CircularHitbox::new(Vector2::new(100.0, 100.0), 5, 400.0, Vector2::new(1.0, 0.0));
        hitbox.advance(1.0 / 60.0);
        assert!((hitbox.center.x - (100.0 + 400.0 / 60.0)).abs() < 1e-9);
        assert!((hitbox.center.y - 100.0).abs() < 1e-9);
        assert_eq!(hitbox.direction, Vector2::new(1.0, 0.0));
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut hitbox = circle(0.0, 0.0, 1);
        hitbox.destroy();
        hitbox.destroy();
        assert!(hitbox.is_destroyed());
    }

    proptest! {
        #[test]
        fn collision_is_symmetric(
            ax in -500.0..500.0f64, ay in -500.0..500.0f64, ar in 0u32..100,
            bx in -500.0..500.0f64, by in -500.0..500.0f64, br in 0u32..100,
        ) {
            let a = circle(ax, ay, ar);
            let b = circle(bx, by, br);
            prop_assert_eq!(a.is_collided(&b), b.is_collided(&a));
        }

        #[test]
        fn collision_matches_distance(
            ax in -500.0..500.0f64, ay in -500.0..500.0f64, ar in 0u32..100,
            bx in -500.0..500.0f64, by in -500.0..500.0f64, br in 0u32..100,
        ) {
            let a = circle(ax, ay, ar);
            let b = circle(bx, by, br);
            let distance = ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt();
            let expected = distance <= f64::from(ar + br);
            // Skip the knife edge where the two sqrt paths may round differently
            prop_assume!((distance - f64::from(ar + br)).abs() > 1e-9);
            prop_assert_eq!(a.is_collided(&b), expected);
        }
    }
}
