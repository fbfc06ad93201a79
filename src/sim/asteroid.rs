//! Asteroids and the edge-spawn factory

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{CircularHitbox, HasHitbox};
use super::random::standard_normal;
use super::vector::{Rect, Vector2};
use crate::consts::SIM_DT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub hitbox: CircularHitbox,
}

impl Asteroid {
    pub fn new(center: Vector2, radius: u32, speed: f64, direction: Vector2) -> Self {
        Self {
            hitbox: CircularHitbox::new(center, radius, speed, direction),
        }
    }

    /// Drift one timestep along the heading (no spin, no friction)
    pub fn update(&mut self) {
        self.hitbox.advance(SIM_DT);
    }

    pub fn destroy(&mut self) {
        self.hitbox.destroy();
    }
}

impl HasHitbox for Asteroid {
    fn hitbox(&self) -> &CircularHitbox {
        &self.hitbox
    }
}

impl fmt::Display for Asteroid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.hitbox;
        write!(
            f,
            "Asteroid{{Center: {:.2}, {:.2}, Radius: {}, Speed: {:.2}, Direction: {:.2}, {:.2}}}",
            h.center.x, h.center.y, h.radius, h.speed, h.direction.x, h.direction.y
        )
    }
}

/// Arena edge an asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Edge by index, clockwise from the top (0..=3)
    pub fn from_index(index: usize) -> Option<Edge> {
        Self::ALL.get(index).copied()
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Edge {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Heading that points straight into the arena (Y down)
    pub fn inward(self) -> Vector2 {
        match self {
            Edge::Top => Vector2::new(0.0, 1.0),
            Edge::Right => Vector2::new(-1.0, 0.0),
            Edge::Bottom => Vector2::new(0.0, -1.0),
            Edge::Left => Vector2::new(1.0, 0.0),
        }
    }
}

/// Builds asteroids on the arena edges from one fixed configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidFactory {
    pub min_radius: u32,
    /// Number of size classes
    pub kind: u32,
    pub bounds: Rect,
    pub max_speed: f64,
    pub min_speed: f64,
    /// Standard deviation (degrees) of the heading perturbation
    pub max_angle: f64,
}

impl AsteroidFactory {
    /// A new asteroid entering from `edge`
    ///
    /// Radius is one of `min_radius * 1..=kind`, speed a whole number in
    /// `[min_speed, max_speed)`, and the heading is the edge's inward
    /// direction turned by a Gaussian angle scaled by `max_angle`.
    pub fn new_asteroid<R: Rng + ?Sized>(&self, edge: Edge, rng: &mut R) -> Asteroid {
        let class = rng.random_range(0..self.kind.max(1)) + 1;
        let radius = class * self.min_radius;
        let r = f64::from(radius);

        let min_speed = self.min_speed as i64;
        let max_speed = (self.max_speed as i64).max(min_speed + 1);
        let speed = rng.random_range(min_speed..max_speed) as f64;

        let angle = standard_normal(rng) * self.max_angle;

        let b = &self.bounds;
        let center = match edge {
            Edge::Top => Vector2::new(uniform(rng, b.min.x + r, b.max.x - r), b.min.y),
            Edge::Right => Vector2::new(b.max.x - r, uniform(rng, b.min.y + r, b.max.y - r)),
            Edge::Bottom => Vector2::new(uniform(rng, b.min.x + r, b.max.x - r), b.max.y - r),
            Edge::Left => Vector2::new(b.min.x + r, uniform(rng, b.min.y + r, b.max.y - r)),
        };

        let mut direction = edge.inward();
        direction.rotate(angle);

        Asteroid::new(center, radius, speed, direction)
    }
}

/// Uniform in `[lo, hi]`; collapses to the midpoint when the range is inverted
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if lo < hi {
        rng.random_range(lo..=hi)
    } else {
        (lo + hi) / 2.0
    }
}
