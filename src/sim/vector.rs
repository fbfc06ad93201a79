//! 2D vector and axis-aligned rectangle
//!
//! `Vector2` mutators work in place and hand back `&mut Self`, so motion
//! code can chain: `step.scale(speed * dt).rotate(angle)`. Take a copy first
//! when the original must survive.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A 2D vector in arena space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn add(&mut self, v: Vector2) -> &mut Self {
        self.x += v.x;
        self.y += v.y;
        self
    }

    #[inline]
    pub fn subtract(&mut self, v: Vector2) -> &mut Self {
        self.x -= v.x;
        self.y -= v.y;
        self
    }

    #[inline]
    pub fn scale(&mut self, s: f64) -> &mut Self {
        self.x *= s;
        self.y *= s;
        self
    }

    /// Rotate by `deg` degrees; positive is counter-clockwise with Y up.
    ///
    /// On a Y-down screen a positive angle therefore turns clockwise.
    pub fn rotate(&mut self, deg: f64) -> &mut Self {
        *self = DVec2::from_angle(deg.to_radians())
            .rotate(DVec2::from(*self))
            .into();
        self
    }

    /// Negate both components
    #[inline]
    pub fn reverse(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self
    }

    /// Clamp each axis independently into `rect`
    pub fn clamp(&mut self, rect: &Rect) -> &mut Self {
        self.x = self.x.max(rect.min.x).min(rect.max.x);
        self.y = self.y.max(rect.min.y).min(rect.max.y);
        self
    }

    #[inline]
    pub fn length(&self) -> f64 {
        DVec2::from(*self).length()
    }

    #[inline]
    pub fn distance(&self, other: &Vector2) -> f64 {
        DVec2::from(*self).distance(DVec2::from(*other))
    }

    /// Unit vector in the same direction (zero stays zero)
    pub fn normalized(&self) -> Vector2 {
        DVec2::from(*self).normalize_or_zero().into()
    }
}

impl From<DVec2> for Vector2 {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2> for DVec2 {
    fn from(v: Vector2) -> Self {
        DVec2::new(v.x, v.y)
    }
}

/// Axis-aligned rectangle, inclusive on every edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vector2,
    pub max: Vector2,
}

impl Rect {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: Vector2::new(min_x, min_y),
            max: Vector2::new(max_x, max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Shrink by `margin` on all four sides
    pub fn inset(&self, margin: f64) -> Rect {
        self.expand(-margin)
    }

    /// Grow by `margin` on all four sides
    pub fn expand(&self, margin: f64) -> Rect {
        Rect::new(
            self.min.x - margin,
            self.min.y - margin,
            self.max.x + margin,
            self.max.y + margin,
        )
    }

    pub fn contains(&self, p: &Vector2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
