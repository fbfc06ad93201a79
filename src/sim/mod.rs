//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, compacted in place)
//! - No rendering, input polling or wall-clock reads

pub mod asteroid;
pub mod asteroid_control;
pub mod bullet;
pub mod collision;
pub mod player;
pub mod random;
pub mod state;
pub mod tick;
pub mod vector;

pub use asteroid::{Asteroid, AsteroidFactory, Edge};
pub use asteroid_control::AsteroidControl;
pub use bullet::{Bullet, BulletControl};
pub use collision::{CircularHitbox, HasHitbox};
pub use player::{FireError, GunConfig, INITIAL_HEADING, Player};
pub use random::{RngState, standard_normal};
pub use state::{Game, GamePhase, Snapshot};
pub use tick::{Key, TickInput, tick};
pub use vector::{Rect, Vector2};
