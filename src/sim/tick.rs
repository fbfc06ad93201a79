//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly `SIM_DT`. The caller owns the frame
//! loop and the clock; the core never reads wall time.

use serde::{Deserialize, Serialize};

use super::collision::HasHitbox;
use super::player::FireError;
use super::state::{Game, GamePhase};

/// Input identifiers the core understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Forward,
    Backward,
    RotateLeft,
    RotateRight,
    Fire,
    /// Only honored after a game over
    Restart,
}

/// Keys held for a single tick, in the order the host reported them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub pressed: Vec<Key>,
}

impl TickInput {
    pub fn new(pressed: &[Key]) -> Self {
        Self {
            pressed: pressed.to_vec(),
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

impl Game {
    /// Advance one fixed timestep
    pub fn step(&mut self, input: &TickInput) {
        tick(self, input);
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(game: &mut Game, input: &TickInput) {
    game.keys.clear();
    game.keys.extend_from_slice(&input.pressed);

    match game.phase {
        GamePhase::GameOver => {
            if input.is_pressed(Key::Restart) {
                game.reset();
            }
        }
        GamePhase::Playing => play_frame(game),
    }
}

fn play_frame(game: &mut Game) {
    game.frame += 1;
    let now = game.now();

    // The three updates touch disjoint state; all must finish before any
    // collision test reads positions.
    {
        let Game {
            player,
            asteroids,
            bullets,
            keys,
            ..
        } = &mut *game;
        let keys = keys.as_slice();
        rayon::join(
            || player.update(keys),
            || rayon::join(|| asteroids.update(now), || bullets.update()),
        );
    }

    if let Some(asteroid) = game.asteroids.live().find(|a| game.player.is_collided(*a)) {
        let ship = game.player.hitbox.center;
        log::info!(
            "Player({:.2}, {:.2}) collided with Asteroid({:.2}, {:.2}), game over at frame {}",
            ship.x,
            ship.y,
            asteroid.hitbox.center.x,
            asteroid.hitbox.center.y,
            game.frame
        );
        game.phase = GamePhase::GameOver;
        return;
    }

    resolve_bullet_hits(game);

    game.bullets.clean();
    game.asteroids.clean();

    if game.keys.contains(&Key::Fire) {
        match game.player.fire(now) {
            Ok(bullet) => game.bullets.add_bullet(bullet),
            Err(FireError::GunNotReady) => {}
        }
    }
}

/// Pair every live bullet with every live asteroid
///
/// Once either side of a pair is destroyed this frame it is skipped for the
/// rest of the pass. Split children appended here wait for the next frame.
fn resolve_bullet_hits(game: &mut Game) {
    let bullet_count = game.bullets.len();
    let asteroid_count = game.asteroids.len();

    for i in 0..bullet_count {
        for j in 0..asteroid_count {
            let bullet = &game.bullets.bullets[i];
            let asteroid = &game.asteroids.asteroids[j];
            if bullet.is_destroyed() || asteroid.is_destroyed() {
                continue;
            }
            if bullet.is_collided(asteroid) {
                log::debug!(
                    "Bullet({:.2}, {:.2}) collided with Asteroid({:.2}, {:.2})",
                    bullet.hitbox.center.x,
                    bullet.hitbox.center.y,
                    asteroid.hitbox.center.x,
                    asteroid.hitbox.center.y
                );
                game.bullets.hit_bullet(i);
                game.asteroids.hit_asteroid(j);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::asteroid::Asteroid;
    use crate::sim::bullet::Bullet;
    use crate::sim::vector::Vector2;

    fn game_with(seed: u64, spawn_rate: &str) -> Game {
        let config = GameConfig {
            seed: Some(seed),
            asteroid_spawn_rate: spawn_rate.to_string(),
            ..Default::default()
        };
        Game::new(&config).unwrap()
    }

    /// A game past its first frame with the opening spawn removed and no
    /// further spawns for an hour
    fn quiet_game() -> Game {
        let mut game = game_with(12345, "1h");
        game.step(&TickInput::default());
        game.asteroids.asteroids.clear();
        game
    }

    fn run(game: &mut Game, keys: &[Key], frames: usize) {
        let input = TickInput::new(keys);
        for _ in 0..frames {
            game.step(&input);
        }
    }

    fn still_asteroid(center: Vector2, radius: u32) -> Asteroid {
        Asteroid::new(center, radius, 0.0, Vector2::new(0.0, 1.0))
    }

    #[test]
    fn test_first_step_spawns_asteroid() {
        let mut game = game_with(1, "1s");
        game.step(&TickInput::default());
        assert_eq!(game.frame(), 1);
        assert_eq!(game.asteroids.len(), 1);
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_spawns_follow_simulated_clock() {
        let mut game = game_with(2, "1s");
        game.step(&TickInput::default());
        let opening = game.asteroids.last_spawn_at;
        assert!(opening.is_some());

        run(&mut game, &[], 58);
        assert_eq!(game.asteroids.last_spawn_at, opening);

        // Past one simulated second since the opening spawn
        run(&mut game, &[], 3);
        assert!(game.asteroids.last_spawn_at > opening);
    }

    #[test]
    fn test_player_moves_while_playing() {
        let mut game = quiet_game();
        let start = game.player().hitbox.center;
        run(&mut game, &[Key::Forward], 10);
        assert!(game.player().hitbox.center.y < start.y);
    }

    #[test]
    fn test_contact_ends_game() {
        let mut game = quiet_game();
        let ship = game.player().hitbox.center;
        game.asteroids.add_asteroid(still_asteroid(ship, 20));

        game.step(&TickInput::new(&[Key::Fire]));
        assert_eq!(game.phase(), GamePhase::GameOver);
        // The frame ended before firing
        assert_eq!(game.bullets().count(), 0);

        let frame = game.frame();
        let position = game.player().hitbox.center;
        run(&mut game, &[Key::Forward, Key::RotateLeft, Key::Fire], 30);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.player().hitbox.center, position);
        assert_eq!(game.frame(), frame);
        assert_eq!(game.bullets().count(), 0);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut game = quiet_game();
        let ship = game.player().hitbox.center;
        game.asteroids.add_asteroid(still_asteroid(ship, 20));
        game.step(&TickInput::default());
        assert_eq!(game.phase(), GamePhase::GameOver);

        game.step(&TickInput::new(&[Key::Restart]));
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.frame(), 0);
        assert_eq!(game.asteroids().count(), 0);
        assert_eq!(game.bullets().count(), 0);
        assert_eq!(game.player().hitbox.center, ship);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut game = quiet_game();
        run(&mut game, &[Key::Restart], 5);
        assert_eq!(game.frame(), 6);
    }

    #[test]
    fn test_bullet_splits_asteroid() {
        let mut game = quiet_game();
        let ship = game.player().hitbox.center;
        let target = Vector2::new(ship.x, ship.y - 160.0);
        game.asteroids.add_asteroid(still_asteroid(target, 60));

        game.step(&TickInput::new(&[Key::Fire]));
        assert_eq!(game.bullets().count(), 1);
        assert_eq!(game.bullets.bullets()[0].hitbox.center, game.player().triangle()[0]);

        run(&mut game, &[], 20);

        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.bullets.len(), 0);
        let survivors: Vec<_> = game.asteroids().collect();
        assert_eq!(survivors.len(), 2);
        for child in survivors {
            assert_eq!(child.hitbox.radius, 40);
            assert!((child.hitbox.center.distance(&target) - 60.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bullet_destroys_smallest_asteroid() {
        let mut game = quiet_game();
        let ship = game.player().hitbox.center;
        game.asteroids
            .add_asteroid(still_asteroid(Vector2::new(ship.x, ship.y - 160.0), 20));

        game.step(&TickInput::new(&[Key::Fire]));
        run(&mut game, &[], 20);

        assert_eq!(game.asteroids.len(), 0);
        assert_eq!(game.bullets.len(), 0);
    }

    #[test]
    fn test_one_asteroid_absorbs_only_one_bullet() {
        let mut game = quiet_game();
        let spot = Vector2::new(100.0, 100.0);
        game.asteroids.add_asteroid(still_asteroid(spot, 20));
        game.bullets.add_bullet(Bullet::new(spot, 3, 0.0, Vector2::ZERO));
        game.bullets.add_bullet(Bullet::new(spot, 3, 0.0, Vector2::ZERO));

        game.step(&TickInput::default());

        assert_eq!(game.asteroids.len(), 0);
        assert_eq!(game.bullets.len(), 1);
        assert!(!game.bullets.bullets()[0].is_destroyed());
    }

    #[test]
    fn test_split_children_wait_a_frame() {
        let mut game = quiet_game();
        let spot = Vector2::new(100.0, 100.0);
        game.asteroids.add_asteroid(still_asteroid(spot, 40));
        game.bullets.add_bullet(Bullet::new(spot, 3, 0.0, Vector2::ZERO));
        // Large enough to overlap the parent and both children
        let wide = Vector2::new(100.0, 130.0);
        game.bullets.add_bullet(Bullet::new(wide, 40, 0.0, Vector2::ZERO));

        game.step(&TickInput::default());
        assert_eq!(game.asteroids.len(), 2);
        assert_eq!(game.bullets.len(), 1);
        assert_eq!(game.bullets.bullets()[0].hitbox.radius, 40);

        game.step(&TickInput::default());
        assert_eq!(game.asteroids.len(), 1);
        assert_eq!(game.bullets.len(), 0);
    }

    #[test]
    fn test_held_fire_respects_cooldown() {
        let mut game = quiet_game();
        run(&mut game, &[Key::Fire], 12);
        assert_eq!(game.bullets().count(), 1);

        run(&mut game, &[Key::Fire], 18);
        let fired = game.bullets().count();
        assert!((2..=3).contains(&fired), "fired {fired}");
    }

    #[test]
    fn test_determinism() {
        let mut game1 = game_with(99999, "250ms");
        let mut game2 = game_with(99999, "250ms");

        let inputs = [
            TickInput::new(&[Key::RotateLeft, Key::Fire]),
            TickInput::new(&[Key::Forward]),
            TickInput::new(&[Key::RotateRight, Key::Fire]),
            TickInput::default(),
        ];

        for frame in 0..240 {
            let input = &inputs[frame % inputs.len()];
            game1.step(input);
            game2.step(input);
        }

        assert_eq!(game1.phase(), game2.phase());
        assert_eq!(game1.frame(), game2.frame());
        let a: Vec<_> = game1.asteroids().map(|a| a.hitbox).collect();
        let b: Vec<_> = game2.asteroids().map(|a| a.hitbox).collect();
        assert_eq!(a, b);
        assert_eq!(game1.player().hitbox, game2.player().hitbox);
    }
}
