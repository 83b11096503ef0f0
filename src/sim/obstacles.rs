//! Gap obstacles: timed spawning, scrolling, scoring and collision

use rand::Rng;

use super::state::{Obstacle, Player, World};
use crate::tuning::Tuning;

/// Result of advancing every obstacle by one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceOutcome {
    /// Obstacles the stone passed this frame
    pub scored: u32,
    /// The stone hit an obstacle
    pub collided: bool,
}

/// Live obstacles plus the spawn timer
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    /// In spawn order (leftmost first)
    pub obstacles: Vec<Obstacle>,
    /// Frames accumulated since the last spawn
    pub spawn_timer: f32,
}

impl ObstacleField {
    /// Remove every obstacle and set the spawn timer
    pub fn reset(&mut self, spawn_timer: f32) {
        self.obstacles.clear();
        self.spawn_timer = spawn_timer;
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Accumulate `dt` frames and spawn when the score-dependent interval
    /// has elapsed. Returns true if an obstacle was spawned.
    pub fn spawn_if_due<R: Rng>(
        &mut self,
        dt: f32,
        score: u32,
        world: &World,
        tuning: &Tuning,
        rng: &mut R,
    ) -> bool {
        self.spawn_timer += dt;
        if self.spawn_timer < tuning.spawn_interval(score) {
            return false;
        }
        self.spawn(score, world, tuning, rng);
        self.spawn_timer = 0.0;
        true
    }

    /// Spawn one obstacle at the right edge of the world
    pub fn spawn<R: Rng>(&mut self, score: u32, world: &World, tuning: &Tuning, rng: &mut R) {
        let gap_size = rng.random_range(tuning.gap_min..=tuning.gap_max);
        let gap_position = rng.random_range(0.0..=(world.height - gap_size).max(0.0));
        let speed = tuning.obstacle_speed_at(score);

        log::trace!(
            "Obstacle spawned: gap {:.1} at {:.1}, speed {:.2}",
            gap_size,
            gap_position,
            speed
        );

        self.obstacles.push(Obstacle::new(
            world.width,
            gap_position,
            gap_size,
            tuning.obstacle_width,
            world.height,
            speed,
        ));
    }

    /// Scroll every obstacle left, score the ones the stone has cleared and
    /// drop the ones that left the world. Stops at the first collision.
    pub fn advance_all(&mut self, dt: f32, player: &Player) -> AdvanceOutcome {
        let mut outcome = AdvanceOutcome::default();

        for obstacle in &mut self.obstacles {
            obstacle.x -= obstacle.speed * dt;

            if !obstacle.passed && obstacle.right() < player.pos.x {
                obstacle.passed = true;
                outcome.scored += 1;
            }

            if collides(player, obstacle) {
                outcome.collided = true;
                break;
            }
        }

        self.obstacles.retain(|o| o.right() >= 0.0);
        outcome
    }
}

/// Axis-aligned test of the stone's bounding box against both pillars.
///
/// Edges that exactly touch do not count as a hit.
pub fn collides(player: &Player, obstacle: &Obstacle) -> bool {
    let overlaps_x = player.right() > obstacle.x && player.left() < obstacle.right();
    overlaps_x && (player.top() < obstacle.top_height || player.bottom() > obstacle.bottom_y)
}
