//! Data-driven game balance
//!
//! Every gameplay number lives here so a JSON override can rebalance the game
//! without touching simulation code. Missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::FRAME_MS;

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Fixed horizontal position of the stone
    pub player_x: f32,
    /// Collision diameter of the stone
    pub player_size: f32,
    /// Gravity magnitude (units/frame²)
    pub gravity: f32,
    /// Velocity clamp (units/frame)
    pub max_velocity: f32,
    /// Velocity multiplier applied on every gravity flip
    pub flip_velocity_factor: f32,
    /// Number of trail points kept behind the stone
    pub trail_length: usize,

    // === Timing ===
    /// Milliseconds that make up one frame-equivalent
    pub frame_ms: f32,
    /// Largest normalized step a single frame may integrate
    pub max_dt: f32,

    // === Obstacles ===
    /// Spawn interval at score 0 (frames)
    pub base_spawn_interval: f32,
    /// Spawn interval floor (frames)
    pub min_spawn_interval: f32,
    /// Spawn interval reduction per point
    pub spawn_interval_per_point: f32,
    /// How far the spawn timer is pre-filled when a game starts
    pub first_spawn_head_start: f32,
    /// Smallest gap between top and bottom obstacle
    pub gap_min: f32,
    /// Largest gap between top and bottom obstacle
    pub gap_max: f32,
    /// Obstacle width
    pub obstacle_width: f32,
    /// Obstacle speed at score 0 (units/frame)
    pub obstacle_speed: f32,
    /// Fractional speed increase per point
    pub speed_per_point: f32,

    // === Particles ===
    /// Particles per emission
    pub particles_per_burst: u32,
    /// Max initial speed on each axis
    pub particle_speed: f32,
    /// Lifetime in ticks
    pub particle_life: u32,
    pub particle_radius_min: f32,
    pub particle_radius_max: f32,
    /// Per-tick velocity damping
    pub particle_friction: f32,
    /// Number of emissions in the game-over explosion
    pub explosion_bursts: u32,

    // === Presentation ===
    /// Background color advances every N points
    pub background_every: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_x: 100.0,
            player_size: 20.0,
            gravity: 0.6,
            max_velocity: 8.0,
            flip_velocity_factor: -0.5,
            trail_length: 8,

            frame_ms: FRAME_MS,
            max_dt: 2.0,

            base_spawn_interval: 90.0,
            min_spawn_interval: 60.0,
            spawn_interval_per_point: 0.5,
            first_spawn_head_start: 30.0,
            gap_min: 150.0,
            gap_max: 250.0,
            obstacle_width: 40.0,
            obstacle_speed: 4.0,
            speed_per_point: 0.01,

            particles_per_burst: 8,
            particle_speed: 2.0,
            particle_life: 30,
            particle_radius_min: 2.0,
            particle_radius_max: 5.0,
            particle_friction: 0.98,
            explosion_bursts: 20,

            background_every: 3,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Convert elapsed milliseconds into frame-equivalents, capped at `max_dt`
    #[inline]
    pub fn normalize_dt(&self, delta_ms: f32) -> f32 {
        (delta_ms / self.frame_ms).clamp(0.0, self.max_dt)
    }

    /// Frames between obstacle spawns at the given score
    pub fn spawn_interval(&self, score: u32) -> f32 {
        (self.base_spawn_interval - score as f32 * self.spawn_interval_per_point)
            .max(self.min_spawn_interval)
    }

    /// Speed assigned to an obstacle spawned at the given score
    pub fn obstacle_speed_at(&self, score: u32) -> f32 {
        self.obstacle_speed * (1.0 + score as f32 * self.speed_per_point)
    }

    /// Spawn timer value when a game starts
    pub fn initial_spawn_timer(&self) -> f32 {
        self.base_spawn_interval - self.first_spawn_head_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_interval_ramp() {
        let tuning = Tuning::default();
        assert_eq!(tuning.spawn_interval(0), 90.0);
        assert_eq!(tuning.spawn_interval(9), 85.5);
        assert_eq!(tuning.spawn_interval(60), 60.0);
        assert_eq!(tuning.spawn_interval(500), 60.0);
    }

    #[test]
    fn test_obstacle_speed_ramp() {
        let tuning = Tuning::default();
        assert_eq!(tuning.obstacle_speed_at(0), 4.0);
        assert!((tuning.obstacle_speed_at(50) - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_normalize_dt_caps_long_frames() {
        let tuning = Tuning::default();
        assert_eq!(tuning.normalize_dt(16.0), 1.0);
        assert_eq!(tuning.normalize_dt(8.0), 0.5);
        assert_eq!(tuning.normalize_dt(1000.0), 2.0);
        assert_eq!(tuning.normalize_dt(-5.0), 0.0);
    }

    #[test]
    fn test_partial_json_override() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.9, "gap_min": 120.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.9);
        assert_eq!(tuning.gap_min, 120.0);
        assert_eq!(tuning.max_velocity, 8.0);
        assert_eq!(tuning.initial_spawn_timer(), 60.0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("{ gravity: }").is_err());
    }
}
