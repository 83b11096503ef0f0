//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering, audio, storage or platform dependencies

pub mod autopilot;
pub mod obstacles;
pub mod particles;
pub mod physics;
pub mod state;
pub mod tick;

pub use obstacles::{AdvanceOutcome, ObstacleField, collides};
pub use particles::ParticleSystem;
pub use physics::{BoundaryHit, flip_gravity, integrate};
pub use state::{
    DeathCause, GameEvent, GamePhase, GameState, GravityDir, Obstacle, Particle, Player, Tint,
    World,
};
pub use tick::{activate, flip, reset, start_game, tick};
