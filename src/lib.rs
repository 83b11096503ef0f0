//! Gravity Stone - a one-button gravity-flipping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, particles, game state)
//! - `renderer`: Drawing surface abstraction and the render stage
//! - `audio`: Tone service, sound effects and background music
//! - `persistence`: Best score and mute flag storage
//! - `tuning`: Data-driven game balance
//! - `session`: Glue between the simulation and its external services

pub mod audio;
pub mod clock;
pub mod persistence;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playable world height (logical units)
    pub const WORLD_HEIGHT: f32 = 500.0;
    /// Maximum playable world width; narrower containers shrink the world
    pub const MAX_WORLD_WIDTH: f32 = 800.0;
    /// Horizontal padding between the canvas and its container
    pub const CONTAINER_PADDING: f32 = 40.0;

    /// Nominal frame length in milliseconds (one "frame-equivalent" of motion)
    pub const FRAME_MS: f32 = 16.0;

    /// Number of colors in the background rotation
    pub const BACKGROUND_COUNT: usize = 20;
}
