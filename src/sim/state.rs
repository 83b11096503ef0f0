//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives here. The state never talks to
//! audio, storage or the screen; it queues [`GameEvent`]s instead.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacles::ObstacleField;
use super::particles::ParticleSystem;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the game lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first activation
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, simulation frozen
    GameOver,
}

/// Which way gravity pulls the stone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GravityDir {
    #[default]
    Down,
    Up,
}

impl GravityDir {
    /// +1 for down (increasing y), -1 for up
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            GravityDir::Down => 1.0,
            GravityDir::Up => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            GravityDir::Down => GravityDir::Up,
            GravityDir::Up => GravityDir::Down,
        }
    }
}

/// Playable area. Height is fixed, width follows the container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: MAX_WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// World sized for a container of the given pixel width
    pub fn fit_to_container(container_width: f32) -> Self {
        Self {
            width: (container_width - CONTAINER_PADDING).clamp(0.0, MAX_WORLD_WIDTH),
            height: WORLD_HEIGHT,
        }
    }
}

/// The player's stone
#[derive(Debug, Clone)]
pub struct Player {
    /// Center position (x never changes during play)
    pub pos: Vec2,
    /// Vertical velocity (units/frame, positive = down)
    pub vel: f32,
    /// Gravity magnitude
    pub gravity: f32,
    pub gravity_dir: GravityDir,
    /// Collision diameter
    pub size: f32,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Player {
    pub fn new(tuning: &Tuning, world: &World) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, world.height / 2.0),
            vel: 0.0,
            gravity: tuning.gravity,
            gravity_dir: GravityDir::Down,
            size: tuning.player_size,
            trail: VecDeque::with_capacity(tuning.trail_length + 1),
        }
    }

    /// Put the stone back at mid-world, at rest, falling down
    pub fn reset(&mut self, world: &World) {
        self.pos.y = world.height / 2.0;
        self.vel = 0.0;
        self.gravity_dir = GravityDir::Down;
        self.trail.clear();
    }

    #[inline]
    pub fn half_size(&self) -> f32 {
        self.size / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.half_size()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.half_size()
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.half_size()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.half_size()
    }

    /// Record current position to the trail, evicting the oldest point
    pub fn record_trail(&mut self, max_len: usize) {
        self.trail.push_back(self.pos);
        while self.trail.len() > max_len {
            self.trail.pop_front();
        }
    }
}

/// A gap obstacle: a top pillar and a bottom pillar with a gap between
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Height of the top pillar (= gap top)
    pub top_height: f32,
    /// Where the bottom pillar starts (= gap bottom)
    pub bottom_y: f32,
    /// Height of the bottom pillar
    pub bottom_height: f32,
    pub width: f32,
    /// Already scored
    pub passed: bool,
    /// Horizontal speed, fixed at spawn time
    pub speed: f32,
}

impl Obstacle {
    pub fn new(
        x: f32,
        gap_position: f32,
        gap_size: f32,
        width: f32,
        world_height: f32,
        speed: f32,
    ) -> Self {
        let bottom_y = gap_position + gap_size;
        Self {
            x,
            top_height: gap_position,
            bottom_y,
            bottom_height: (world_height - bottom_y).max(0.0),
            width,
            passed: false,
            speed,
        }
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_size(&self) -> f32 {
        self.bottom_y - self.top_height
    }

    /// Vertical center of the gap
    #[inline]
    pub fn gap_center(&self) -> f32 {
        (self.top_height + self.bottom_y) / 2.0
    }
}

/// Particle color family, resolved to a real color by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    /// Gravity flip (blue)
    Flip,
    /// Point scored (gold)
    Score,
    /// Game-over explosion (red)
    Explosion,
}

/// A decorative particle (not gameplay-affecting)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in ticks
    pub life: u32,
    pub max_life: u32,
    pub radius: f32,
    pub tint: Tint,
}

impl Particle {
    /// Remaining life as a 0-1 fraction (used for fade-out)
    pub fn life_fraction(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    TopBoundary,
    BottomBoundary,
    Obstacle,
}

/// Things that happened during a tick, for audio/storage/UI to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    GravityFlipped { direction: GravityDir },
    Scored { score: u32 },
    BackgroundShifted { index: usize },
    GameOver { score: u32, cause: DeathCause },
}

/// Complete simulation state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub world: World,
    pub phase: GamePhase,
    pub score: u32,
    pub player: Player,
    pub obstacles: ObstacleField,
    pub particles: ParticleSystem,
    /// Index into the background palette
    pub background_index: usize,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with default balance and world size
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default(), World::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning, world: World) -> Self {
        let player = Player::new(&tuning, &world);
        Self {
            seed,
            world,
            phase: GamePhase::Start,
            score: 0,
            player,
            obstacles: ObstacleField::default(),
            particles: ParticleSystem::default(),
            background_index: 0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            tuning,
        }
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}
