//! Stone physics under a reversible gravity field

use super::state::{Player, World};
use crate::tuning::Tuning;

/// The stone touched a world boundary (always fatal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryHit {
    Top,
    Bottom,
}

/// Integrate the stone for one frame of `delta_ms` milliseconds.
///
/// The step is normalized to frame-equivalents and capped, so a stalled tab
/// cannot teleport the stone through a boundary.
pub fn integrate(
    player: &mut Player,
    world: &World,
    tuning: &Tuning,
    delta_ms: f32,
) -> Option<BoundaryHit> {
    let dt = tuning.normalize_dt(delta_ms);
    let half = player.half_size();

    // World may have been resized since the last frame
    if world.height > player.size {
        player.pos.y = player.pos.y.clamp(half, world.height - half);
    }

    player.vel += player.gravity * player.gravity_dir.sign() * dt;
    player.vel = player.vel.clamp(-tuning.max_velocity, tuning.max_velocity);

    player.pos.y += player.vel * dt;

    let mut hit = None;
    if player.top() < 0.0 {
        player.pos.y = half;
        player.vel = 0.0;
        hit = Some(BoundaryHit::Top);
    }
    if player.bottom() > world.height {
        player.pos.y = world.height - half;
        player.vel = 0.0;
        hit = Some(BoundaryHit::Bottom);
    }

    player.record_trail(tuning.trail_length);
    hit
}

/// Reverse gravity and partially reverse the current velocity
pub fn flip_gravity(player: &mut Player, tuning: &Tuning) {
    player.gravity_dir = player.gravity_dir.flipped();
    player.vel *= tuning.flip_velocity_factor;
}
