//! Idle/demo mode: a simple bot that decides when to flip gravity
//!
//! Steers the stone toward the middle of the next gap it has not yet passed,
//! or toward mid-world when the screen is empty.

use super::state::{GameState, GravityDir};

/// How far from the target the stone may drift before the bot reacts
const DEADBAND: f32 = 20.0;

/// Vertical point the bot is currently aiming for
pub fn target_y(state: &GameState) -> f32 {
    state
        .obstacles
        .iter()
        .filter(|o| !o.passed && o.right() >= state.player.left())
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        .map(|o| o.gap_center())
        .unwrap_or(state.world.height / 2.0)
}

/// True when flipping now moves the stone toward the target
pub fn wants_flip(state: &GameState) -> bool {
    if !state.is_playing() {
        return false;
    }
    let target = target_y(state);
    let y = state.player.pos.y;
    match state.player.gravity_dir {
        GravityDir::Down => y > target + DEADBAND,
        GravityDir::Up => y < target - DEADBAND,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::state::Obstacle;
    use crate::sim::tick::{flip, start_game, tick};

    #[test]
    fn test_targets_next_gap() {
        let mut state = GameState::new(1);
        start_game(&mut state);
        assert_eq!(target_y(&state), 250.0);

        state
            .obstacles
            .obstacles
            .push(Obstacle::new(300.0, 50.0, 150.0, 40.0, 500.0, 4.0));
        state
            .obstacles
            .obstacles
            .push(Obstacle::new(600.0, 300.0, 150.0, 40.0, 500.0, 4.0));
        assert_eq!(target_y(&state), 125.0);
    }

    #[test]
    fn test_flips_toward_target() {
        let mut state = GameState::new(1);
        start_game(&mut state);
        state.player.pos.y = 400.0;
        assert!(wants_flip(&state));
        state.player.gravity_dir = GravityDir::Up;
        assert!(!wants_flip(&state));
        state.player.pos.y = 100.0;
        assert!(wants_flip(&state));
    }

    #[test]
    fn test_bot_survives_empty_screen() {
        let mut state = GameState::new(42);
        start_game(&mut state);
        // Before the first obstacle arrives the bot only has the walls to avoid
        for _ in 0..25 {
            if wants_flip(&state) {
                flip(&mut state);
            }
            tick(&mut state, FRAME_MS);
        }
        assert!(state.is_playing());
    }
}
