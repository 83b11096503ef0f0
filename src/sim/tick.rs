//! Lifecycle transitions and the per-frame simulation step
//!
//! Start → Playing → GameOver → (reset) → Playing. Only Playing advances the
//! world; everything else is frozen.

use super::physics::{self, BoundaryHit};
use super::state::{DeathCause, GameEvent, GamePhase, GameState, Tint};
use crate::consts::BACKGROUND_COUNT;

/// The single "activate" input (click, tap or key press)
pub fn activate(state: &mut GameState) {
    match state.phase {
        GamePhase::Start => start_game(state),
        GamePhase::GameOver => {
            reset(state);
            start_game(state);
        }
        GamePhase::Playing => flip(state),
    }
}

/// Enter Playing with a fresh run
pub fn start_game(state: &mut GameState) {
    state.phase = GamePhase::Playing;
    state.score = 0;
    state.time_ticks = 0;
    state.background_index = 0;
    state
        .obstacles
        .reset(state.tuning.initial_spawn_timer());
    state.particles.clear();
    state.player.reset(&state.world);
    state.events.push(GameEvent::Started);

    log::info!("Game started (seed {})", state.seed);
}

/// Return to Start with an empty world
pub fn reset(state: &mut GameState) {
    state.phase = GamePhase::Start;
    state.score = 0;
    state.time_ticks = 0;
    state.background_index = 0;
    state.obstacles.reset(0.0);
    state.particles.clear();
    state.player.reset(&state.world);
}

/// Flip gravity (no-op unless Playing)
pub fn flip(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    physics::flip_gravity(&mut state.player, &state.tuning);
    let pos = state.player.pos;
    state
        .particles
        .burst(&mut state.rng, &state.tuning, pos, Tint::Flip);
    state.events.push(GameEvent::GravityFlipped {
        direction: state.player.gravity_dir,
    });
}

/// Advance the game by one displayed frame of `delta_ms` milliseconds.
///
/// Order within a frame: stone physics, obstacles, particles. A fatal hit
/// ends the frame immediately.
pub fn tick(state: &mut GameState, delta_ms: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    if let Some(hit) = physics::integrate(&mut state.player, &state.world, &state.tuning, delta_ms)
    {
        let cause = match hit {
            BoundaryHit::Top => DeathCause::TopBoundary,
            BoundaryHit::Bottom => DeathCause::BottomBoundary,
        };
        game_over(state, cause);
        return;
    }

    let dt = state.tuning.normalize_dt(delta_ms);
    state.obstacles.spawn_if_due(
        dt,
        state.score,
        &state.world,
        &state.tuning,
        &mut state.rng,
    );
    let outcome = state.obstacles.advance_all(dt, &state.player);

    for _ in 0..outcome.scored {
        award_point(state);
    }
    if outcome.collided {
        game_over(state, DeathCause::Obstacle);
        return;
    }

    state.particles.tick(state.tuning.particle_friction);
}

fn award_point(state: &mut GameState) {
    state.score += 1;
    let pos = state.player.pos;
    state
        .particles
        .burst(&mut state.rng, &state.tuning, pos, Tint::Score);
    state.events.push(GameEvent::Scored { score: state.score });

    let every = state.tuning.background_every.max(1);
    if state.score.is_multiple_of(every) {
        state.background_index = (state.background_index + 1) % BACKGROUND_COUNT;
        state.events.push(GameEvent::BackgroundShifted {
            index: state.background_index,
        });
    }
}

fn game_over(state: &mut GameState, cause: DeathCause) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.phase = GamePhase::GameOver;
    let pos = state.player.pos;
    state.particles.explode(&mut state.rng, &state.tuning, pos);
    state.events.push(GameEvent::GameOver {
        score: state.score,
        cause,
    });

    log::info!(
        "Game over: {:?} after {} ticks, score {}",
        cause,
        state.time_ticks,
        state.score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::state::{GravityDir, Obstacle};
    use proptest::prelude::*;

    /// An obstacle whose gap (150..350) the stone at mid-world fits through,
    /// placed so that it is passed on the next frame
    fn passing_obstacle() -> Obstacle {
        Obstacle::new(62.0, 150.0, 200.0, 40.0, 500.0, 4.0)
    }

    #[test]
    fn test_activate_start_to_playing() {
        let mut state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Start);

        activate(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.obstacles.spawn_timer, 60.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_activate_while_playing_flips() {
        let mut state = GameState::new(12345);
        activate(&mut state);
        state.drain_events();

        activate(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.gravity_dir, GravityDir::Up);
        assert_eq!(state.particles.len(), 8);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GravityFlipped {
                direction: GravityDir::Up
            }]
        );
    }

    #[test]
    fn test_flip_is_noop_outside_playing() {
        let mut state = GameState::new(1);
        flip(&mut state);
        assert_eq!(state.player.gravity_dir, GravityDir::Down);
        assert!(state.particles.is_empty());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_tick_is_noop_outside_playing() {
        let mut state = GameState::new(1);
        tick(&mut state, FRAME_MS);
        assert_eq!(state.player.pos.y, 250.0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_first_obstacle_arrives_early() {
        let mut state = GameState::new(12345);
        start_game(&mut state);
        for _ in 0..29 {
            tick(&mut state, FRAME_MS);
        }
        assert!(state.obstacles.is_empty());
        tick(&mut state, FRAME_MS);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_falling_stone_hits_bottom() {
        let mut state = GameState::new(12345);
        start_game(&mut state);
        state.drain_events();

        let mut frames = 0;
        while state.phase == GamePhase::Playing && frames < 1000 {
            tick(&mut state, FRAME_MS);
            frames += 1;
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.pos.y, 490.0);
        assert_eq!(state.particles.len(), 160);

        let events = state.drain_events();
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver {
                score: 0,
                cause: DeathCause::BottomBoundary
            })
        );
    }

    #[test]
    fn test_no_mutation_after_game_over() {
        let mut state = GameState::new(9);
        start_game(&mut state);
        state.player.pos.y = 489.0;
        state.player.vel = 8.0;
        tick(&mut state, FRAME_MS);
        assert_eq!(state.phase, GamePhase::GameOver);

        let y = state.player.pos.y;
        let particles = state.particles.len();
        let ticks = state.time_ticks;
        tick(&mut state, FRAME_MS);
        flip(&mut state);
        assert_eq!(state.player.pos.y, y);
        assert_eq!(state.particles.len(), particles);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_scoring_and_background_rotation() {
        let mut state = GameState::new(5);
        start_game(&mut state);
        state.drain_events();

        for expected in 1..=3 {
            state.obstacles.obstacles.push(passing_obstacle());
            state.player.pos.y = 250.0;
            state.player.vel = 0.0;
            tick(&mut state, FRAME_MS);
            assert_eq!(state.score, expected);
        }
        assert_eq!(state.background_index, 1);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Scored { score: 3 }));
        assert!(events.contains(&GameEvent::BackgroundShifted { index: 1 }));
        assert!(!events.contains(&GameEvent::BackgroundShifted { index: 2 }));
    }

    #[test]
    fn test_obstacle_collision_ends_game() {
        let mut state = GameState::new(5);
        start_game(&mut state);
        state
            .obstacles
            .obstacles
            .push(Obstacle::new(95.0, 300.0, 150.0, 40.0, 500.0, 4.0));
        tick(&mut state, FRAME_MS);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(matches!(
            state.drain_events().last(),
            Some(GameEvent::GameOver {
                cause: DeathCause::Obstacle,
                ..
            })
        ));
    }

    #[test]
    fn test_restart_from_game_over_resets_everything() {
        let mut state = GameState::new(77);
        start_game(&mut state);
        state.obstacles.obstacles.push(passing_obstacle());
        tick(&mut state, FRAME_MS);
        assert_eq!(state.score, 1);

        state.player.pos.y = 11.0;
        state.player.vel = -8.0;
        state.player.gravity_dir = GravityDir::Up;
        tick(&mut state, FRAME_MS);
        assert_eq!(state.phase, GamePhase::GameOver);

        activate(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.player.pos.y, 250.0);
        assert_eq!(state.player.vel, 0.0);
        assert_eq!(state.player.gravity_dir, GravityDir::Down);
        assert!(state.player.trail.is_empty());
        assert_eq!(state.obstacles.spawn_timer, 60.0);
        assert_eq!(state.background_index, 0);
    }

    #[test]
    fn test_reset_leaves_start_phase() {
        let mut state = GameState::new(3);
        start_game(&mut state);
        tick(&mut state, FRAME_MS);
        state.background_index = 4;
        reset(&mut state);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.obstacles.spawn_timer, 0.0);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.background_index, 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        start_game(&mut state1);
        start_game(&mut state2);

        for frame in 0..120 {
            if frame % 9 == 0 {
                flip(&mut state1);
                flip(&mut state2);
            }
            tick(&mut state1, FRAME_MS);
            tick(&mut state2, FRAME_MS);
        }

        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.obstacles.obstacles, state2.obstacles.obstacles);
        assert_eq!(state1.particles.len(), state2.particles.len());
    }

    proptest! {
        #[test]
        fn prop_score_never_decreases(
            seed in any::<u64>(),
            frames in prop::collection::vec((1.0f32..40.0, any::<bool>()), 1..400)
        ) {
            let mut state = GameState::new(seed);
            start_game(&mut state);
            let mut last = state.score;
            for (delta_ms, press) in frames {
                if press {
                    flip(&mut state);
                }
                tick(&mut state, delta_ms);
                prop_assert!(state.score >= last);
                prop_assert!(state.player.vel.abs() <= state.tuning.max_velocity);
                last = state.score;
            }
        }
    }
}
