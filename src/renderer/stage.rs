//! Render stage: paints one frame of the simulation
//!
//! Draw order is obstacles, particles, then the stone so the player is never
//! hidden behind effects.

use glam::Vec2;

use super::{Color, Surface, palette};
use crate::sim::{GameState, GravityDir, Player};

const OBSTACLE_BORDER_WIDTH: f32 = 2.0;
/// Trail points fade from transparent (oldest) up to this alpha
const TRAIL_MAX_ALPHA: f32 = 0.5;
const HIGHLIGHT_OFFSET: Vec2 = Vec2::new(-5.0, -5.0);
const HIGHLIGHT_RADIUS: f32 = 5.0;
const HIGHLIGHT_ALPHA: f32 = 0.3;
const INDICATOR_LENGTH: f32 = 10.0;
const INDICATOR_WIDTH: f32 = 3.0;
const INDICATOR_HEAD_RADIUS: f32 = 3.0;

/// Render the current frame
pub fn render<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    surface.clear();
    draw_obstacles(state, surface);
    draw_particles(state, surface);
    draw_player(&state.player, surface);
}

fn draw_obstacles<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    for obs in state.obstacles.iter() {
        surface.fill_rect(obs.x, 0.0, obs.width, obs.top_height, palette::OBSTACLE_FILL);
        surface.fill_rect(
            obs.x,
            obs.bottom_y,
            obs.width,
            obs.bottom_height,
            palette::OBSTACLE_FILL,
        );
        surface.stroke_rect(
            obs.x,
            0.0,
            obs.width,
            obs.top_height,
            OBSTACLE_BORDER_WIDTH,
            palette::OBSTACLE_BORDER,
        );
        surface.stroke_rect(
            obs.x,
            obs.bottom_y,
            obs.width,
            obs.bottom_height,
            OBSTACLE_BORDER_WIDTH,
            palette::OBSTACLE_BORDER,
        );
    }
}

fn draw_particles<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    for p in state.particles.iter() {
        let color = palette::tint(p.tint).with_alpha(p.life_fraction());
        surface.fill_circle(p.pos, p.radius, color);
    }
}

fn draw_player<S: Surface + ?Sized>(player: &Player, surface: &mut S) {
    // Trail: older points smaller and fainter
    let n = player.trail.len() as f32;
    for (i, point) in player.trail.iter().enumerate() {
        let t = i as f32 / n;
        let radius = player.half_size() * t;
        if radius > 0.0 {
            surface.fill_circle(*point, radius, palette::STONE.with_alpha(t * TRAIL_MAX_ALPHA));
        }
    }

    surface.fill_circle(player.pos, player.half_size(), palette::STONE);
    surface.fill_circle(
        player.pos + HIGHLIGHT_OFFSET,
        HIGHLIGHT_RADIUS,
        Color::WHITE.with_alpha(HIGHLIGHT_ALPHA),
    );

    // Gravity indicator: a short stem with a round head on the "falling" side
    let color = palette::gravity_indicator(player.gravity_dir);
    let x = player.pos.x - INDICATOR_WIDTH / 2.0;
    let (stem_y, tip_y) = match player.gravity_dir {
        GravityDir::Down => (player.bottom(), player.bottom() + INDICATOR_LENGTH),
        GravityDir::Up => (
            player.top() - INDICATOR_LENGTH,
            player.top() - INDICATOR_LENGTH,
        ),
    };
    surface.fill_rect(x, stem_y, INDICATOR_WIDTH, INDICATOR_LENGTH, color);
    surface.fill_circle(
        Vec2::new(player.pos.x, tip_y),
        INDICATOR_HEAD_RADIUS,
        color,
    );
}
