//! Short-lived decorative particles

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, Tint};
use crate::tuning::Tuning;

/// All live particles
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Emit `count` particles at `pos` flying in random directions
    pub fn emit<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning, pos: Vec2, tint: Tint, count: u32) {
        let speed = tuning.particle_speed;
        self.particles.reserve(count as usize);
        for _ in 0..count {
            let vel = Vec2::new(
                rng.random_range(-speed..=speed),
                rng.random_range(-speed..=speed),
            );
            self.particles.push(Particle {
                pos,
                vel,
                life: tuning.particle_life,
                max_life: tuning.particle_life,
                radius: rng.random_range(tuning.particle_radius_min..=tuning.particle_radius_max),
                tint,
            });
        }
    }

    /// Emit one standard-sized burst
    pub fn burst<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning, pos: Vec2, tint: Tint) {
        self.emit(rng, tuning, pos, tint, tuning.particles_per_burst);
    }

    /// Game-over explosion: many overlapping bursts at the same spot
    pub fn explode<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning, pos: Vec2) {
        for _ in 0..tuning.explosion_bursts {
            self.burst(rng, tuning, pos, Tint::Explosion);
        }
    }

    /// Move, damp and age every particle; drop the dead ones
    pub fn tick(&mut self, friction: f32) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.vel *= friction;
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }
}
