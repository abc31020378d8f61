use macroquad::prelude::*;

use crate::camera::WorldView;

const MAX_PARTICLES: usize = 256;

#[derive(Clone, Copy)]
struct Particle {
    pos: Vec2,
    velocity: Vec2,
    color: Color,
    life: f32,
    alpha: f32,
    alpha_rate: f32,
    size: f32,
    size_rate: f32,
}

impl Particle {
    fn alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Capture puffs in world space. Dead particles are recycled before the pool
/// grows.
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
        }
    }

    /// Smoke drifting upward plus a few embers, where a creature was caught.
    pub fn emit_capture(&mut self, pos: Vec2) {
        for _ in 0..8 {
            self.spawn(Particle {
                pos,
                velocity: vec2(rand::gen_range(-4.0, 4.0), rand::gen_range(16.0, 48.0)),
                color: Color::new(0.85, 0.85, 0.9, 1.0),
                life: 1.0,
                alpha: 1.0,
                alpha_rate: -1.0,
                size: 2.0,
                size_rate: 2.0,
            });
        }
        for i in 0..4 {
            let angle = (i as f32 / 4.0) * std::f32::consts::TAU + rand::gen_range(-0.3, 0.3);
            self.spawn(Particle {
                pos,
                velocity: Vec2::from_angle(angle) * rand::gen_range(12.0, 24.0),
                color: Color::new(1.0, 0.7, 0.2, 1.0),
                life: 0.5,
                alpha: 1.0,
                alpha_rate: -2.0,
                size: 1.5,
                size_rate: -1.0,
            });
        }
    }

    fn spawn(&mut self, particle: Particle) {
        if let Some(slot) = self.particles.iter_mut().find(|p| !p.alive()) {
            *slot = particle;
        } else if self.particles.len() < MAX_PARTICLES {
            self.particles.push(particle);
        } else if let Some(slot) = self
            .particles
            .iter_mut()
            .min_by(|a, b| a.life.total_cmp(&b.life))
        {
            // Pool full: overwrite the one closest to dying.
            *slot = particle;
        }
    }

    pub fn update(&mut self, dt: f32) {
        for p in self.particles.iter_mut().filter(|p| p.alive()) {
            p.life -= dt;
            p.pos += p.velocity * dt;
            p.alpha = (p.alpha + p.alpha_rate * dt).max(0.0);
            p.size = (p.size + p.size_rate * dt).max(0.0);
        }
    }

    pub fn draw(&self, view: &WorldView) {
        for p in self.particles.iter().filter(|p| p.alive()) {
            let world = p.pos.extend(0.0);
            if !view.is_visible(world, p.size) {
                continue;
            }
            let s = view.project(world);
            let color = Color::new(p.color.r, p.color.g, p.color.b, p.alpha.clamp(0.0, 1.0));
            draw_circle(s.x, s.y, p.size, color);
        }
    }

    pub fn count(&self) -> usize {
        self.particles.iter().filter(|p| p.alive()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_burst_fades_out_and_pool_is_reused() {
        let mut ps = ParticleSystem::new();
        ps.emit_capture(Vec2::ZERO);
        assert_eq!(ps.count(), 12);

        ps.update(0.6);
        assert_eq!(ps.count(), 8, "embers die first");
        ps.update(0.6);
        assert_eq!(ps.count(), 0);

        ps.emit_capture(Vec2::ZERO);
        assert_eq!(ps.particles.len(), 12);
    }

    #[test]
    fn smoke_rises() {
        let mut ps = ParticleSystem::new();
        ps.emit_capture(vec2(5.0, 5.0));
        ps.update(0.25);
        assert!(ps.particles[..8].iter().all(|p| p.pos.y > 5.0));
    }

    #[test]
    fn pool_never_exceeds_cap() {
        let mut ps = ParticleSystem::new();
        for _ in 0..100 {
            ps.emit_capture(Vec2::ZERO);
        }
        assert_eq!(ps.particles.len(), MAX_PARTICLES);
    }
}
