use macroquad::prelude::*;
use noise::{Fbm, NoiseFn, Perlin};
use rand_chacha::ChaCha8Rng;
use ::rand::{Rng, SeedableRng};

use crate::camera::WorldView;
use crate::world::WorldBounds;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub brightness: f32,
    pub size: f32,
    pub twinkle_phase: f32,
}

/// Night-sky backdrop: at most one star per grid cell, clustered by fBm noise
/// so the sky has a milky band instead of uniform speckle.
pub struct StarField {
    pub stars: Vec<Star>,
}

impl StarField {
    pub fn generate(bounds: &WorldBounds, cell_size: f32, density: f32, seed: u64) -> Self {
        assert!(cell_size > 0.0, "star cell size must be positive");
        let cols = (bounds.width() / cell_size).ceil() as usize;
        let rows = (bounds.height() / cell_size).ceil() as usize;

        let fbm: Fbm<Perlin> = Fbm::new(seed as u32);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut stars = Vec::new();

        for row in 0..rows {
            for col in 0..cols {
                let nx = col as f64 / cols.max(1) as f64 * 3.0;
                let ny = row as f64 / rows.max(1) as f64 * 3.0;
                let cluster = ((fbm.get([nx, ny]) as f32 + 1.0) * 0.5).clamp(0.0, 1.0);

                if rng.gen::<f32>() >= density * (0.4 + 0.6 * cluster) {
                    continue;
                }

                let cell_min = bounds.min + vec2(col as f32, row as f32) * cell_size;
                let pos = (cell_min + vec2(rng.gen(), rng.gen()) * cell_size).min(bounds.max);
                stars.push(Star {
                    pos,
                    brightness: rng.gen_range(0.3..1.0),
                    size: if rng.gen_bool(0.1) { 1.5 } else { 1.0 },
                    twinkle_phase: rng.gen_range(0.0..std::f32::consts::TAU),
                });
            }
        }

        Self { stars }
    }

    pub fn draw(&self, view: &WorldView, time: f32) {
        for star in &self.stars {
            let world = star.pos.extend(0.0);
            if !view.is_visible(world, star.size) {
                continue;
            }
            let s = view.project(world);
            let twinkle = 0.75 + 0.25 * (time * 2.0 + star.twinkle_phase).sin();
            let a = star.brightness * twinkle;
            draw_rectangle(s.x, s.y, star.size, star.size, Color::new(0.9, 0.9, 1.0, a));
        }
    }
}
