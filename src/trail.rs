use std::collections::VecDeque;

use macroquad::prelude::*;

use crate::config;

/// A fading after-image of the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ghost {
    pub position: Vec3,
    pub alpha: f32,
    pub scale: f32,
}

/// Position history drawn behind the player. Faster flight leaves brighter,
/// larger ghosts.
#[derive(Default)]
pub struct GhostTrail {
    ghosts: VecDeque<Ghost>,
    counter: u32,
}

impl GhostTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current position. Only every few samples become a ghost.
    pub fn sample(&mut self, position: Vec3, speed_fraction: f32) {
        self.counter += 1;
        if self.counter < config::GHOST_SAMPLE_INTERVAL {
            return;
        }
        self.counter = 0;
        let s = speed_fraction.clamp(0.0, 1.0);
        self.ghosts.push_back(Ghost {
            position,
            alpha: config::GHOST_ALPHA * s,
            scale: config::GHOST_SCALE * s,
        });
    }

    /// Fade every ghost and drop the invisible ones from the old end.
    pub fn update(&mut self, dt: f32) {
        for ghost in &mut self.ghosts {
            ghost.scale = (ghost.scale - dt * config::GHOST_SCALE_FADE).max(0.0);
            ghost.alpha = (ghost.alpha - dt * config::GHOST_ALPHA_FADE).max(0.0);
        }
        while let Some(head) = self.ghosts.front() {
            if head.scale > 0.0 && head.alpha > 0.0 {
                break;
            }
            self.ghosts.pop_front();
        }
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Ghost> {
        self.ghosts.iter()
    }

    pub fn len(&self) -> usize {
        self.ghosts.len()
    }

    pub fn clear(&mut self) {
        self.ghosts.clear();
        self.counter = 0;
    }
}
