use macroquad::prelude::*;

use crate::config;
use crate::world::WorldBounds;

/// Scrolling window onto the world. Follows a target with exponential
/// smoothing and never shows anything past the world edge.
pub struct WorldView {
    bounds: WorldBounds,
    viewport: Vec2,
    pub target: Vec2,
    pub smooth_center: Vec2,
}

impl WorldView {
    pub fn new(bounds: WorldBounds, viewport: Vec2) -> Self {
        let center = bounds.center();
        Self {
            bounds,
            viewport,
            target: center,
            smooth_center: center,
        }
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    /// Window resized.
    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.target = self.clamp_center(self.target);
        self.smooth_center = self.clamp_center(self.smooth_center);
    }

    pub fn look_at(&mut self, point: Vec2) {
        self.target = self.clamp_center(point);
    }

    /// Jump straight to the target, e.g. at the start of a level.
    pub fn snap(&mut self) {
        self.smooth_center = self.target;
    }

    pub fn update(&mut self, dt: f32) {
        let smooth = 1.0 - (-config::CAMERA_SMOOTH_SPEED * dt).exp();
        self.smooth_center = self.smooth_center.lerp(self.target, smooth);
    }

    /// World position (y up) to screen pixels (y down).
    pub fn project(&self, pos: Vec3) -> Vec2 {
        let half = self.viewport * 0.5;
        vec2(
            pos.x - self.smooth_center.x + half.x,
            half.y - (pos.y - self.smooth_center.y),
        )
    }

    pub fn unproject(&self, screen: Vec2) -> Vec2 {
        let half = self.viewport * 0.5;
        vec2(
            screen.x + self.smooth_center.x - half.x,
            self.smooth_center.y + half.y - screen.y,
        )
    }

    /// Visible world rectangle as (min, max).
    pub fn visible_rect(&self) -> (Vec2, Vec2) {
        let half = self.viewport * 0.5;
        (self.smooth_center - half, self.smooth_center + half)
    }

    pub fn is_visible(&self, pos: Vec3, margin: f32) -> bool {
        let (min, max) = self.visible_rect();
        pos.x >= min.x - margin
            && pos.x <= max.x + margin
            && pos.y >= min.y - margin
            && pos.y <= max.y + margin
    }

    fn clamp_center(&self, point: Vec2) -> Vec2 {
        let half = self.viewport * 0.5;
        let center = self.bounds.center();
        let axis = |p: f32, lo: f32, hi: f32, h: f32, c: f32| {
            if hi - lo <= 2.0 * h {
                c
            } else {
                p.clamp(lo + h, hi - h)
            }
        };
        vec2(
            axis(point.x, self.bounds.min.x, self.bounds.max.x, half.x, center.x),
            axis(point.y, self.bounds.min.y, self.bounds.max.y, half.y, center.y),
        )
    }
}
