use macroquad::prelude::*;

/// Axis-aligned play area in world units (y up). Entities never leave it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl WorldBounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        assert!(min.x <= max.x && min.y <= max.y, "world bounds inverted");
        Self { min, max }
    }

    /// Bounds of the given size centred on the origin.
    pub fn centered(width: f32, height: f32) -> Self {
        let half = vec2(width * 0.5, height * 0.5);
        Self::new(-half, half)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Point at fractional coordinates `(u, v)` in [0, 1]².
    pub fn lerp_point(&self, u: f32, v: f32) -> Vec2 {
        vec2(
            self.min.x + (self.max.x - self.min.x) * u,
            self.min.y + (self.max.y - self.min.y) * v,
        )
    }

    pub fn contains_inset(&self, pos: Vec3, inset: f32) -> bool {
        pos.x >= self.min.x + inset
            && pos.x <= self.max.x - inset
            && pos.y >= self.min.y + inset
            && pos.y <= self.max.y - inset
    }

    /// Clamp x/y into the bounds shrunk by `inset` on every side. If the inset
    /// swallows an axis entirely the position snaps to the centre of that axis.
    pub fn clamp_inset(&self, mut pos: Vec3, inset: f32) -> Vec3 {
        pos.x = clamp_axis(pos.x, self.min.x + inset, self.max.x - inset);
        pos.y = clamp_axis(pos.y, self.min.y + inset, self.max.y - inset);
        pos
    }
}

fn clamp_axis(v: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        (lo + hi) * 0.5
    } else {
        v.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_inset_pulls_outside_points_in() {
        let bounds = WorldBounds::centered(200.0, 100.0);
        let p = bounds.clamp_inset(vec3(500.0, -80.0, 3.0), 5.0);
        assert_eq!(p, vec3(95.0, -45.0, 3.0));
        assert!(bounds.contains_inset(p, 5.0));
    }

    #[test]
    fn oversized_inset_snaps_to_center() {
        let bounds = WorldBounds::new(vec2(0.0, 0.0), vec2(10.0, 10.0));
        let p = bounds.clamp_inset(vec3(1.0, 9.0, 0.0), 20.0);
        assert_eq!(p.x, 5.0);
        assert_eq!(p.y, 5.0);
    }

    #[test]
    fn lerp_point_spans_bounds() {
        let bounds = WorldBounds::centered(100.0, 50.0);
        assert_eq!(bounds.lerp_point(0.0, 0.0), bounds.min);
        assert_eq!(bounds.lerp_point(1.0, 1.0), bounds.max);
        assert_eq!(bounds.lerp_point(0.5, 0.5), bounds.center());
    }
}
