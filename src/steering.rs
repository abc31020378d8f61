//! Point-mass steering after Reynolds' boids: a body that turns toward
//! whatever force it is given, limited by mass, force and speed.

use macroquad::prelude::*;
use ::rand::Rng;

use crate::oscillator::{Mode, Oscillator};
use crate::world::WorldBounds;

/// Lengths below this are treated as zero.
pub const EPSILON: f32 = 1e-5;

/// Fraction of the half extents that is free space; beyond it the body is
/// pushed back toward the centre.
const CONTAINMENT_THRESHOLD: f32 = 0.7;

/// Below this fraction of max speed the turning cone narrows.
const SLOW_SPEED_FRACTION: f32 = 0.2;

/// Normalize, but hand back the input untouched when it has no length.
pub fn safe_normalize(v: Vec3) -> Vec3 {
    let len = v.length();
    if len < EPSILON {
        v
    } else {
        v / len
    }
}

/// Shorten `v` to `max_len` if it is longer.
pub fn truncate_length(v: Vec3, max_len: f32) -> Vec3 {
    if v.length_squared() <= max_len * max_len {
        return v;
    }
    let len = v.length();
    if len < EPSILON {
        v
    } else {
        v * (max_len / len)
    }
}

/// Component of `v` along a unit basis vector.
pub fn parallel_component(v: Vec3, unit_basis: Vec3) -> Vec3 {
    unit_basis * v.dot(unit_basis)
}

/// Component of `v` perpendicular to a unit basis vector.
pub fn perpendicular_component(v: Vec3, unit_basis: Vec3) -> Vec3 {
    v - parallel_component(v, unit_basis)
}

#[derive(Clone, Debug)]
pub struct Boid {
    pub mass: f32,
    /// Bounding radius, also the inset used against the world edge.
    pub radius: f32,
    pub position: Vec3,
    /// Speed along `forward`. Velocity is always `forward * speed`.
    pub speed: f32,
    pub max_speed: f32,
    pub max_force: f32,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    wander_side: Oscillator,
}

impl Default for Boid {
    fn default() -> Self {
        Self {
            mass: 1.0,
            radius: 5.0,
            position: Vec3::ZERO,
            speed: 0.0,
            max_speed: 1.0,
            max_force: 0.1,
            forward: Vec3::Y,
            right: Vec3::X,
            up: Vec3::Z,
            wander_side: Oscillator::new(0.0, 1.0, -1.0, 1.0, Mode::Wander),
        }
    }
}

impl Boid {
    pub fn new(position: Vec3, radius: f32, max_speed: f32, max_force: f32) -> Self {
        Self {
            position,
            radius,
            max_speed,
            max_force,
            ..Default::default()
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Heading of `forward` in the xy plane, radians counter-clockwise from +x.
    pub fn heading(&self) -> f32 {
        self.forward.y.atan2(self.forward.x)
    }

    pub fn velocity(&self) -> Vec3 {
        self.forward * self.speed
    }

    /// Set speed and, unless the new velocity is ~zero, re-aim the local frame.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.speed = velocity.length();
        if self.speed > EPSILON {
            self.regenerate_local_space(velocity / self.speed);
        }
    }

    /// Rebuild right/up around a new unit forward, keeping the frame orthonormal.
    pub fn regenerate_local_space(&mut self, new_unit_forward: Vec3) {
        let right = new_unit_forward.cross(self.up);
        let right_len = right.length();
        if right_len < EPSILON {
            // forward parallel to up: no well-defined frame, keep the old one
            return;
        }
        self.forward = new_unit_forward;
        self.right = right / right_len;
        self.up = self.right.cross(self.forward);
    }

    pub fn predict_future_position(&self, prediction_time: f32) -> Vec3 {
        self.position + self.velocity() * prediction_time
    }

    /// Integrate one step of `steering` and keep the body inside `bounds`.
    pub fn apply_steering(&mut self, steering: Vec3, dt: f32, bounds: &WorldBounds) {
        let clipped_force = truncate_length(steering, self.max_force);

        let accel = if self.mass > EPSILON {
            clipped_force / self.mass
        } else {
            clipped_force
        };

        let mut new_velocity = self.velocity() + accel * dt;
        new_velocity = truncate_length(new_velocity, self.max_speed);

        self.position += new_velocity * dt;
        self.set_velocity(new_velocity);

        self.position = bounds.clamp_inset(self.position, self.radius);
    }

    /// Bend `steering` into the cone of half-angle `acos(cosine_of_cone_angle)`
    /// around `forward`, keeping its length.
    pub fn clip_steering(&self, steering: Vec3, cosine_of_cone_angle: f32, forward: Vec3) -> Vec3 {
        let steering_len = steering.length();
        if steering_len < EPSILON {
            return Vec3::ZERO;
        }
        let forward = safe_normalize(forward);
        if forward.length_squared() < EPSILON {
            return steering;
        }
        let cos_cone = cosine_of_cone_angle.clamp(-1.0, 1.0);

        let dotp = steering.dot(forward);
        if dotp / steering_len >= cos_cone {
            return steering;
        }

        let perp = steering - forward * dotp;
        let perp_len = perp.length();
        let unit_perp = if perp_len < EPSILON {
            // pointing straight back: any side will do
            vec3(forward.y, -forward.x, 0.0)
        } else {
            perp / perp_len
        };

        let c0 = forward * cos_cone;
        let c1 = unit_perp * (1.0 - cos_cone * cos_cone).sqrt();
        (c0 + c1) * steering_len
    }

    /// Narrow the turn a slow body can make so it pivots instead of skating.
    pub fn adjust_raw_steering_force(&self, steering: Vec3) -> Vec3 {
        let max_adjusted_speed = SLOW_SPEED_FRACTION * self.max_speed;

        if self.speed > max_adjusted_speed || steering.length_squared() < EPSILON {
            return steering;
        }

        let range = if max_adjusted_speed > EPSILON {
            self.speed / max_adjusted_speed
        } else {
            0.0
        };
        let cosine = lerp(1.0, -1.0, range.powi(10));
        self.clip_steering(steering, cosine, self.forward)
    }

    /// Lateral wander: ticks the side-to-side noise and returns `right * noise`.
    pub fn steer_for_wander<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> Vec3 {
        self.wander_side.update(dt, rng);
        self.right * self.wander_side.value()
    }

    pub fn steer_for_seek(&self, target: Vec3) -> Vec3 {
        let desired_velocity = truncate_length(target - self.position, self.max_speed);
        desired_velocity - self.velocity()
    }

    pub fn steer_for_flee(&self, target: Vec3) -> Vec3 {
        let desired_velocity = truncate_length(self.position - target, self.max_speed);
        desired_velocity - self.velocity()
    }

    /// Flee from where `other` will be one time unit from now.
    pub fn steer_to_evade(&self, other: &Boid) -> Vec3 {
        self.steer_for_flee(other.predict_future_position(1.0))
    }

    /// Zero while inside the central 70% of the world; past that, a pull
    /// toward the centre that ramps from 0 at the threshold to full at the edge.
    pub fn steer_inside_world_limits(&self, bounds: &WorldBounds) -> Vec3 {
        let half = bounds.half_extents();
        let center = bounds.center();

        let rel_x = axis_fraction(self.position.x - center.x, half.x);
        let rel_y = axis_fraction(self.position.y - center.y, half.y);

        if rel_x < CONTAINMENT_THRESHOLD && rel_y < CONTAINMENT_THRESHOLD {
            return Vec3::ZERO;
        }
        if self.max_speed < EPSILON {
            return Vec3::ZERO;
        }

        let scale = (rel_x.max(rel_y) - CONTAINMENT_THRESHOLD) / (1.0 - CONTAINMENT_THRESHOLD);
        self.steer_for_seek(center.extend(0.0)) * (scale / self.max_speed)
    }
}

fn axis_fraction(offset: f32, half_extent: f32) -> f32 {
    if half_extent < EPSILON {
        0.0
    } else {
        (offset / half_extent).abs()
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
