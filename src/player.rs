use macroquad::prelude::*;
use ::rand::RngCore;

use crate::config;
use crate::creature::SteeringPolicy;
use crate::oscillator::{AnimCycle, Curve, Mode, Oscillator};
use crate::sonar::Sonar;
use crate::steering::{truncate_length, Boid};
use crate::trail::GhostTrail;
use crate::world::WorldBounds;

/// Steering driven directly by the player's stick.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputPolicy {
    pub input: Vec2,
}

impl SteeringPolicy for InputPolicy {
    fn compute_steering_force(
        &mut self,
        boid: &mut Boid,
        _dt: f32,
        _bounds: &WorldBounds,
        _rng: &mut dyn RngCore,
    ) -> Vec3 {
        let stick = truncate_length(self.input.extend(0.0), 1.0);
        boid.adjust_raw_steering_force(stick * boid.max_force)
    }
}

/// One frame of sampled controls. `steer` is in world axes (y up).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerInput {
    pub steer: Vec2,
    pub sonar: bool,
}

/// What happened to the player this frame, for sound and effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerTick {
    pub flapped: bool,
    pub sonar_fired: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureEvent {
    pub position: Vec3,
    pub level_score: u32,
}

pub struct Player {
    pub boid: Boid,
    steering: InputPolicy,
    pub score: u32,
    pub capture_glow: Oscillator,
    pub wings: AnimCycle,
    pub trail: GhostTrail,
    pub sonar: Sonar,
}

impl Player {
    pub fn new(position: Vec3) -> Self {
        let boid = Boid::new(
            position,
            config::PLAYER_RADIUS,
            config::PLAYER_MAX_SPEED,
            config::PLAYER_MAX_FORCE,
        );
        let wing_rate = Oscillator::new(
            config::PLAYER_WING_RATE_MIN,
            1.0,
            config::PLAYER_WING_RATE_MIN,
            config::PLAYER_WING_RATE_MAX,
            Mode::Oscillate,
        );
        let mut capture_glow = Oscillator::new(0.0, 1.0, 0.0, 1.0, Mode::Stopped);
        capture_glow.set_curve(Curve::SmoothStep);
        Self {
            boid,
            steering: InputPolicy::default(),
            score: 0,
            capture_glow,
            wings: AnimCycle::new(wing_rate),
            trail: GhostTrail::new(),
            sonar: Sonar::new(),
        }
    }

    /// Reset per-level state. Position and heading carry over.
    pub fn begin_level(&mut self) {
        self.score = 0;
        self.trail.clear();
    }

    pub fn update(
        &mut self,
        dt: f32,
        input: PlayerInput,
        bounds: &WorldBounds,
        rng: &mut dyn RngCore,
    ) -> PlayerTick {
        let mut tick = PlayerTick::default();

        if input.sonar {
            tick.sonar_fired = self.sonar.fire(self.boid.position, self.boid.forward());
        }
        self.trail.update(dt);
        self.sonar.update(dt, bounds);

        tick.flapped = self.wings.update(dt, rng);
        self.capture_glow.update(dt, rng);

        self.boid.speed *= config::PLAYER_SPEED_DAMPING;
        self.steering.input = input.steer;
        let steer = self
            .steering
            .compute_steering_force(&mut self.boid, dt, bounds, rng);
        self.boid.apply_steering(steer, dt, bounds);

        let speed_fraction = if self.boid.max_speed > 0.0 {
            self.boid.speed / self.boid.max_speed
        } else {
            0.0
        };
        self.trail.sample(self.boid.position, speed_fraction);

        tick
    }

    /// True if `position` is inside the player's radius and ahead of the bat.
    pub fn can_capture(&self, position: Vec3) -> bool {
        let offset = position - self.boid.position;
        let r = self.boid.radius;
        offset.length_squared() < r * r && offset.dot(self.boid.forward()) > 0.0
    }

    /// Mark a capture: bump the level score and light up the glow.
    pub fn capture(&mut self, position: Vec3) -> CaptureEvent {
        self.score += 1;
        self.capture_glow.set_mode(Mode::Ring);
        CaptureEvent {
            position,
            level_score: self.score,
        }
    }

    pub fn wing_frame(&self, frame_count: usize) -> usize {
        self.wings.frame(frame_count)
    }
}
