use macroquad::prelude::*;
use ::rand::{Rng, RngCore};

use crate::config;
use crate::oscillator::{AnimCycle, Mode, Oscillator};
use crate::steering::Boid;
use crate::world::WorldBounds;

/// Decides how a body wants to move this frame.
pub trait SteeringPolicy {
    fn compute_steering_force(
        &mut self,
        boid: &mut Boid,
        dt: f32,
        bounds: &WorldBounds,
        rng: &mut dyn RngCore,
    ) -> Vec3;
}

/// Cruise forward, drift side to side, and turn back near the edge.
#[derive(Clone, Copy, Debug)]
pub struct WanderPolicy {
    pub wander_gain: f32,
    pub containment_gain: f32,
}

impl SteeringPolicy for WanderPolicy {
    fn compute_steering_force(
        &mut self,
        boid: &mut Boid,
        dt: f32,
        bounds: &WorldBounds,
        rng: &mut dyn RngCore,
    ) -> Vec3 {
        let wander = boid.steer_for_wander(dt, rng);
        let containment = boid.steer_inside_world_limits(bounds);
        let steer = (boid.forward() + wander * self.wander_gain + containment * self.containment_gain)
            * boid.max_speed;
        boid.adjust_raw_steering_force(steer)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreatureKind {
    Firefly,
    Butterfly,
}

impl CreatureKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Firefly => "firefly",
            Self::Butterfly => "butterfly",
        }
    }
}

/// A capturable critter: a boid, the policy steering it, and its visual clocks.
pub struct Creature {
    pub kind: CreatureKind,
    pub boid: Boid,
    policy: Box<dyn SteeringPolicy>,
    pub alpha: Oscillator,
    pub radius_offset: Oscillator,
    /// Wing animation; fireflies have none.
    pub wings: Option<AnimCycle>,
}

impl Creature {
    pub fn new(kind: CreatureKind, boid: Boid, policy: Box<dyn SteeringPolicy>) -> Self {
        Self {
            kind,
            boid,
            policy,
            alpha: Oscillator::constant(1.0),
            radius_offset: Oscillator::constant(0.0),
            wings: None,
        }
    }

    pub fn spawn_firefly<R: Rng + ?Sized>(bounds: &WorldBounds, rng: &mut R) -> Self {
        let max_speed = lerp(config::FIREFLY_MIN_SPEED, config::FIREFLY_MAX_SPEED, rng.gen());
        let boid = spawn_body(
            bounds,
            config::FIREFLY_RADIUS,
            max_speed,
            config::FIREFLY_MAX_FORCE,
            rng,
        );
        let policy = WanderPolicy {
            wander_gain: config::FIREFLY_WANDER_GAIN,
            containment_gain: config::FIREFLY_CONTAINMENT_GAIN,
        };
        let mut creature = Self::new(CreatureKind::Firefly, boid, Box::new(policy));
        creature.alpha = flicker_alpha(rng);
        creature.radius_offset = radius_flicker(rng);
        creature
    }

    pub fn spawn_butterfly<R: Rng + ?Sized>(bounds: &WorldBounds, rng: &mut R) -> Self {
        let boid = spawn_body(
            bounds,
            config::BUTTERFLY_RADIUS,
            config::BUTTERFLY_MAX_SPEED,
            config::BUTTERFLY_MAX_FORCE,
            rng,
        );
        let policy = WanderPolicy {
            wander_gain: config::BUTTERFLY_WANDER_GAIN,
            containment_gain: config::BUTTERFLY_CONTAINMENT_GAIN,
        };
        let mut creature = Self::new(CreatureKind::Butterfly, boid, Box::new(policy));
        creature.alpha = flicker_alpha(rng);
        creature.radius_offset = radius_flicker(rng);
        let wing_rate = Oscillator::new(
            config::BUTTERFLY_WING_RATE_MIN,
            1.0,
            config::BUTTERFLY_WING_RATE_MIN,
            config::BUTTERFLY_WING_RATE_MAX,
            Mode::Oscillate,
        );
        creature.wings = Some(AnimCycle::new(wing_rate));
        creature
    }

    /// Steer, integrate, and advance the visual clocks.
    pub fn update(&mut self, dt: f32, bounds: &WorldBounds, rng: &mut dyn RngCore) {
        let steer = self.policy.compute_steering_force(&mut self.boid, dt, bounds, rng);
        self.boid.apply_steering(steer, dt, bounds);

        self.alpha.update(dt, rng);
        self.radius_offset.update(dt, rng);
        if let Some(wings) = &mut self.wings {
            wings.update(dt, rng);
        }
    }

    /// Draw radius with the flicker offset applied.
    pub fn flicker_radius(&self) -> f32 {
        self.boid.radius + self.radius_offset.value() * 0.5
    }

    pub fn wing_frame(&self, frame_count: usize) -> usize {
        self.wings.as_ref().map_or(0, |w| w.frame(frame_count))
    }
}

fn spawn_body<R: Rng + ?Sized>(
    bounds: &WorldBounds,
    radius: f32,
    max_speed: f32,
    max_force: f32,
    rng: &mut R,
) -> Boid {
    let pos = bounds.lerp_point(rng.gen(), rng.gen());
    let mut boid = Boid::new(pos.extend(0.0), radius, max_speed, max_force);
    let speed = lerp(max_speed * 0.5, max_speed, rng.gen());
    let angle = rng.gen::<f32>() * std::f32::consts::TAU;
    boid.set_velocity(Vec2::from_angle(angle).extend(0.0) * speed);
    boid.position = bounds.clamp_inset(boid.position, radius);
    boid
}

fn flicker_alpha<R: Rng + ?Sized>(rng: &mut R) -> Oscillator {
    let speed = lerp(
        config::FIREFLY_FLICKER_SPEED_MIN,
        config::FIREFLY_FLICKER_SPEED_MAX,
        rng.gen(),
    );
    Oscillator::new(rng.gen(), speed, 0.0, 1.0, Mode::Oscillate)
}

fn radius_flicker<R: Rng + ?Sized>(rng: &mut R) -> Oscillator {
    let amp = config::RADIUS_FLICKER_AMPLITUDE;
    Oscillator::new(
        rng.gen_range(-amp..amp),
        config::RADIUS_FLICKER_SPEED,
        -amp,
        amp,
        Mode::Oscillate,
    )
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    use ::rand::SeedableRng;

    fn bounds() -> WorldBounds {
        WorldBounds::centered(config::WORLD_WIDTH, config::WORLD_HEIGHT)
    }

    #[test]
    fn spawned_fireflies_start_inside_world_with_valid_speed() {
        let world = bounds();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let f = Creature::spawn_firefly(&world, &mut rng);
            assert!(world.contains_inset(f.boid.position, f.boid.radius));
            assert!(f.boid.max_speed >= config::FIREFLY_MIN_SPEED);
            assert!(f.boid.max_speed <= config::FIREFLY_MAX_SPEED);
            assert!(f.boid.speed >= f.boid.max_speed * 0.5 - 1e-4);
            assert!(f.boid.speed <= f.boid.max_speed + 1e-4);
            assert!(f.wings.is_none());
        }
    }

    #[test]
    fn creatures_stay_inside_world_over_long_runs() {
        let world = bounds();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut creatures = vec![
            Creature::spawn_firefly(&world, &mut rng),
            Creature::spawn_butterfly(&world, &mut rng),
        ];
        for _ in 0..3000 {
            for c in &mut creatures {
                c.update(1.0 / 60.0, &world, &mut rng);
                assert!(world.contains_inset(c.boid.position, c.boid.radius));
                assert!(c.boid.speed <= c.boid.max_speed + 1e-3);
                let (lo, hi) = c.alpha.bounds();
                assert!(c.alpha.value() >= lo && c.alpha.value() <= hi);
            }
        }
    }

    #[test]
    fn butterfly_wings_cycle_through_frames() {
        let world = bounds();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut b = Creature::spawn_butterfly(&world, &mut rng);
        let mut seen = [false; 4];
        for _ in 0..120 {
            b.update(1.0 / 60.0, &world, &mut rng);
            seen[b.wing_frame(4)] = true;
        }
        assert!(seen.iter().all(|s| *s), "frames seen: {seen:?}");
    }

    #[test]
    fn wander_policy_points_roughly_forward_when_centered() {
        let world = bounds();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut boid = Boid::new(Vec3::ZERO, 4.0, 20.0, 10.0);
        boid.set_velocity(vec3(0.0, 20.0, 0.0));
        let mut policy = WanderPolicy {
            wander_gain: 0.0,
            containment_gain: 0.0,
        };
        let force = policy.compute_steering_force(&mut boid, 0.016, &world, &mut rng);
        assert!((force - vec3(0.0, 20.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn flicker_radius_stays_within_amplitude() {
        let world = bounds();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut f = Creature::spawn_firefly(&world, &mut rng);
        for _ in 0..200 {
            f.update(0.05, &world, &mut rng);
            let r = f.flicker_radius();
            assert!(r >= f.boid.radius - 1.0 - 1e-4 && r <= f.boid.radius + 1.0 + 1e-4);
        }
    }
}
