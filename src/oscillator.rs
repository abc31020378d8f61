use ::rand::Rng;

/// How an oscillator advances each update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Frozen at the current value.
    Stopped,
    /// Run toward a bound and stop there.
    Once,
    /// Wrap to the opposite bound (sawtooth).
    Cycle,
    /// Bounce between the bounds forever.
    Oscillate,
    /// Bounce until two bounds have been hit, then stop.
    Ring,
    /// Random walk clamped to the bounds. Speed is ignored.
    Wander,
}

/// Output curve applied by [`Oscillator::value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Curve {
    Linear,
    /// Slow start, fast finish.
    Squared,
    /// Ease in and out.
    SmoothStep,
}

/// Rate at which an oscillator moves. A driven speed is itself an oscillator,
/// which gives compound motion (e.g. a wing beat that speeds up and slows down).
#[derive(Clone, Debug)]
pub enum Speed {
    Constant(f32),
    Driven(Box<Oscillator>),
}

impl Speed {
    fn value(&self) -> f32 {
        match self {
            Speed::Constant(v) => *v,
            Speed::Driven(inner) => inner.value(),
        }
    }
}

impl From<f32> for Speed {
    fn from(v: f32) -> Self {
        Speed::Constant(v)
    }
}

impl From<Oscillator> for Speed {
    fn from(o: Oscillator) -> Self {
        Speed::Driven(Box::new(o))
    }
}

/// Bounded scalar driven by time. Used for wander noise, fades, flicker and
/// sprite animation.
#[derive(Clone, Debug)]
pub struct Oscillator {
    pos: f32,
    speed: Speed,
    // +1 or -1; flipped on each bounce so a driven speed keeps driving.
    direction: f32,
    min: f32,
    max: f32,
    mode: Mode,
    curve: Curve,
    ring_counter: i32,
}

impl Oscillator {
    /// Panics if `min > max`.
    pub fn new(initial: f32, speed: impl Into<Speed>, min: f32, max: f32, mode: Mode) -> Self {
        assert!(min <= max, "oscillator bounds inverted: [{min}, {max}]");
        let mut osc = Self {
            pos: initial.clamp(min, max),
            speed: speed.into(),
            direction: 1.0,
            min,
            max,
            mode,
            curve: Curve::Linear,
            ring_counter: 0,
        };
        osc.set_mode(mode);
        osc
    }

    /// A value that never moves.
    pub fn constant(value: f32) -> Self {
        Self::new(value, 0.0, value, value, Mode::Stopped)
    }

    /// Switch mode. The ring counter is primed from the current direction of
    /// travel: moving backward starts at -1, because the first update will
    /// immediately bounce off `min` and that bounce must not count.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.ring_counter = if self.velocity() < 0.0 { -1 } else { 0 };
    }

    /// Panics if a non-linear curve is requested on bounds other than [0, 1].
    pub fn set_curve(&mut self, curve: Curve) {
        if curve != Curve::Linear {
            assert!(
                self.min == 0.0 && self.max == 1.0,
                "curve {curve:?} needs bounds [0, 1], got [{}, {}]",
                self.min,
                self.max
            );
        }
        self.curve = curve;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn is_stopped(&self) -> bool {
        self.mode == Mode::Stopped
    }

    /// Position before the output curve is applied.
    pub fn raw(&self) -> f32 {
        self.pos
    }

    /// Current output, with the curve applied.
    pub fn value(&self) -> f32 {
        match self.curve {
            Curve::Linear => self.pos,
            Curve::Squared => self.pos * self.pos,
            Curve::SmoothStep => {
                let x = self.pos.clamp(0.0, 1.0);
                x * x * (3.0 - 2.0 * x)
            }
        }
    }

    /// Signed rate of travel, including bounce direction.
    pub fn velocity(&self) -> f32 {
        self.speed.value() * self.direction
    }

    /// Advance one time step.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        if let Speed::Driven(inner) = &mut self.speed {
            inner.update(dt, rng);
        }

        match self.mode {
            Mode::Stopped => {}
            Mode::Once => {
                let v = self.velocity();
                self.pos += v * dt;
                if self.hit_min(v) {
                    self.pos = self.min;
                    self.mode = Mode::Stopped;
                } else if self.hit_max(v) {
                    self.pos = self.max;
                    self.mode = Mode::Stopped;
                }
            }
            Mode::Cycle => {
                self.pos += self.velocity() * dt;
                if self.pos < self.min || self.pos > self.max {
                    let range = self.max - self.min;
                    self.pos = if range > 0.0 {
                        (self.min + (self.pos - self.min).rem_euclid(range)).min(self.max)
                    } else {
                        self.min
                    };
                }
            }
            Mode::Oscillate => {
                self.bounce(dt);
            }
            Mode::Ring => {
                if self.bounce(dt) {
                    self.ring_counter += 1;
                }
                if self.ring_counter >= 2 {
                    self.mode = Mode::Stopped;
                }
            }
            Mode::Wander => {
                let half_range = (self.max - self.min) * 0.5;
                let step = (rng.gen::<f32>() * 2.0 - 1.0) * dt * half_range;
                self.pos = (self.pos + step).clamp(self.min, self.max);
            }
        }
    }

    // Move and reflect off whichever bound was reached. Returns true on a bounce.
    fn bounce(&mut self, dt: f32) -> bool {
        let v = self.velocity();
        self.pos += v * dt;
        if self.hit_min(v) {
            self.pos = self.min;
            self.direction = -self.direction;
            true
        } else if self.hit_max(v) {
            self.pos = self.max;
            self.direction = -self.direction;
            true
        } else {
            false
        }
    }

    fn hit_min(&self, v: f32) -> bool {
        self.pos < self.min || (v < 0.0 && self.pos <= self.min)
    }

    fn hit_max(&self, v: f32) -> bool {
        self.pos > self.max || (v > 0.0 && self.pos >= self.max)
    }
}

/// Sprite-sheet clock: a cycling [0, 1] phase mapped to a frame index.
#[derive(Clone, Debug)]
pub struct AnimCycle {
    phase: Oscillator,
}

impl AnimCycle {
    pub fn new(speed: Oscillator) -> Self {
        Self {
            phase: Oscillator::new(0.0, speed, 0.0, 1.0, Mode::Cycle),
        }
    }

    /// Advance the animation. Returns true when the phase wrapped around,
    /// i.e. one full loop of frames just completed.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> bool {
        let last = self.phase.value();
        self.phase.update(dt, rng);
        self.phase.value() < last
    }

    /// Frame to show out of `frame_count` loaded frames. Always a valid index
    /// (0 when nothing is loaded).
    pub fn frame(&self, frame_count: usize) -> usize {
        if frame_count == 0 {
            return 0;
        }
        let idx = (self.phase.value() * frame_count as f32) as usize;
        idx.min(frame_count - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    use ::rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn in_bounds(o: &Oscillator) -> bool {
        let (min, max) = o.bounds();
        o.raw() >= min && o.raw() <= max
    }

    #[test]
    fn bounded_modes_never_leave_range() {
        let mut rng = rng();
        for mode in [Mode::Once, Mode::Cycle, Mode::Oscillate, Mode::Ring] {
            for dt in [0.01, 0.3, 2.5, 40.0] {
                let mut osc = Oscillator::new(0.2, 1.7, -1.0, 1.0, mode);
                for _ in 0..200 {
                    osc.update(dt, &mut rng);
                    assert!(in_bounds(&osc), "{mode:?} dt={dt} left range: {}", osc.raw());
                }
            }
        }
    }

    #[test]
    fn oscillate_returns_to_min_after_full_period() {
        let mut rng = rng();
        let mut osc = Oscillator::new(0.0, 1.0, 0.0, 1.0, Mode::Oscillate);
        let dt = 1.0 / 64.0;
        // 2 * (max - min) / speed seconds
        for _ in 0..128 {
            osc.update(dt, &mut rng);
        }
        assert_eq!(osc.raw(), 0.0);
        assert!(osc.velocity() > 0.0);
        assert_eq!(osc.mode(), Mode::Oscillate);
    }

    #[test]
    fn ring_stops_after_two_bounds() {
        let mut rng = rng();
        let mut osc = Oscillator::new(0.0, 1.0, 0.0, 1.0, Mode::Ring);
        for _ in 0..4 {
            osc.update(0.5, &mut rng);
        }
        assert!(osc.is_stopped());
        assert!(osc.raw() == 0.0 || osc.raw() == 1.0);

        let frozen = osc.raw();
        for _ in 0..10 {
            osc.update(0.5, &mut rng);
        }
        assert_eq!(osc.raw(), frozen);
    }

    #[test]
    fn ring_with_small_steps_counts_exactly_two_crossings() {
        let mut rng = rng();
        let mut osc = Oscillator::new(0.0, 1.0, 0.0, 1.0, Mode::Ring);
        let dt = 1.0 / 32.0;
        let mut steps = 0;
        while !osc.is_stopped() {
            osc.update(dt, &mut rng);
            steps += 1;
            assert!(steps < 1000);
        }
        // up to max, back down to min
        assert_eq!(steps, 64);
        assert_eq!(osc.raw(), 0.0);
    }

    #[test]
    fn ring_primed_backward_ignores_initial_bounce() {
        let mut rng = rng();
        let mut osc = Oscillator::new(0.0, -1.0, 0.0, 1.0, Mode::Stopped);
        osc.set_mode(Mode::Ring);
        let dt = 1.0 / 32.0;
        let mut steps = 0;
        while !osc.is_stopped() {
            osc.update(dt, &mut rng);
            steps += 1;
            assert!(steps < 1000);
        }
        // Bounce off min immediately (not counted), then max, then min.
        assert_eq!(steps, 65);
        assert_eq!(osc.raw(), 0.0);
    }

    #[test]
    fn ring_retriggers_from_stopped() {
        let mut rng = rng();
        let mut glow = Oscillator::new(0.0, 1.0, 0.0, 1.0, Mode::Stopped);
        glow.update(0.25, &mut rng);
        assert_eq!(glow.value(), 0.0);

        glow.set_mode(Mode::Ring);
        glow.update(0.25, &mut rng);
        assert!(glow.value() > 0.0);
    }

    #[test]
    fn once_stops_at_bound() {
        let mut rng = rng();
        let mut osc = Oscillator::new(0.5, -2.0, 0.0, 1.0, Mode::Once);
        osc.update(1.0, &mut rng);
        assert_eq!(osc.raw(), 0.0);
        assert!(osc.is_stopped());
    }

    #[test]
    fn cycle_wraps_like_a_sawtooth() {
        let mut rng = rng();
        let mut osc = Oscillator::new(0.75, 1.0, 0.0, 1.0, Mode::Cycle);
        osc.update(0.5, &mut rng);
        assert!((osc.raw() - 0.25).abs() < 1e-6);
        assert_eq!(osc.mode(), Mode::Cycle);
    }

    #[test]
    fn wander_stays_in_range_for_any_step() {
        let mut rng = rng();
        let mut osc = Oscillator::new(0.0, 1.0, -1.0, 1.0, Mode::Wander);
        for dt in [0.016, 1.0, 100.0] {
            for _ in 0..500 {
                osc.update(dt, &mut rng);
                assert!(in_bounds(&osc));
            }
        }
    }

    #[test]
    fn driven_speed_is_ticked_before_use() {
        let mut rng = rng();
        let speed = Oscillator::new(1.0, 1.0, 1.0, 3.0, Mode::Once);
        let mut osc = Oscillator::new(0.0, speed, 0.0, 100.0, Mode::Once);
        osc.update(1.0, &mut rng);
        // speed advanced to 2.0 first, then drove the outer value
        assert!((osc.raw() - 2.0).abs() < 1e-6);
    }

    fn inner_speed(o: &Oscillator) -> f32 {
        match &o.speed {
            Speed::Driven(inner) => inner.raw(),
            Speed::Constant(v) => *v,
        }
    }

    #[test]
    fn driven_oscillate_keeps_bouncing_with_varying_speed() {
        let mut rng = rng();
        let rate = Oscillator::new(1.0, 1.0, 1.0, 2.0, Mode::Oscillate);
        let mut osc = Oscillator::new(0.0, rate, 0.0, 1.0, Mode::Oscillate);

        let mut bounces = 0;
        let mut last_sign = osc.velocity().signum();
        let (mut slowest, mut fastest) = (f32::MAX, f32::MIN);
        for _ in 0..2000 {
            osc.update(0.01, &mut rng);
            assert!(in_bounds(&osc), "left range: {}", osc.raw());
            if osc.raw() == 1.0 {
                assert!(osc.velocity() < 0.0);
            }
            if osc.raw() == 0.0 {
                assert!(osc.velocity() > 0.0);
            }
            let sign = osc.velocity().signum();
            if sign != last_sign {
                bounces += 1;
                last_sign = sign;
            }
            slowest = slowest.min(inner_speed(&osc));
            fastest = fastest.max(inner_speed(&osc));
        }
        assert!(bounces >= 20, "only {bounces} bounces");
        assert_eq!(osc.mode(), Mode::Oscillate);
        assert!(slowest < 1.1 && fastest > 1.9, "rate stuck in [{slowest}, {fastest}]");
    }

    #[test]
    fn driven_ring_stops_after_two_bounds() {
        let mut rng = rng();
        let rate = Oscillator::new(1.0, 1.0, 1.0, 2.0, Mode::Oscillate);
        let mut osc = Oscillator::new(0.0, rate, 0.0, 1.0, Mode::Ring);
        let mut steps = 0;
        while !osc.is_stopped() {
            osc.update(0.01, &mut rng);
            assert!(in_bounds(&osc));
            steps += 1;
            assert!(steps < 1000);
        }
        assert_eq!(osc.raw(), 0.0);
    }

    #[test]
    fn curves_shape_the_output() {
        let mut osc = Oscillator::new(0.5, 0.0, 0.0, 1.0, Mode::Stopped);
        assert_eq!(osc.value(), 0.5);
        osc.set_curve(Curve::Squared);
        assert_eq!(osc.value(), 0.25);
        osc.set_curve(Curve::SmoothStep);
        assert_eq!(osc.value(), 0.5);
        assert_eq!(osc.raw(), 0.5);
    }

    #[test]
    #[should_panic]
    fn inverted_bounds_are_rejected() {
        let _ = Oscillator::new(0.0, 1.0, 1.0, -1.0, Mode::Oscillate);
    }

    #[test]
    #[should_panic]
    fn curve_outside_unit_range_is_rejected() {
        let mut osc = Oscillator::new(0.0, 1.0, -2.0, 2.0, Mode::Oscillate);
        osc.set_curve(Curve::Squared);
    }

    #[test]
    fn constant_never_moves() {
        let mut rng = rng();
        let mut osc = Oscillator::constant(3.5);
        osc.update(10.0, &mut rng);
        assert_eq!(osc.value(), 3.5);
    }

    #[test]
    fn anim_frame_is_clamped_and_reports_wrap() {
        let mut rng = rng();
        let mut anim = AnimCycle::new(Oscillator::constant(1.0));
        assert_eq!(anim.frame(0), 0);

        assert!(!anim.update(0.6, &mut rng));
        assert_eq!(anim.frame(4), 2);
        assert!(anim.update(0.6, &mut rng));
        assert!(anim.frame(4) < 4);
    }
}
