use macroquad::prelude::*;

use crate::config;
use crate::steering::safe_normalize;
use crate::world::WorldBounds;

#[derive(Clone, Copy, Debug)]
pub struct Ping {
    pub position: Vec3,
    pub velocity: Vec3,
    pub alive: bool,
}

/// Echo-location pings fired by the player. Purely cosmetic: pings travel in
/// a straight line and vanish at the world edge.
#[derive(Default)]
pub struct Sonar {
    pings: Vec<Ping>,
    cooldown: f32,
}

impl Sonar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launch a ping along `direction` unless still cooling down.
    /// Returns true if a ping was fired.
    pub fn fire(&mut self, position: Vec3, direction: Vec3) -> bool {
        if self.cooldown > 0.0 {
            return false;
        }
        let velocity = safe_normalize(direction) * config::SONAR_PING_SPEED;

        // Reuse a dead ping before growing the pool.
        let ping = Ping {
            position,
            velocity,
            alive: true,
        };
        match self.pings.iter_mut().find(|p| !p.alive) {
            Some(slot) => *slot = ping,
            None => self.pings.push(ping),
        }
        self.cooldown = config::SONAR_COOLDOWN;
        true
    }

    pub fn update(&mut self, dt: f32, bounds: &WorldBounds) {
        self.cooldown = (self.cooldown - dt).clamp(0.0, config::SONAR_COOLDOWN);

        for p in self.pings.iter_mut().filter(|p| p.alive) {
            p.position += p.velocity * dt;
            if !bounds.contains_inset(p.position, config::SONAR_PING_RADIUS) {
                p.alive = false;
            }
        }
    }

    pub fn ready(&self) -> bool {
        self.cooldown <= 0.0
    }

    pub fn iter_alive(&self) -> impl Iterator<Item = &Ping> {
        self.pings.iter().filter(|p| p.alive)
    }

    pub fn pool_size(&self) -> usize {
        self.pings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> WorldBounds {
        WorldBounds::centered(200.0, 200.0)
    }

    #[test]
    fn cooldown_blocks_rapid_fire() {
        let world = bounds();
        let mut sonar = Sonar::new();
        assert!(sonar.fire(Vec3::ZERO, Vec3::X));
        assert!(!sonar.fire(Vec3::ZERO, Vec3::X));

        sonar.update(1.0, &world);
        assert!(!sonar.ready());
        sonar.update(1.0, &world);
        assert!(sonar.ready());
        assert!(sonar.fire(Vec3::ZERO, Vec3::Y));
    }

    #[test]
    fn pings_die_at_world_edge_and_are_reused() {
        let world = bounds();
        let mut sonar = Sonar::new();
        sonar.fire(Vec3::ZERO, Vec3::X);
        sonar.update(0.5, &world);
        assert_eq!(sonar.iter_alive().count(), 1);
        let p = sonar.iter_alive().next().unwrap();
        assert!((p.position.x - 50.0).abs() < 1e-4);

        sonar.update(1.0, &world);
        assert_eq!(sonar.iter_alive().count(), 0);

        sonar.update(1.0, &world);
        assert!(sonar.fire(Vec3::ZERO, Vec3::Y));
        assert_eq!(sonar.pool_size(), 1);
    }
}
