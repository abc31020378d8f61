use macroquad::prelude::*;
use ::rand::{Rng, RngCore};

use crate::arena::CreatureArena;
use crate::config;
use crate::creature::{Creature, CreatureKind};
use crate::player::{Player, PlayerInput};
use crate::world::WorldBounds;

/// Things the shell reacts to with sound, particles or logging.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    Captured {
        kind: CreatureKind,
        position: Vec3,
        level_score: u32,
        total_captures: u32,
    },
    Flap,
    SonarFired { position: Vec3 },
    LevelStarted { level: u32, fireflies: u32 },
    GameOver { total_captures: u32 },
}

/// One round of play: the creature set, the player, the clock and the score.
pub struct Session {
    pub bounds: WorldBounds,
    pub creatures: CreatureArena,
    pub player: Player,
    pub level: u32,
    /// Fireflies spawned this level; the "out of" part of the score.
    pub level_spawned: u32,
    pub total_captures: u32,
    pub time_remaining: f32,
    pub game_over: bool,
}

impl Session {
    pub fn new(bounds: WorldBounds, rng: &mut dyn RngCore) -> Self {
        let mut session = Self {
            bounds,
            creatures: CreatureArena::new(),
            player: Player::new(bounds.center().extend(0.0)),
            level: 0,
            level_spawned: 0,
            total_captures: 0,
            time_remaining: config::ROUND_TIME,
            game_over: false,
        };
        session.next_level(rng);
        session
    }

    /// Clear the field and populate the next level.
    pub fn next_level(&mut self, rng: &mut dyn RngCore) -> GameEvent {
        self.level += 1;
        self.player.begin_level();
        self.level_spawned = rng.gen_range(config::FIREFLIES_MIN..config::FIREFLIES_MAX);

        self.creatures.clear();
        for _ in 0..self.level_spawned {
            self.creatures.spawn(Creature::spawn_firefly(&self.bounds, rng));
        }
        for _ in 0..config::BUTTERFLIES_PER_LEVEL {
            self.creatures.spawn(Creature::spawn_butterfly(&self.bounds, rng));
        }

        log::info!(
            "level {} started with {} fireflies",
            self.level,
            self.level_spawned
        );
        GameEvent::LevelStarted {
            level: self.level,
            fireflies: self.level_spawned,
        }
    }

    /// Advance one frame. Does nothing once the game is over.
    pub fn update(&mut self, dt: f32, input: PlayerInput, rng: &mut dyn RngCore) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.game_over {
            return events;
        }

        let tick = self.player.update(dt, input, &self.bounds, rng);
        if tick.flapped {
            events.push(GameEvent::Flap);
        }
        if tick.sonar_fired {
            events.push(GameEvent::SonarFired {
                position: self.player.boid.position,
            });
        }

        // At most one capture per frame.
        let player = &self.player;
        let mut claimed = false;
        let removed = self
            .creatures
            .update_all_with(dt, &self.bounds, rng, |id, creature, removals| {
                if !claimed && player.can_capture(creature.boid.position) {
                    claimed = true;
                    removals.push(id);
                }
            });

        for (_, creature) in removed {
            let capture = self.player.capture(creature.boid.position);
            self.time_remaining += config::CAPTURE_TIME_BONUS;
            self.total_captures += 1;
            log::debug!(
                "captured {} at ({:.1}, {:.1}), {} this level",
                creature.kind.label(),
                capture.position.x,
                capture.position.y,
                capture.level_score
            );
            events.push(GameEvent::Captured {
                kind: creature.kind,
                position: capture.position,
                level_score: capture.level_score,
                total_captures: self.total_captures,
            });
        }

        if self.creatures.is_empty() {
            events.push(self.next_level(rng));
        }

        self.time_remaining = (self.time_remaining - dt).max(0.0);
        if self.time_remaining <= 0.0 {
            self.game_over = true;
            log::info!("game over with {} captures", self.total_captures);
            events.push(GameEvent::GameOver {
                total_captures: self.total_captures,
            });
        }

        events
    }
}
