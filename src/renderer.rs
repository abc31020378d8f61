use macroquad::prelude::*;

use crate::camera::WorldView;
use crate::creature::{Creature, CreatureKind};
use crate::particles::ParticleSystem;
use crate::player::Player;
use crate::session::Session;
use crate::sky::StarField;

const BG_COLOR: Color = Color::new(0.01, 0.02, 0.07, 1.0);
const BAT_COLOR: Color = Color::new(0.55, 0.45, 0.65, 1.0);
const GLOW_COLOR: Color = Color::new(1.0, 0.95, 0.4, 1.0);

/// Wing spread per animation frame, as a fraction of full span.
const WING_SPREAD: [f32; 4] = [1.0, 0.6, 0.2, 0.6];

/// Draw one frame of the game world in screen space. The HUD goes on top
/// separately.
pub fn draw(
    session: &Session,
    view: &WorldView,
    sky: &StarField,
    particles: &ParticleSystem,
    time: f32,
) {
    clear_background(BG_COLOR);

    sky.draw(view, time);
    draw_world_border(view);

    session.creatures.draw_all(|c| {
        if view.is_visible(c.boid.position, c.boid.radius * 4.0) {
            draw_creature(c, view);
        }
    });

    draw_player(&session.player, view);
    particles.draw(view);
}

fn draw_world_border(view: &WorldView) {
    let bounds = view.bounds();
    let tl = view.project(vec3(bounds.min.x, bounds.max.y, 0.0));
    let br = view.project(vec3(bounds.max.x, bounds.min.y, 0.0));
    draw_rectangle_lines(
        tl.x,
        tl.y,
        br.x - tl.x,
        br.y - tl.y,
        2.0,
        Color::new(0.15, 0.18, 0.3, 1.0),
    );
}

/// Unit sprite direction on screen for a world heading (y flips).
fn screen_dir(heading: f32) -> Vec2 {
    vec2(heading.cos(), -heading.sin())
}

fn draw_creature(creature: &Creature, view: &WorldView) {
    let pos = view.project(creature.boid.position);
    let alpha = creature.alpha.value().clamp(0.0, 1.0);
    let radius = creature.flicker_radius().max(0.5);

    match creature.kind {
        CreatureKind::Firefly => {
            draw_circle(pos.x, pos.y, radius * 2.5, Color::new(0.7, 1.0, 0.3, 0.15 * alpha));
            draw_circle(pos.x, pos.y, radius, Color::new(0.85, 1.0, 0.45, alpha));
        }
        CreatureKind::Butterfly => {
            let dir = screen_dir(creature.boid.heading());
            let spread = WING_SPREAD[creature.wing_frame(WING_SPREAD.len())];
            let color = Color::new(0.5, 0.75, 1.0, 0.4 + 0.6 * alpha);
            draw_wings(pos, dir, creature.boid.radius * 2.0, spread, color);
            draw_circle(pos.x, pos.y, creature.boid.radius * 0.4, Color::new(0.2, 0.2, 0.3, 1.0));
        }
    }
}

fn draw_wings(pos: Vec2, dir: Vec2, span: f32, spread: f32, color: Color) {
    let perp = vec2(-dir.y, dir.x);
    let tip = perp * span * spread;
    let front = pos + dir * span * 0.5;
    let back = pos - dir * span * 0.5;
    draw_triangle(front, back, pos + tip, color);
    draw_triangle(front, back, pos - tip, color);
}

fn draw_bat(pos: Vec2, dir: Vec2, scale: f32, spread: f32, color: Color) {
    let size = crate::config::PLAYER_RADIUS * 2.0 * scale;
    draw_wings(pos, dir, size, spread, color);
    let head = pos + dir * size * 0.35;
    draw_circle(head.x, head.y, size * 0.2, color);
}

fn draw_player(player: &Player, view: &WorldView) {
    let dir = screen_dir(player.boid.heading());

    for ghost in player.trail.iter() {
        let pos = view.project(ghost.position);
        let c = Color::new(BAT_COLOR.r, BAT_COLOR.g, BAT_COLOR.b, ghost.alpha);
        draw_bat(pos, dir, ghost.scale, 0.6, c);
    }

    for ping in player.sonar.iter_alive() {
        let pos = view.project(ping.position);
        draw_circle_lines(pos.x, pos.y, 3.0, 1.0, Color::new(0.6, 0.9, 1.0, 0.8));
    }

    let pos = view.project(player.boid.position);
    let spread = WING_SPREAD[player.wing_frame(WING_SPREAD.len())];
    draw_bat(pos, dir, 1.0, spread, BAT_COLOR);

    let glow = player.capture_glow.value();
    if glow > 0.0 {
        let c = Color::new(GLOW_COLOR.r, GLOW_COLOR.g, GLOW_COLOR.b, glow * 0.6);
        draw_bat(pos, dir, 1.0 + 0.3 * glow, spread, c);
    }
}
