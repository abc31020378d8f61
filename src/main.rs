use macroquad::prelude::*;
use rand_chacha::ChaCha8Rng;
use ::rand::SeedableRng;

mod arena;
mod camera;
mod config;
mod creature;
mod highscore;
mod input;
mod oscillator;
mod particles;
mod player;
mod renderer;
mod session;
mod sky;
mod sonar;
mod steering;
mod trail;
mod ui;
mod world;

use camera::WorldView;
use config::LaunchOptions;
use highscore::HighScore;
use particles::ParticleSystem;
use session::{GameEvent, Session};
use sky::StarField;
use ui::UiState;
use world::WorldBounds;

fn window_conf() -> Conf {
    Conf {
        window_title: "Firefly Chase".to_string(),
        window_width: config::SCREEN_WIDTH as i32,
        window_height: config::SCREEN_HEIGHT as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let opts = LaunchOptions::from_env();
    let seed = opts.seed.unwrap_or_else(clock_seed);
    log::info!("starting with seed {seed}");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let bounds = WorldBounds::centered(config::WORLD_WIDTH, config::WORLD_HEIGHT);
    let mut session = Session::new(bounds, &mut rng);
    let mut view = WorldView::new(bounds, vec2(screen_width(), screen_height()));
    view.look_at(session.player.boid.position.truncate());
    view.snap();

    let sky = StarField::generate(&bounds, config::STAR_CELL_SIZE, config::STAR_DENSITY, seed);
    let mut particles = ParticleSystem::new();
    let mut high_score = highscore::load_or_default(&opts.scores_path);
    let mut ui_state = UiState::default();
    let mut time = 0.0f32;

    loop {
        let dt = get_frame_time();
        time += dt;

        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::M) {
            ui_state.show_minimap = !ui_state.show_minimap;
        }
        if session.game_over && is_key_pressed(KeyCode::Enter) {
            session = Session::new(bounds, &mut rng);
            view.look_at(session.player.boid.position.truncate());
            view.snap();
        }

        let controls = input::sample();
        for event in session.update(dt, controls, &mut rng) {
            match event {
                GameEvent::Captured { position, .. } => {
                    particles.emit_capture(position.truncate());
                }
                GameEvent::Flap => log::trace!("flap"),
                GameEvent::SonarFired { position } => {
                    log::debug!("sonar ping from ({:.0}, {:.0})", position.x, position.y);
                }
                GameEvent::LevelStarted { .. } => {}
                GameEvent::GameOver { total_captures } => {
                    if high_score.record(total_captures) {
                        log::info!("new high score {total_captures}");
                    }
                    save_high_score(&high_score, &opts.scores_path);
                }
            }
        }
        particles.update(dt);

        view.set_viewport(vec2(screen_width(), screen_height()));
        view.look_at(session.player.boid.position.truncate());
        view.update(dt);

        renderer::draw(&session, &view, &sky, &particles, time);
        ui::draw_ui(&session, &high_score, &view, &ui_state);

        next_frame().await;
    }

    // Quitting mid-game still counts toward the best.
    if !session.game_over && session.total_captures > high_score.best {
        high_score.best = session.total_captures;
    }
    save_high_score(&high_score, &opts.scores_path);
}

fn save_high_score(score: &HighScore, path: &str) {
    match highscore::save_to_file(score, path) {
        Ok(()) => log::info!("saved high score {} to {path}", score.best),
        Err(e) => log::warn!("high score save failed: {e}"),
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
