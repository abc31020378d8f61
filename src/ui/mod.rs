pub mod hud;
pub mod minimap;

use crate::camera::WorldView;
use crate::highscore::HighScore;
use crate::session::Session;

/// Which overlays are showing.
pub struct UiState {
    pub show_minimap: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self { show_minimap: true }
    }
}

/// Draw the egui overlay on top of the game.
pub fn draw_ui(session: &Session, high_score: &HighScore, view: &WorldView, ui_state: &UiState) {
    egui_macroquad::ui(|ctx| {
        hud::draw_hud(ctx, session, high_score);

        if ui_state.show_minimap && !session.game_over {
            minimap::draw_minimap(ctx, session, view);
        }
    });

    egui_macroquad::draw();
}
