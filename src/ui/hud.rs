use egui;

use crate::highscore::HighScore;
use crate::session::Session;

const HUD_YELLOW: egui::Color32 = egui::Color32::from_rgb(255, 255, 0);
const GAME_OVER_RED: egui::Color32 = egui::Color32::from_rgb(255, 64, 64);

/// `m:ss`, truncating partial seconds.
pub fn format_clock(seconds: f32) -> String {
    let whole = seconds.max(0.0) as u32;
    format!("{}:{:02}", whole / 60, whole % 60)
}

pub fn format_score(level_score: u32, level_spawned: u32, total: u32) -> String {
    format!("SCORE: {level_score}/{level_spawned} ({total})")
}

/// Score and time along the top, high score and level along the bottom.
pub fn draw_hud(ctx: &egui::Context, session: &Session, high_score: &HighScore) {
    if session.game_over {
        egui::Area::new(egui::Id::new("game_over"))
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(hud_text("GAME OVER", GAME_OVER_RED).size(28.0));
                    ui.label(hud_text(
                        &format!("{} captured", session.total_captures),
                        HUD_YELLOW,
                    ));
                    ui.label(hud_text("press Enter to play again", HUD_YELLOW).small());
                });
            });
        return;
    }

    let best = high_score.best.max(session.total_captures);
    corner(
        ctx,
        "hud_score",
        egui::Align2::LEFT_TOP,
        format_score(session.player.score, session.level_spawned, session.total_captures),
    );
    corner(
        ctx,
        "hud_time",
        egui::Align2::RIGHT_TOP,
        format!("TIME: {}", format_clock(session.time_remaining)),
    );
    corner(
        ctx,
        "hud_high",
        egui::Align2::LEFT_BOTTOM,
        format!("HIGH SCORE: {best}"),
    );
    corner(
        ctx,
        "hud_level",
        egui::Align2::RIGHT_BOTTOM,
        format!("LEVEL: {}", session.level),
    );
}

fn corner(ctx: &egui::Context, id: &str, align: egui::Align2, text: String) {
    let offset = egui::vec2(
        if align.x() == egui::Align::Min { 6.0 } else { -6.0 },
        if align.y() == egui::Align::Min { 4.0 } else { -4.0 },
    );
    egui::Area::new(egui::Id::new(id))
        .anchor(align, offset)
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(hud_text(&text, HUD_YELLOW));
        });
}

fn hud_text(text: &str, color: egui::Color32) -> egui::RichText {
    egui::RichText::new(text).monospace().strong().color(color)
}
