use egui;
use macroquad::prelude::*;

use crate::camera::WorldView;
use crate::creature::CreatureKind;
use crate::session::Session;
use crate::world::WorldBounds;

const MINIMAP_WIDTH: f32 = 72.0;

/// Map a world position (y up) into a minimap rect (y down).
pub fn world_to_minimap(bounds: &WorldBounds, rect: egui::Rect, pos: Vec2) -> egui::Pos2 {
    let u = (pos.x - bounds.min.x) / bounds.width().max(f32::EPSILON);
    let v = (pos.y - bounds.min.y) / bounds.height().max(f32::EPSILON);
    egui::pos2(
        rect.left() + u.clamp(0.0, 1.0) * rect.width(),
        rect.bottom() - v.clamp(0.0, 1.0) * rect.height(),
    )
}

/// Small radar in the corner: creatures, the player, and the visible area.
pub fn draw_minimap(ctx: &egui::Context, session: &Session, view: &WorldView) {
    let bounds = session.bounds;
    let height = MINIMAP_WIDTH * bounds.height() / bounds.width().max(f32::EPSILON);

    egui::Area::new(egui::Id::new("minimap"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-6.0, 24.0))
        .interactable(false)
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(egui::vec2(MINIMAP_WIDTH, height), egui::Sense::hover());
            let rect = response.rect;

            painter.rect_filled(rect, 2.0, egui::Color32::from_rgba_unmultiplied(10, 15, 25, 160));

            for (_, creature) in session.creatures.iter() {
                let p = world_to_minimap(&bounds, rect, creature.boid.position.truncate());
                let color = match creature.kind {
                    CreatureKind::Firefly => egui::Color32::from_rgb(200, 255, 120),
                    CreatureKind::Butterfly => egui::Color32::from_rgb(120, 180, 255),
                };
                painter.circle_filled(p, 1.0, color);
            }

            let p = world_to_minimap(&bounds, rect, session.player.boid.position.truncate());
            painter.circle_filled(p, 2.0, egui::Color32::from_rgb(255, 80, 80));

            let (min, max) = view.visible_rect();
            let a = world_to_minimap(&bounds, rect, min);
            let b = world_to_minimap(&bounds, rect, max);
            painter.rect_stroke(
                egui::Rect::from_two_pos(a, b),
                0.0,
                egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(255, 255, 255, 90)),
                egui::StrokeKind::Outside,
            );

            painter.rect_stroke(
                rect,
                2.0,
                egui::Stroke::new(1.0, egui::Color32::from_gray(60)),
                egui::StrokeKind::Inside,
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_corners_map_to_rect_corners() {
        let bounds = WorldBounds::centered(100.0, 200.0);
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(50.0, 100.0));

        assert_eq!(world_to_minimap(&bounds, rect, bounds.min), egui::pos2(10.0, 120.0));
        assert_eq!(world_to_minimap(&bounds, rect, bounds.max), egui::pos2(60.0, 20.0));
        assert_eq!(world_to_minimap(&bounds, rect, Vec2::ZERO), egui::pos2(35.0, 70.0));
    }
}
