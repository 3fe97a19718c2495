//! Toggle switch component

use egui::{Response, Rounding, Sense, Ui, Vec2};

use crate::ui::theme::Theme;

pub struct ToggleSwitch;

impl ToggleSwitch {
    /// Paint a switch showing `on` and report clicks.
    ///
    /// The switch never changes state by itself; the caller decides what a
    /// click means and the next frame shows the result.
    pub fn show(ui: &mut Ui, on: bool, pending: bool) -> Response {
        let size = Vec2::new(36.0, 20.0);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let how_on = ui.ctx().animate_bool(response.id, on);
            let track = Theme::switch_color(on, pending);
            let radius = rect.height() / 2.0;
            let painter = ui.painter();

            painter.rect_filled(rect, Rounding::same(radius), track.linear_multiply(0.35));
            painter.rect_stroke(
                rect,
                Rounding::same(radius),
                egui::Stroke::new(1.0, track.linear_multiply(0.7)),
            );

            let knob_x = egui::lerp((rect.left() + radius)..=(rect.right() - radius), how_on);
            let knob = egui::pos2(knob_x, rect.center().y);
            painter.circle_filled(knob, radius - 3.0, track);
        }

        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        response
    }
}
