//! Server row component for the navigation list

use egui::{Layout, Rounding, Sense, Ui, UiBuilder, Vec2};

use super::toggle_switch::ToggleSwitch;
use crate::core::view::{NavRow, ViewEvent};
use crate::ui::theme::Theme;

const ROW_HEIGHT: f32 = 40.0;

pub struct ServerRow;

impl ServerRow {
    /// Render one row and return the interaction it produced, if any.
    ///
    /// The row's click area is allocated before the switch so the switch
    /// sits on top of it; a click on the switch never selects the row.
    pub fn show(ui: &mut Ui, row: &NavRow) -> Option<ViewEvent> {
        let (rect, row_response) =
            ui.allocate_exact_size(Vec2::new(ui.available_width(), ROW_HEIGHT), Sense::click());

        ui.painter().rect_filled(
            rect,
            Rounding::same(8.0),
            Theme::row_fill(row.selected, row_response.hovered()),
        );

        let text_color = if row.selected {
            Theme::PRIMARY_LIGHT
        } else {
            Theme::TEXT_PRIMARY
        };

        let mut content = ui.new_child(
            UiBuilder::new()
                .max_rect(rect.shrink2(Vec2::new(12.0, 6.0)))
                .layout(Layout::left_to_right(egui::Align::Center)),
        );

        if row.selected {
            // Active indicator bar
            let (bar, _) = content.allocate_exact_size(Vec2::new(3.0, 18.0), Sense::hover());
            content
                .painter()
                .rect_filled(bar, Rounding::same(2.0), Theme::PRIMARY);
        }

        content.add(
            egui::Label::new(egui::RichText::new(&row.name).size(14.0).color(text_color))
                .selectable(false),
        );

        let switch_response = content
            .with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                ToggleSwitch::show(ui, row.running, row.pending)
            })
            .inner
            .on_hover_text(row.status);

        if switch_response.clicked() {
            Some(ViewEvent::ToggleClicked(row.name.clone()))
        } else if row_response.clicked() {
            Some(ViewEvent::RowClicked(row.name.clone()))
        } else {
            None
        }
    }
}
