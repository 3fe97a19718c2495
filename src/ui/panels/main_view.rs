//! Main panel - Front page or the selected server's detail placeholder

use egui::{CentralPanel, Context};

use crate::core::view::MainPanel;
use crate::ui::theme::Theme;

pub fn render(ctx: &Context, main: &MainPanel) {
    CentralPanel::default().show(ctx, |ui| match main {
        MainPanel::Frontpage { message } => {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 3.0);
                ui.label(egui::RichText::new("📦").size(48.0));
                ui.add_space(16.0);
                ui.label(
                    egui::RichText::new(*message)
                        .size(16.0)
                        .color(Theme::TEXT_SECONDARY),
                );
            });
        }
        MainPanel::Detail { name } => {
            // Placeholder keyed by server name; no log content yet
            egui::Frame::none()
                .fill(Theme::BG_SECONDARY)
                .rounding(egui::Rounding::same(8.0))
                .inner_margin(egui::Margin::same(24.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.heading(egui::RichText::new(name).color(Theme::TEXT_PRIMARY));
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new(format!("main viewer component for {}", name))
                            .color(Theme::TEXT_MUTED),
                    );
                });
        }
    });
}
