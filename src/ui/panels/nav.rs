//! Navigation panel - Title, server list and quick stats

use egui::{Context, SidePanel, Ui};

use crate::core::view::{NavPanel, ViewEvent};
use crate::ui::components::ServerRow;
use crate::ui::theme::Theme;

pub fn render(ctx: &Context, nav: &NavPanel, events: &mut Vec<ViewEvent>) {
    SidePanel::left("nav")
        .resizable(false)
        .default_width(260.0)
        .frame(
            egui::Frame::none()
                .fill(Theme::BG_SECONDARY)
                .stroke(egui::Stroke::new(1.0, Theme::BORDER_LIGHT))
                .inner_margin(egui::Margin::symmetric(12.0, 20.0)),
        )
        .show(ctx, |ui| {
            render_title(ui, nav.title, events);

            ui.add_space(20.0);

            if nav.rows.is_empty() {
                ui.label(
                    egui::RichText::new(if nav.last_poll.is_some() {
                        "No servers configured"
                    } else {
                        "Waiting for the daemon..."
                    })
                    .color(Theme::TEXT_MUTED),
                );
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    for row in &nav.rows {
                        if let Some(event) = ServerRow::show(ui, row) {
                            events.push(event);
                        }
                        ui.add_space(2.0);
                    }
                });

            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                render_stats(ui, nav);
            });
        });
}

fn render_title(ui: &mut Ui, title: &str, events: &mut Vec<ViewEvent>) {
    let response = ui
        .horizontal(|ui| {
            ui.label(egui::RichText::new("◈").size(24.0).color(Theme::PRIMARY));
            ui.add_space(8.0);
            ui.add(
                egui::Label::new(
                    egui::RichText::new(title)
                        .size(18.0)
                        .strong()
                        .color(Theme::TEXT_PRIMARY),
                )
                .selectable(false),
            );
        })
        .response
        .interact(egui::Sense::click());

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    if response.clicked() {
        events.push(ViewEvent::TitleClicked);
    }
}

fn render_stats(ui: &mut Ui, nav: &NavPanel) {
    ui.label(
        egui::RichText::new(format!("v{}", crate::APP_VERSION))
            .small()
            .color(Theme::TEXT_MUTED),
    );

    let last_poll = nav
        .last_poll
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    ui.label(
        egui::RichText::new(format!("Last update {}", last_poll))
            .small()
            .color(Theme::TEXT_MUTED),
    );

    egui::Frame::none()
        .fill(Theme::BG_TERTIARY.linear_multiply(0.5))
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                stat(ui, nav.running_count, "Running", Theme::SUCCESS);
                ui.add_space(24.0);
                stat(ui, nav.total_count, "Total", Theme::TEXT_PRIMARY);
            });
        });
}

fn stat(ui: &mut Ui, value: usize, label: &str, color: egui::Color32) {
    ui.vertical(|ui| {
        ui.label(
            egui::RichText::new(value.to_string())
                .size(20.0)
                .strong()
                .color(color),
        );
        ui.label(egui::RichText::new(label).small().color(Theme::TEXT_MUTED));
    });
}
