//! Main application UI

use std::sync::Arc;

use egui::Context;
use tokio::task::JoinHandle;
use tracing::info;

use super::panels;
use super::theme::Theme;
use crate::core::AppState;

/// Main application struct
pub struct DashboardApp {
    /// Application state
    state: AppState,
    /// Background poller, aborted on exit
    poller: JoinHandle<()>,
    /// First frame flag
    first_frame: bool,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        Theme::apply(&cc.egui_ctx, state.settings.theme);

        // Repaint whenever a poll lands so the view re-derives
        let ctx = cc.egui_ctx.clone();
        let poller = state.start_polling(Arc::new(move || ctx.request_repaint()));

        Self {
            state,
            poller,
            first_frame: true,
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            self.first_frame = false;
            info!("First frame rendered");
        }

        let tree = self.state.render_tree();
        let mut events = Vec::new();

        panels::nav::render(ctx, &tree.nav, &mut events);
        panels::main_view::render(ctx, &tree.main);

        if !events.is_empty() {
            for event in events {
                self.state.dispatch(event);
            }
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.poller.abort();
        info!("Application exiting");
    }
}
