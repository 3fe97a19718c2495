//! procmgr-dashboard - Start and stop servers managed by a process manager daemon
//!
//! A desktop dashboard that mirrors which configured servers the daemon is
//! running, polls it on a fixed cadence, and lets the operator flip each
//! server on or off.

mod api;
mod core;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::HttpControlApi;
use crate::core::{AppState, Settings};
use crate::ui::DashboardApp;

/// Application name constant
pub const APP_NAME: &str = "procmgr-dashboard";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    init_logging();

    info!("{} v{} starting...", APP_NAME, APP_VERSION);

    let settings_path = Settings::default_path()?;
    let settings = Settings::load_or_create(&settings_path)?;
    info!("Settings loaded from {:?}", settings_path);

    // Network requests run here; the UI stays on the main thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("procmgr-net")
        .build()
        .context("Failed to start async runtime")?;

    let api = HttpControlApi::new(&settings.base_url(), settings.request_timeout())
        .context("Failed to create control API client")?;
    info!(
        "Polling {} every {}ms",
        api.base_url(),
        settings.poll_interval_ms
    );

    let app_state = AppState::new(settings, Arc::new(api), runtime.handle().clone());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    info!("Starting GUI...");
    eframe::run_native(
        &format!("{} v{}", APP_NAME, APP_VERSION),
        native_options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, app_state)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    runtime.shutdown_background();
    info!("{} shutting down", APP_NAME);
    Ok(())
}

/// Initialize the logging system
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("procmgr_dashboard=info,eframe=warn,egui=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
