//! User interface module - egui-based dashboard

mod app;
mod components;
mod panels;
mod theme;

pub use app::DashboardApp;
