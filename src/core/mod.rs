//! Core module - Server registry, selection, toggles and view composition

mod app_state;
mod poller;
mod registry;
mod selection;
mod server;
pub mod settings;
mod toggle;
pub mod view;

#[cfg(test)]
mod test_support;

pub use app_state::AppState;
pub use settings::Settings;
