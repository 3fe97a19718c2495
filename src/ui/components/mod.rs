//! Reusable UI components

mod server_row;
mod toggle_switch;

pub use server_row::ServerRow;
