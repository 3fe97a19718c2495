//! Main panels

pub mod main_view;
pub mod nav;
