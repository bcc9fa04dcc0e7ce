//! Reusable UI components.

pub mod button_bar;
pub mod log_panel;
pub mod status_bar;
