//! Terminal User Interface for the pipeguard demo.
//!
//! Four buttons, one per scenario, and a log panel that shows what the
//! click handler reported for each press.

pub mod app;
pub mod components;
pub mod event;
pub mod runtime;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message};
pub use runtime::run;
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
