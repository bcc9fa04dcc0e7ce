//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
};

use super::app::App;
use super::components::{button_bar, log_panel, status_bar};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Length(3), // Buttons
            Constraint::Min(5),    // Log
            Constraint::Length(1), // Keybindings help
        ])
        .split(frame.area());

    status_bar::render(frame, layout[0], app);
    button_bar::render(frame, layout[1], app);
    log_panel::render(frame, layout[2], app);

    let help = "[←/→]select [Enter]press [1-4]press button [c]clear log [q]quit";
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, layout[3]);
}
