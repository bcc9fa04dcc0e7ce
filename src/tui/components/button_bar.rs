//! Row of demo buttons.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::App;

/// Renders the four buttons side by side, highlighting the selected one.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, app.buttons.len() as u32); 4])
        .split(area);

    for (i, (scenario, col)) in app.buttons.iter().zip(columns.iter()).enumerate() {
        let is_selected = i == app.selected;

        let (border_style, text_style) = if is_selected {
            (
                Style::default().fg(Color::Cyan),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::White),
            )
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let para = Paragraph::new(format!("[{}] {}", i + 1, scenario.label()))
            .style(text_style)
            .block(block);

        frame.render_widget(para, *col);
    }
}
