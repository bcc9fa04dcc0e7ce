//! Scrolling log of handler notices.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::tui::app::{App, LogLevel};

/// Renders the newest log lines that fit, oldest at the top.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Log ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let visible = area.height.saturating_sub(2) as usize;
    let skip = app.log.len().saturating_sub(visible);

    let items: Vec<ListItem> = app
        .log
        .iter()
        .skip(skip)
        .map(|line| {
            let color = match line.level {
                LogLevel::Info => Color::White,
                LogLevel::Warn => Color::Yellow,
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("#{:<3} ", line.click), Style::default().fg(Color::DarkGray)),
                Span::styled(line.text.as_str(), Style::default().fg(color)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
