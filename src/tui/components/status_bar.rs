//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::models::Status;
use crate::tui::app::App;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let pending = if app.in_flight > 0 {
        let frame_char = SPINNER[(app.ticks % SPINNER.len() as u64) as usize];
        Span::styled(
            format!(" {frame_char} {} pending ", app.in_flight),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::styled(" idle ", Style::default().fg(Color::Green))
    };

    let outcome = match app.last_outcome {
        Some(outcome) => {
            let color = match outcome.status {
                Some(Status::Ok) => Color::Green,
                Some(Status::Error) => Color::Red,
                None => Color::White,
            };
            Span::styled(format!(" {} ", outcome.label()), Style::default().fg(color))
        }
        None => Span::raw(""),
    };

    let line = Line::from(vec![
        Span::styled(" pipeguard ", Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::raw(format!(" {} ", app.base_url)),
        Span::raw("│"),
        pending,
        Span::raw("│"),
        outcome,
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
