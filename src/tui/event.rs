//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::handler::{ClickReport, Notice, Notifier, TracingNotifier};
use crate::scenario::Scenario;

use super::app::App;

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),

    /// A notice from the handler serving a click.
    Notice { click: u64, notice: Notice },
    /// A click's request finished.
    ClickFinished { click: u64, report: ClickReport },
}

/// Actions that require external handling.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    /// Run the request behind a button.
    Click { click: u64, scenario: Scenario },
}

/// Forwards a click's notices to the main loop, and to the log file.
#[derive(Clone, Debug)]
pub struct ChannelNotifier {
    click: u64,
    tx: mpsc::UnboundedSender<Message>,
}

impl ChannelNotifier {
    pub fn new(click: u64, tx: mpsc::UnboundedSender<Message>) -> Self {
        Self { click, tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        TracingNotifier.notify(notice.clone());
        // The main loop is gone when this fails; nothing left to show.
        let _ = self.tx.send(Message::Notice {
            click: self.click,
            notice,
        });
    }
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Notice { click, notice } => {
            app.record_notice(click, &notice);
            None
        }
        Message::ClickFinished { click, report } => {
            app.finish_click(click, &report);
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.ticks = app.ticks.wrapping_add(1);
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Windows reports releases too
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            None
        }

        // Button navigation
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
            app.next_button();
            None
        }
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
            app.previous_button();
            None
        }

        // Press the highlighted button
        KeyCode::Enter | KeyCode::Char(' ') => {
            let scenario = app.selected_scenario();
            Some(press(app, scenario))
        }

        // Press a button directly
        KeyCode::Char(c @ '1'..='4') => {
            let index = c.to_digit(10).map_or(0, |d| d as usize - 1);
            app.selected = index;
            let scenario = app.selected_scenario();
            Some(press(app, scenario))
        }

        KeyCode::Char('c') => {
            app.clear_log();
            None
        }

        _ => None,
    }
}

fn press(app: &mut App, scenario: Scenario) -> Action {
    let click = app.begin_click(scenario);
    Action::Click { click, scenario }
}
