//! Main loop: draw, wait for a message, update, dispatch.

use tokio::sync::mpsc;
use tracing::info;

use super::event::{ChannelNotifier, spawn_event_reader, spawn_tick_timer, update};
use super::{Action, App, Message, Tui, render};
use crate::handler::ClickHandler;
use crate::service::DataService;
use crate::{PipeguardError, Result};

/// Runs the TUI on an already initialized terminal until the user quits.
///
/// Every button press runs on its own task, so a slow or hung request never
/// blocks input. Nothing is shared between presses.
///
/// # Errors
///
/// Returns [`PipeguardError::Io`] if drawing to the terminal fails.
pub async fn run(terminal: &mut Tui, service: DataService, tick_ms: u64) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), tick_ms);

    let mut app = App::new(service.base_url().as_str());
    info!(base_url = %service.base_url(), "TUI started");

    loop {
        terminal
            .draw(|frame| render(frame, &app))
            .map_err(|e| PipeguardError::Io(format!("failed to draw: {e}")))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        if let Some(action) = update(&mut app, message) {
            dispatch(action, &service, &tx);
        }
        if app.should_quit {
            break;
        }
    }

    info!(clicks = app.clicks, "TUI stopped");
    Ok(())
}

/// Spawns the work behind an [`Action`].
fn dispatch(action: Action, service: &DataService, tx: &mpsc::UnboundedSender<Message>) {
    match action {
        Action::Click { click, scenario } => {
            let handler =
                ClickHandler::with_notifier(service.clone(), ChannelNotifier::new(click, tx.clone()));
            let tx = tx.clone();
            tokio::spawn(async move {
                let report = handler
                    .on_click(scenario.resource(), scenario.limit())
                    .await;
                let _ = tx.send(Message::ClickFinished { click, report });
            });
        }
    }
}
