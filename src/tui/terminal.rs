//! Terminal setup and teardown utilities.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{PipeguardError, Result};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Wraps an I/O failure with the step that produced it.
fn io_error(step: &str) -> impl FnOnce(io::Error) -> PipeguardError + '_ {
    move |e| PipeguardError::Io(format!("failed to {step}: {e}"))
}

/// Enables raw mode and switches to the alternate screen buffer.
///
/// # Errors
///
/// Returns [`PipeguardError::Io`] if stdout is not a TTY (use `pipeguard
/// run` there instead) or if any setup step fails. Raw mode is switched back
/// off before a failure is returned.
pub fn setup_terminal() -> Result<Tui> {
    if !io::stdout().is_terminal() {
        return Err(PipeguardError::Io(
            "the TUI needs an interactive terminal; use `pipeguard run` instead".to_string(),
        ));
    }

    enable_raw_mode().map_err(io_error("enable raw mode"))?;

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(io_error("enter alternate screen")(e));
    }

    Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        let _ = disable_raw_mode();
        io_error("create terminal")(e)
    })
}

/// Leaves the alternate screen, disables raw mode and shows the cursor.
///
/// # Errors
///
/// Returns [`PipeguardError::Io`] if any teardown step fails.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(io_error("disable raw mode"))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(io_error("leave alternate screen"))?;
    terminal.show_cursor().map_err(io_error("show cursor"))
}
