//! Application state for the TUI.

use std::collections::VecDeque;

use crate::handler::{ClickReport, Notice};
use crate::models::{ErrorKind, Status};
use crate::scenario::Scenario;

/// Maximum number of lines kept in the log panel.
pub const MAX_LOG_LINES: usize = 200;

/// Central application state container.
pub struct App {
    // -- Buttons --
    /// The demo buttons, in display order.
    pub buttons: [Scenario; 4],
    /// Index of the highlighted button.
    pub selected: usize,

    // -- Requests --
    /// Number of clicks issued so far; also the id of the latest click.
    pub clicks: u64,
    /// Clicks whose request has not finished yet.
    pub in_flight: usize,
    /// Summary of the most recently finished click.
    pub last_outcome: Option<Outcome>,

    // -- Display --
    /// Log lines, oldest first.
    pub log: VecDeque<LogLine>,
    /// Base URL shown in the status bar.
    pub base_url: String,
    /// Tick counter for the pending-request spinner.
    pub ticks: u64,

    // -- Internal --
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates a new App with the first button highlighted.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            buttons: Scenario::ALL,
            selected: 0,

            clicks: 0,
            in_flight: 0,
            last_outcome: None,

            log: VecDeque::with_capacity(MAX_LOG_LINES),
            base_url: base_url.into(),
            ticks: 0,

            should_quit: false,
        }
    }

    /// Returns the highlighted button.
    pub fn selected_scenario(&self) -> Scenario {
        self.buttons[self.selected]
    }

    /// Highlights the next button, wrapping around.
    pub fn next_button(&mut self) {
        self.selected = (self.selected + 1) % self.buttons.len();
    }

    /// Highlights the previous button, wrapping around.
    pub fn previous_button(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(self.buttons.len() - 1);
    }

    /// Records a new click and returns its id.
    pub fn begin_click(&mut self, scenario: Scenario) -> u64 {
        self.clicks += 1;
        self.in_flight += 1;
        self.push_log(LogLine {
            click: self.clicks,
            level: LogLevel::Info,
            text: format!(
                "clicked \"{}\" ({}, limit {})",
                scenario.label(),
                scenario.resource(),
                scenario.limit()
            ),
        });
        self.clicks
    }

    /// Adds a handler notice to the log.
    pub fn record_notice(&mut self, click: u64, notice: &Notice) {
        let level = match notice {
            Notice::Recovered { .. } | Notice::Alert { .. } | Notice::UnknownShape(_) => {
                LogLevel::Warn
            }
            Notice::AllIsWell | Notice::Displayed(_) => LogLevel::Info,
        };
        self.push_log(LogLine {
            click,
            level,
            text: notice.to_string(),
        });
    }

    /// Marks a click as finished.
    pub fn finish_click(&mut self, click: u64, report: &ClickReport) {
        self.in_flight = self.in_flight.saturating_sub(1);

        let outcome = Outcome {
            click,
            status: report.displayed.last().map(|d| d.status),
            recovered_from: report.recovered_from,
        };
        if report.is_empty() {
            self.push_log(LogLine {
                click,
                level: LogLevel::Info,
                text: "completed without emitting".to_string(),
            });
        }
        self.last_outcome = Some(outcome);
    }

    /// Empties the log panel.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn push_log(&mut self, line: LogLine) {
        if self.log.len() >= MAX_LOG_LINES {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }
}

/// One line in the log panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLine {
    /// Id of the click that produced the line.
    pub click: u64,
    pub level: LogLevel,
    pub text: String,
}

/// Severity used to color log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
}

/// Summary of a finished click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub click: u64,
    /// `None` when nothing was emitted.
    pub status: Option<Status>,
    pub recovered_from: Option<ErrorKind>,
}

impl Outcome {
    /// Returns a display string for the status bar.
    pub fn label(&self) -> String {
        let status = self.status.map_or("no emission", |s| s.as_str());
        match self.recovered_from {
            Some(kind) => format!("#{} {status} (recovered from {kind})", self.click),
            None => format!("#{} {status}", self.click),
        }
    }
}
