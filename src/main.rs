use std::fs::OpenOptions;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use pipeguard::config::{AppConfig, fetch_config};
use pipeguard::handler::{ClickHandler, ClickReport};
use pipeguard::scenario::Scenario;
use pipeguard::service::DataService;
use pipeguard::tui::{restore_terminal, setup_terminal};
use pipeguard::{PipeguardError, Result};
use tracing::info;

#[derive(Parser)]
#[command(name = "pipeguard", version, about = "Fetch pipeline error-normalization demo")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive four-button UI (the default).
    Tui,
    /// Press demo buttons without a UI and print what each one displayed.
    Run {
        /// Button to press; repeat to press several. Defaults to all four.
        #[arg(short, long = "scenario", value_enum)]
        scenarios: Vec<Scenario>,
        /// How many times to press each button.
        #[arg(long, default_value_t = 1)]
        repeat: u32,
    },
    /// Click with an arbitrary resource and limit.
    Fetch {
        /// Resource, absolute or relative to PIPEGUARD_BASE_URL.
        resource: String,
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = fetch_config()?;
    let service = DataService::new(config.assets.base_url.clone())?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => run_tui(&config, service).await,
        Command::Run { scenarios, repeat } => {
            tracing_subscriber::fmt::init();
            let scenarios = if scenarios.is_empty() {
                Scenario::ALL.to_vec()
            } else {
                scenarios
            };
            let handler = ClickHandler::new(service);
            for scenario in scenarios {
                for round in 1..=repeat {
                    info!(button = scenario.label(), round, "Pressing button");
                    let report = handler.on_click(scenario.resource(), scenario.limit()).await;
                    print_report(&report)?;
                }
            }
            Ok(())
        }
        Command::Fetch { resource, limit } => {
            tracing_subscriber::fmt::init();
            let report = ClickHandler::new(service).on_click(&resource, limit).await;
            print_report(&report)
        }
    }
}

/// Prints each displayed envelope as one JSON line.
fn print_report(report: &ClickReport) -> Result<()> {
    for line in report_lines(report)? {
        println!("{line}");
    }
    Ok(())
}

fn report_lines(report: &ClickReport) -> Result<Vec<String>> {
    report
        .displayed
        .iter()
        .map(|displayed| serde_json::to_string(displayed).map_err(PipeguardError::from))
        .collect()
}

async fn run_tui(config: &AppConfig, service: DataService) -> Result<()> {
    // Log to a file; stdout belongs to the alternate screen.
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.tui.log_file)
        .map_err(|e| {
            PipeguardError::Io(format!(
                "failed to open log file {}: {e}",
                config.tui.log_file.display()
            ))
        })?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let mut terminal = setup_terminal()?;
    let result = pipeguard::tui::run(&mut terminal, service, config.tui.tick_ms).await;
    restore_terminal(&mut terminal)?;
    result
}
