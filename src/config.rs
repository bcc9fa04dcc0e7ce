//! Application configuration loaded from environment variables.
//!
//! All variables are optional:
//! - `PIPEGUARD_BASE_URL`: base URL the scenario resources are resolved against
//! - `PIPEGUARD_LOG_FILE`: where the TUI writes its log output
//! - `PIPEGUARD_TICK_MS`: TUI tick interval in milliseconds

use std::path::PathBuf;

use url::Url;

/// Default location of the demo assets (an `ng serve`-style dev server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:4200/assets/";

/// Default TUI log file, relative to the working directory.
const DEFAULT_LOG_FILE: &str = "pipeguard.log";

/// Default TUI tick interval.
const DEFAULT_TICK_MS: u64 = 250;

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub assets: AssetsConfig,
    pub tui: TuiConfig,
}

/// Where the demo resources live.
#[derive(Debug, Clone)]
pub struct AssetsConfig {
    /// Always ends with `/` so relative resources join underneath it.
    pub base_url: Url,
}

/// Terminal front-end settings.
#[derive(Debug, Clone)]
pub struct TuiConfig {
    pub log_file: PathBuf,
    pub tick_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`PipeguardError::Config`](crate::PipeguardError::Config) if
/// `PIPEGUARD_BASE_URL` is not an absolute URL or `PIPEGUARD_TICK_MS` is
/// not a positive integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let base_url = parse_base_url(
        non_empty_var("PIPEGUARD_BASE_URL")
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL),
    )?;

    let log_file = non_empty_var("PIPEGUARD_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let tick_ms = match non_empty_var("PIPEGUARD_TICK_MS") {
        Some(raw) => match raw.parse::<u64>() {
            Ok(ms) if ms > 0 => ms,
            _ => {
                return Err(crate::PipeguardError::Config(format!(
                    "PIPEGUARD_TICK_MS must be a positive integer, got {raw:?}"
                )));
            }
        },
        None => DEFAULT_TICK_MS,
    };

    Ok(AppConfig {
        assets: AssetsConfig { base_url },
        tui: TuiConfig { log_file, tick_ms },
    })
}

/// Parses a base URL and makes sure it ends with a slash.
///
/// Without the slash, `Url::join` would replace the last path segment
/// instead of appending to it.
fn parse_base_url(raw: &str) -> crate::Result<Url> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };

    Url::parse(&with_slash).map_err(|e| {
        crate::PipeguardError::Config(format!("PIPEGUARD_BASE_URL {raw:?} is not a valid URL: {e}"))
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
