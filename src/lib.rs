//! Staged fetch pipeline with two-tier error normalization.
//!
//! A [`DataService`](service::DataService) issues a single GET, checks that
//! the body is a JSON array, caps the number of emissions, and normalizes
//! every failure into a `{ status, data }` envelope. A
//! [`ClickHandler`](handler::ClickHandler) consumes that pipeline the way a
//! UI button would, and coerces whatever arrives into a displayable list.

pub mod config;
pub mod error;
pub mod handler;
pub mod models;
pub mod scenario;
pub mod service;
pub mod tui;

pub use error::{PipeguardError, Result};
