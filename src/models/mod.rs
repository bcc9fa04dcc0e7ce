//! Shared models for the `{ status, data }` result envelope.
//!
//! Contains the status tag, the strongly typed [`ServicePayload`] the data
//! service produces, the loosely typed [`Envelope`] the click handler
//! receives, and the failure taxonomy shared by both sides.

pub mod envelope;
pub mod payload;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use envelope::{Displayed, Envelope, EnvelopeShapeError};
pub use payload::ServicePayload;

/// Outcome tag carried by every envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "ERROR")]
    Error,
}

impl Status {
    /// Returns the wire-format tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Error => "ERROR",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every way a fetch can go wrong, as seen by logs and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The response body was JSON but not an array.
    InvalidShape,
    /// The emission limit was negative.
    ArgumentOutOfRange,
    /// The resource string could not be turned into a URL.
    InvalidResource,
    /// The request failed, returned a non-success status, or the body was
    /// not JSON.
    TransportFailure,
    /// An envelope whose `data` does not match its `status`.
    UnknownEnvelopeShape,
}

impl ErrorKind {
    /// Returns `true` for failures raised while the pipeline is being built,
    /// before it can emit anything.
    pub fn is_construction_time(&self) -> bool {
        matches!(
            self,
            ErrorKind::ArgumentOutOfRange | ErrorKind::InvalidResource
        )
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::InvalidShape => "InvalidShape",
            ErrorKind::ArgumentOutOfRange => "ArgumentOutOfRange",
            ErrorKind::InvalidResource => "InvalidResource",
            ErrorKind::TransportFailure => "TransportFailure",
            ErrorKind::UnknownEnvelopeShape => "UnknownEnvelopeShape",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Names the JSON type of a value, for log lines and shape errors.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
