//! Caller-side views of the result envelope.
//!
//! The data service promises a [`ServicePayload`], but nothing stops a
//! recovery stage (or a backend that speaks the same envelope) from handing
//! the caller `{"status":"ERROR","data":[]}`. [`Envelope`] accepts any such
//! value; [`Displayed`] is what remains once `data` has been forced into a
//! list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ErrorKind, ServicePayload, Status, json_kind};

/// A `{ status, data }` pair whose `data` has not been checked yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: Status,
    pub data: Value,
}

/// `data` did not match what `status` promises.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("envelope tagged {status} carries {found} data")]
pub struct EnvelopeShapeError {
    pub status: Status,
    pub found: &'static str,
}

impl EnvelopeShapeError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::UnknownEnvelopeShape
    }
}

impl Envelope {
    pub fn new(status: Status, data: Value) -> Self {
        Self { status, data }
    }

    /// The stand-in used when a request fails outright: an error tag with an
    /// empty list, so subscribers can still iterate over `data`.
    pub fn recovery() -> Self {
        Self::new(Status::Error, Value::Array(Vec::new()))
    }

    /// Returns `true` when `data` is the shape `status` promises.
    pub fn is_well_formed(&self) -> bool {
        matches!(
            (self.status, &self.data),
            (Status::Ok, Value::Array(_)) | (Status::Error, Value::String(_))
        )
    }

    /// Converts into the typed payload.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeShapeError`] when `data` is not a list on an `OK`
    /// envelope or not a string on an `ERROR` envelope.
    pub fn into_payload(self) -> Result<ServicePayload, EnvelopeShapeError> {
        match (self.status, self.data) {
            (Status::Ok, Value::Array(items)) => Ok(ServicePayload::Ok(items)),
            (Status::Error, Value::String(message)) => Ok(ServicePayload::Error(message)),
            (status, other) => Err(EnvelopeShapeError {
                status,
                found: json_kind(&other),
            }),
        }
    }

    /// Forces `data` into a list, dropping anything that is not one.
    pub fn coerce(self) -> Displayed {
        let data = match self.data {
            Value::Array(items) => items,
            _ => Vec::new(),
        };
        Displayed {
            status: self.status,
            data,
        }
    }
}

impl From<ServicePayload> for Envelope {
    fn from(payload: ServicePayload) -> Self {
        match payload {
            ServicePayload::Ok(items) => Self::new(Status::Ok, Value::Array(items)),
            ServicePayload::Error(message) => Self::new(Status::Error, Value::String(message)),
        }
    }
}

/// An envelope whose `data` is guaranteed to be a list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Displayed {
    pub status: Status,
    pub data: Vec<Value>,
}

impl Displayed {
    /// Renders `data` the way the log line shows it.
    pub fn data_json(&self) -> String {
        serde_json::to_string(&self.data).unwrap_or_else(|_| "[]".to_string())
    }
}
