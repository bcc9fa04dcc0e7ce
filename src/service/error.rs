//! Failures raised inside the data service pipeline.

use url::Url;

use crate::models::{ErrorKind, ServicePayload};

/// A raw failure, before any boundary has normalized it.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The body decoded as JSON but was not an array.
    #[error("payload is {found}, not an array")]
    InvalidShape { found: &'static str },

    /// The emission limit was negative.
    #[error("argument out of range: limit must be zero or greater, got {limit}")]
    ArgumentOutOfRange { limit: i64 },

    /// The resource could not be resolved against the base URL.
    #[error("invalid resource {resource:?}: {source}")]
    InvalidResource {
        resource: String,
        #[source]
        source: url::ParseError,
    },

    /// The request failed, returned a non-success status, or the body was
    /// not JSON.
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Builds a transport failure whose message names the requested URL.
    ///
    /// `reqwest` drops the URL from body decoding errors, so it is passed in.
    pub fn transport(source: reqwest::Error, url: &Url) -> Self {
        let message = if let Some(status) = source.status() {
            format!("Http failure response for {url}: {status}")
        } else if source.is_decode() {
            format!("Http failure during parsing for {url}")
        } else {
            format!("Http failure response for {url}: {source}")
        };
        FetchError::Transport { message, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidShape { .. } => ErrorKind::InvalidShape,
            FetchError::ArgumentOutOfRange { .. } => ErrorKind::ArgumentOutOfRange,
            FetchError::InvalidResource { .. } => ErrorKind::InvalidResource,
            FetchError::Transport { .. } => ErrorKind::TransportFailure,
        }
    }

    /// Re-wraps the failure as an error payload.
    ///
    /// A failure that already has an envelope of its own keeps it; every
    /// other failure contributes its message.
    pub fn into_payload(self) -> ServicePayload {
        match self {
            FetchError::InvalidShape { .. } => ServicePayload::not_an_array(),
            FetchError::Transport { message, .. } => ServicePayload::Error(message),
            other => ServicePayload::error(other.to_string()),
        }
    }
}

/// A normalized in-flow failure, re-raised to the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {}", .payload.message().unwrap_or_default())]
pub struct PipelineError {
    pub kind: ErrorKind,
    /// Always an [`ServicePayload::Error`].
    pub payload: ServicePayload,
}

impl From<FetchError> for PipelineError {
    fn from(err: FetchError) -> Self {
        let kind = err.kind();
        Self {
            kind,
            payload: err.into_payload(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_shape_keeps_its_own_envelope() {
        let err = FetchError::InvalidShape { found: "object" };
        assert_eq!(err.to_string(), "payload is object, not an array");

        let pipeline = PipelineError::from(err);
        assert_eq!(pipeline.kind, ErrorKind::InvalidShape);
        assert_eq!(pipeline.payload, ServicePayload::not_an_array());
        assert_eq!(pipeline.to_string(), "InvalidShape: Payload not an array!");
    }

    #[test]
    fn range_error_message_names_the_limit() {
        let err = FetchError::ArgumentOutOfRange { limit: -1 };
        assert_eq!(err.kind(), ErrorKind::ArgumentOutOfRange);
        assert_eq!(
            err.into_payload().message(),
            Some("argument out of range: limit must be zero or greater, got -1")
        );
    }

    #[test]
    fn invalid_resource_is_construction_time() {
        let source = Url::parse("http://[::1").unwrap_err();
        let err = FetchError::InvalidResource {
            resource: "http://[::1".to_string(),
            source,
        };
        assert!(err.kind().is_construction_time());
    }
}
