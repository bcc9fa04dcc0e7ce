//! The data service's result payload and its fixed error messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Status;

/// Message used when a response body is valid JSON but not an array.
pub const NOT_AN_ARRAY: &str = "Payload not an array!";

/// Message used when the pipeline could not even be built.
pub const PIPE_BROKE: &str = "There was a bad error, the pipe completely broke";

/// Result of a data request, as produced by the data service.
///
/// On the wire this is `{"status":"OK","data":[...]}` or
/// `{"status":"ERROR","data":"..."}`. A successful payload always carries a
/// list and a failed one always carries a message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data")]
pub enum ServicePayload {
    #[serde(rename = "OK")]
    Ok(Vec<Value>),
    #[serde(rename = "ERROR")]
    Error(String),
}

impl ServicePayload {
    /// Wraps an error message.
    pub fn error(message: impl Into<String>) -> Self {
        ServicePayload::Error(message.into())
    }

    /// The payload for a body that was not an array.
    pub fn not_an_array() -> Self {
        Self::error(NOT_AN_ARRAY)
    }

    /// The payload substituted when the pipeline failed to build.
    pub fn pipe_broke() -> Self {
        Self::error(PIPE_BROKE)
    }

    pub fn status(&self) -> Status {
        match self {
            ServicePayload::Ok(_) => Status::Ok,
            ServicePayload::Error(_) => Status::Error,
        }
    }

    /// Returns the error message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ServicePayload::Ok(_) => None,
            ServicePayload::Error(message) => Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ok_payload_uses_status_and_data_fields() {
        let payload = ServicePayload::Ok(vec![json!("a"), json!("b")]);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, json!({"status": "OK", "data": ["a", "b"]}));
    }

    #[test]
    fn error_payload_carries_message_as_data() {
        let value = serde_json::to_value(ServicePayload::not_an_array()).unwrap();
        assert_eq!(value, json!({"status": "ERROR", "data": "Payload not an array!"}));
    }

    #[test]
    fn error_tagged_list_is_not_a_service_payload() {
        let result = serde_json::from_value::<ServicePayload>(json!({"status": "ERROR", "data": []}));
        assert!(result.is_err());
    }
}
