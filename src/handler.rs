//! Button click handling.
//!
//! [`ClickHandler`] subscribes to a [`DataService`] pipeline and trusts
//! nothing about what comes back. If the pipeline still fails, a recovery
//! stage substitutes an empty error envelope. Whatever envelope arrives is
//! then forced into a list before it is displayed, so the display code
//! never needs to care which failure happened.

use std::fmt;

use futures_util::{Stream, StreamExt};
use serde_json::Value;
use tracing::{info, warn};

use crate::models::{Displayed, Envelope, EnvelopeShapeError, ErrorKind, ServicePayload, Status};
use crate::service::{DataService, PipelineError};

/// Something the handler wants the user (or the log) to know.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    /// The pipeline failed and the recovery envelope was substituted.
    Recovered { kind: ErrorKind, message: String },
    /// An error envelope arrived; `data` is shown as received.
    Alert { data: Value },
    /// A success envelope arrived.
    AllIsWell,
    /// `data` did not match `status` and was coerced.
    UnknownShape(EnvelopeShapeError),
    /// The final, list-shaped result.
    Displayed(Displayed),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Recovered { kind, message } => write!(f, "recovered from {kind}: {message}"),
            Notice::Alert { data } => write!(f, "Alert the user nicely somehow! {data}"),
            Notice::AllIsWell => f.write_str("All is well, move along"),
            Notice::UnknownShape(e) => write!(f, "{}: {e}", e.kind()),
            // Always a list by the time it is displayed.
            Notice::Displayed(d) => write!(f, "true {}", d.data_json()),
        }
    }
}

/// Receives the handler's notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices as `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Recovered { kind, message } => {
                warn!(kind = %kind, message = %message, "Data request failed, substituting empty error envelope");
            }
            Notice::Alert { data } => warn!(data = %data, "Alert the user nicely somehow!"),
            Notice::AllIsWell => info!("All is well, move along"),
            Notice::UnknownShape(e) => warn!(kind = %e.kind(), error = %e, "Coercing envelope data"),
            Notice::Displayed(displayed) => info!(
                status = %displayed.status,
                is_array = true,
                data = %displayed.data_json(),
                "Displaying result"
            ),
        }
    }
}

/// What a single click ended up displaying.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClickReport {
    /// One entry per envelope received, in order.
    pub displayed: Vec<Displayed>,
    /// Set when the recovery stage had to step in.
    pub recovered_from: Option<ErrorKind>,
}

impl ClickReport {
    /// Returns `true` if the click displayed nothing (a zero limit).
    pub fn is_empty(&self) -> bool {
        self.displayed.is_empty()
    }
}

/// Drives one data request per click.
#[derive(Clone, Debug)]
pub struct ClickHandler<N = TracingNotifier> {
    service: DataService,
    notifier: N,
}

impl ClickHandler<TracingNotifier> {
    /// Creates a handler that logs through `tracing`.
    #[must_use]
    pub fn new(service: DataService) -> Self {
        Self::with_notifier(service, TracingNotifier)
    }
}

impl<N: Notifier> ClickHandler<N> {
    #[must_use]
    pub fn with_notifier(service: DataService, notifier: N) -> Self {
        Self { service, notifier }
    }

    /// Fetches `resource` and displays every envelope that comes back.
    ///
    /// Never fails; every outcome is an entry in the report.
    pub async fn on_click(&self, resource: &str, limit: i64) -> ClickReport {
        info!(resource, limit, "Button clicked");
        let payloads = self.service.get_data(resource, limit);
        self.handle_stream(payloads).await
    }

    /// Consumes a payload stream with the recovery stage attached.
    ///
    /// The first failure is replaced by [`Envelope::recovery`] and ends the
    /// stream, as a replacement source would.
    pub async fn handle_stream<S>(&self, payloads: S) -> ClickReport
    where
        S: Stream<Item = std::result::Result<ServicePayload, PipelineError>>,
    {
        let mut payloads = std::pin::pin!(payloads);
        let mut report = ClickReport::default();

        while let Some(item) = payloads.next().await {
            match item {
                Ok(payload) => report.displayed.push(self.display(payload.into())),
                Err(err) => {
                    self.notifier.notify(Notice::Recovered {
                        kind: err.kind,
                        message: err.payload.message().unwrap_or_default().to_string(),
                    });
                    report.recovered_from = Some(err.kind);
                    report.displayed.push(self.display(Envelope::recovery()));
                    break;
                }
            }
        }

        report
    }

    /// Branches on `status`, then forces `data` into a list.
    pub fn display(&self, envelope: Envelope) -> Displayed {
        match envelope.status {
            Status::Error => self.notifier.notify(Notice::Alert {
                data: envelope.data.clone(),
            }),
            Status::Ok => self.notifier.notify(Notice::AllIsWell),
        }

        if let Err(e) = envelope.clone().into_payload() {
            self.notifier.notify(Notice::UnknownShape(e));
        }

        let displayed = envelope.coerce();
        self.notifier.notify(Notice::Displayed(displayed.clone()));
        displayed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use futures_util::stream;
    use serde_json::json;
    use url::Url;

    use super::*;

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Notice>>>);

    impl Notifier for Recorder {
        fn notify(&self, notice: Notice) {
            self.0.lock().unwrap().push(notice);
        }
    }

    impl Recorder {
        fn notices(&self) -> Vec<Notice> {
            self.0.lock().unwrap().clone()
        }
    }

    fn handler() -> (ClickHandler<Recorder>, Recorder) {
        let recorder = Recorder::default();
        let service = DataService::with_client(
            reqwest::Client::new(),
            Url::parse("http://127.0.0.1:9/").unwrap(),
        );
        (ClickHandler::with_notifier(service, recorder.clone()), recorder)
    }

    #[test]
    fn ok_envelope_passes_through() {
        let (handler, recorder) = handler();
        let displayed = handler.display(Envelope::new(Status::Ok, json!(["a", "b"])));

        assert_eq!(displayed.data, vec![json!("a"), json!("b")]);
        assert_eq!(recorder.notices()[0], Notice::AllIsWell);
        assert_eq!(recorder.notices().len(), 2);
    }

    #[test]
    fn error_message_is_alerted_then_emptied() {
        let (handler, recorder) = handler();
        let displayed = handler.display(ServicePayload::not_an_array().into());

        assert_eq!(displayed.status, Status::Error);
        assert!(displayed.data.is_empty());
        assert_eq!(
            recorder.notices()[0],
            Notice::Alert {
                data: json!("Payload not an array!")
            }
        );
        // A string message is the expected shape for an error envelope.
        assert!(
            !recorder
                .notices()
                .iter()
                .any(|n| matches!(n, Notice::UnknownShape(_)))
        );
    }

    #[test]
    fn ok_with_non_list_data_is_flagged() {
        let (handler, recorder) = handler();
        let displayed = handler.display(Envelope::new(Status::Ok, Value::Null));

        assert!(displayed.data.is_empty());
        assert!(
            recorder
                .notices()
                .iter()
                .any(|n| matches!(n, Notice::UnknownShape(e) if e.found == "null"))
        );
    }

    #[tokio::test]
    async fn failure_is_recovered_and_ends_the_stream() {
        let (handler, recorder) = handler();
        let failure = PipelineError {
            kind: ErrorKind::TransportFailure,
            payload: ServicePayload::error("Http failure response for x: 404 Not Found"),
        };
        let items = stream::iter(vec![
            Err(failure),
            Ok(ServicePayload::Ok(vec![json!(1)])),
        ]);

        let report = handler.handle_stream(items).await;

        assert_eq!(report.recovered_from, Some(ErrorKind::TransportFailure));
        assert_eq!(report.displayed.len(), 1);
        assert_eq!(report.displayed[0].status, Status::Error);
        assert!(report.displayed[0].data.is_empty());
        assert!(matches!(
            recorder.notices()[0],
            Notice::Recovered {
                kind: ErrorKind::TransportFailure,
                ..
            }
        ));
    }

    #[test]
    fn notices_render_like_console_lines() {
        let displayed = Displayed {
            status: Status::Ok,
            data: vec![json!("a"), json!("b")],
        };
        assert_eq!(Notice::Displayed(displayed).to_string(), r#"true ["a","b"]"#);
        assert_eq!(Notice::AllIsWell.to_string(), "All is well, move along");
    }
}
