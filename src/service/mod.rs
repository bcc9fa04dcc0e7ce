//! Data service: one GET, a shape check, an emission limit, and two layers
//! of error normalization.
//!
//! The pipeline has two failure boundaries, and they are deliberately kept
//! apart:
//!
//! - the **in-flow** boundary is a `map_err` stage on the stream itself. It
//!   only sees failures the stream actually yields (transport errors, bad
//!   payload shapes), re-wraps them as error payloads, and re-raises them.
//! - the **construction** boundary lives in [`DataService::get_data`]. It
//!   catches failures raised while the stream is being built, such as a
//!   negative emission limit. Those never flow through the stream, so the
//!   in-flow stage cannot see them.

mod error;

use futures_util::stream::{self, BoxStream, Take};
use futures_util::{Stream, StreamExt, TryStreamExt, future};
use serde_json::Value;
use tracing::{debug, error, info, warn};
use url::Url;

pub use error::{FetchError, PipelineError};

use crate::models::{ServicePayload, json_kind};

/// Stream of payloads returned to callers. Failures arrive already
/// normalized into an error payload.
pub type PayloadStream = BoxStream<'static, std::result::Result<ServicePayload, PipelineError>>;

/// Stateless wrapper around a shared HTTP client.
///
/// Cloning is cheap; every call builds an independent pipeline and nothing
/// is cached between calls.
#[derive(Clone, Debug)]
pub struct DataService {
    client: reqwest::Client,
    base_url: Url,
}

impl DataService {
    /// Creates a service that resolves relative resources against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PipeguardError::Http`](crate::PipeguardError::Http) if the
    /// HTTP client cannot be built.
    pub fn new(base_url: Url) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pipeguard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a service around an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches `resource` and emits at most `limit` payloads.
    ///
    /// This never fails outright. In-flow failures arrive as `Err` items that
    /// carry an error payload. Construction failures (a negative `limit`, an
    /// unresolvable resource) resolve to a single
    /// [`ServicePayload::pipe_broke`] item.
    pub fn get_data(&self, resource: &str, limit: i64) -> PayloadStream {
        match self.build_pipeline(resource, limit) {
            Ok(pipeline) => pipeline,
            Err(e) => {
                error!(
                    resource,
                    limit,
                    kind = %e.kind(),
                    error = %e,
                    "Data service pipeline broke before emitting"
                );
                stream::once(future::ready(Ok(ServicePayload::pipe_broke()))).boxed()
            }
        }
    }

    /// Resolves to the first payload [`get_data`](Self::get_data) emits, or
    /// `None` if the limit allowed no emissions.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`PipelineError`] for in-flow failures.
    pub async fn fetch(
        &self,
        resource: &str,
        limit: i64,
    ) -> std::result::Result<Option<ServicePayload>, PipelineError> {
        self.get_data(resource, limit).next().await.transpose()
    }

    /// Assembles the pipeline without running it.
    ///
    /// # Errors
    ///
    /// Returns a construction-time [`FetchError`] if the resource cannot be
    /// resolved or `limit` is negative.
    pub fn build_pipeline(&self, resource: &str, limit: i64) -> Result<PayloadStream, FetchError> {
        let url = self.resolve(resource)?;
        let client = self.client.clone();

        let source = stream::once(request(client, url)).map(|body| body.and_then(check_shape));
        let limited = take_checked(source, limit)?;

        Ok(limited.map_err(intercept).boxed())
    }

    /// Resolves a possibly relative resource against the base URL.
    fn resolve(&self, resource: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(resource)
            .map_err(|source| FetchError::InvalidResource {
                resource: resource.to_string(),
                source,
            })
    }
}

/// Issues the GET and decodes the body as JSON.
async fn request(client: reqwest::Client, url: Url) -> Result<Value, FetchError> {
    info!(url = %url, "Requesting resource");

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| FetchError::transport(e, &url))?;
    let response = response
        .error_for_status()
        .map_err(|e| FetchError::transport(e, &url))?;
    let body: Value = response
        .json()
        .await
        .map_err(|e| FetchError::transport(e, &url))?;

    debug!(url = %url, kind = json_kind(&body), "Received body");
    Ok(body)
}

/// Accepts only array bodies.
fn check_shape(body: Value) -> Result<ServicePayload, FetchError> {
    match body {
        Value::Array(items) => Ok(ServicePayload::Ok(items)),
        other => Err(FetchError::InvalidShape {
            found: json_kind(&other),
        }),
    }
}

/// Caps the number of emissions.
///
/// A negative limit fails here, synchronously, while the pipeline is being
/// built. `Take` never polls its source when the limit is zero, so a zero
/// limit completes without issuing the request.
fn take_checked<S: Stream>(source: S, limit: i64) -> Result<Take<S>, FetchError> {
    if limit < 0 {
        return Err(FetchError::ArgumentOutOfRange { limit });
    }
    // Limits past the address space are unbounded in practice.
    let n = usize::try_from(limit).unwrap_or(usize::MAX);
    Ok(source.take(n))
}

/// In-flow boundary: logs the failure, then re-raises it as an error payload.
fn intercept(err: FetchError) -> PipelineError {
    warn!(kind = %err.kind(), error = %err, "Error in data service pipeline");
    PipelineError::from(err)
}
