//! Data service tests against a mock asset server.

mod common;

use futures_util::StreamExt;
use pipeguard::models::payload::{NOT_AN_ARRAY, PIPE_BROKE};
use pipeguard::models::{ErrorKind, ServicePayload};
use pipeguard::service::{DataService, FetchError};
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{asset_server, service_for};

#[tokio::test]
async fn test_good_data_emits_ok_payload_once() {
    let server = asset_server().await;
    let items: Vec<_> = service_for(&server)
        .get_data("gooddata.json", 1)
        .collect()
        .await;

    assert_eq!(
        items,
        vec![Ok(ServicePayload::Ok(vec![json!("a"), json!("b")]))]
    );
}

#[tokio::test]
async fn test_limit_counts_emissions_not_elements() {
    let server = asset_server().await;
    let payload = service_for(&server)
        .fetch("gooddata.json", 5)
        .await
        .expect("good data should not fail");

    // One request, one emission, both elements kept.
    assert_eq!(payload, Some(ServicePayload::Ok(vec![json!("a"), json!("b")])));
}

#[tokio::test]
async fn test_bad_url_is_rewrapped_with_message() {
    let server = asset_server().await;
    let err = service_for(&server)
        .fetch("badurl.json", 1)
        .await
        .expect_err("missing resource should fail");

    assert_eq!(err.kind, ErrorKind::TransportFailure);
    let message = err.payload.message().expect("error payload carries a message");
    assert!(message.starts_with("Http failure response for"), "{message}");
    assert!(message.contains("/assets/badurl.json"), "{message}");
    assert!(message.contains("404"), "{message}");
}

#[tokio::test]
async fn test_bad_data_is_rejected_as_invalid_shape() {
    let server = asset_server().await;
    let err = service_for(&server)
        .fetch("baddata.json", 1)
        .await
        .expect_err("object body should fail");

    assert_eq!(err.kind, ErrorKind::InvalidShape);
    assert_eq!(err.payload, ServicePayload::error(NOT_AN_ARRAY));
}

#[tokio::test]
async fn test_negative_limit_is_caught_by_outer_boundary() {
    let server = asset_server().await;
    let payload = service_for(&server)
        .fetch("goodata.json", -1)
        .await
        .expect("outer boundary resolves instead of failing");

    assert_eq!(payload, Some(ServicePayload::error(PIPE_BROKE)));
}

#[tokio::test]
async fn test_negative_limit_never_reaches_the_in_flow_boundary() {
    let server = asset_server().await;
    let result = service_for(&server).build_pipeline("gooddata.json", -1);

    match result {
        Err(err @ FetchError::ArgumentOutOfRange { .. }) => {
            assert!(err.kind().is_construction_time());
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("pipeline should not build with a negative limit"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_transport_failure() {
    let server = asset_server().await;
    let err = service_for(&server)
        .fetch("garbage.json", 1)
        .await
        .expect_err("non-JSON body should fail");

    assert_eq!(err.kind, ErrorKind::TransportFailure);
    assert!(
        err.payload
            .message()
            .unwrap()
            .starts_with("Http failure during parsing for")
    );
}

#[tokio::test]
async fn test_zero_limit_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/assets/gooddata.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let payload = service_for(&server)
        .fetch("gooddata.json", 0)
        .await
        .expect("zero limit does not fail");

    assert_eq!(payload, None);
    // `expect(0)` is verified when the server drops.
}

#[tokio::test]
async fn test_each_call_issues_its_own_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/assets/gooddata.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"["a","b"]"#))
        .expect(2)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let first = service.fetch("gooddata.json", 1).await.unwrap();
    let second = service.fetch("gooddata.json", 1).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unreachable_host_is_transport_failure() {
    // Nothing listens on the discard port.
    let service = DataService::new(Url::parse("http://127.0.0.1:9/assets/").unwrap()).unwrap();
    let err = service
        .fetch("gooddata.json", 1)
        .await
        .expect_err("connection should be refused");

    assert_eq!(err.kind, ErrorKind::TransportFailure);
    assert!(err.payload.message().unwrap().contains("127.0.0.1:9"));
}
