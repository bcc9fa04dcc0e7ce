//! Shared test utilities: a mock asset server and a recording notifier.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use pipeguard::handler::{ClickHandler, Notice, Notifier};
use pipeguard::service::DataService;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GOOD_DATA_JSON: &str = include_str!("../fixtures/gooddata.json");
pub const BAD_DATA_JSON: &str = include_str!("../fixtures/baddata.json");
pub const NOT_JSON: &str = include_str!("../fixtures/not_json.txt");

/// Starts a server that hosts the demo assets under `/assets/`.
///
/// `gooddata.json` and `baddata.json` are served; anything else is a 404.
/// `garbage.json` answers 200 with a body that is not JSON.
pub async fn asset_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/assets/gooddata.json"))
        .respond_with(json_body(GOOD_DATA_JSON))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/assets/baddata.json"))
        .respond_with(json_body(BAD_DATA_JSON))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/assets/garbage.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NOT_JSON))
        .mount(&server)
        .await;

    server
}

fn json_body(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "application/json")
        .set_body_string(body)
}

/// Base URL of the mock server's asset directory.
pub fn assets_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/assets/", server.uri())).expect("mock server URI is a valid URL")
}

pub fn service_for(server: &MockServer) -> DataService {
    DataService::new(assets_url(server)).expect("failed to build HTTP client")
}

/// Collects every notice a handler emits.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Notice>>>);

impl Notifier for Recorder {
    fn notify(&self, notice: Notice) {
        self.0.lock().unwrap().push(notice);
    }
}

impl Recorder {
    pub fn notices(&self) -> Vec<Notice> {
        self.0.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.notices().iter().map(ToString::to_string).collect()
    }
}

pub fn recording_handler(server: &MockServer) -> (ClickHandler<Recorder>, Recorder) {
    let recorder = Recorder::default();
    let handler = ClickHandler::with_notifier(service_for(server), recorder.clone());
    (handler, recorder)
}
