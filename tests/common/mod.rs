#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, StatusCode};
use netro_client::{
    check_status, HttpError, HttpTransport, NetroClient, NetroConfig, ReqwestTransport,
    TransportResponse,
};
use serde_json::{json, Value};

/// Path prefix the mock server serves the API under.
pub const API_ROOT: &str = "/npa/v1";

/// Device serial used throughout the tests.
pub const SERIAL: &str = "SN123";

pub fn api_path(endpoint: &str) -> String {
    format!("{API_ROOT}/{endpoint}")
}

/// Set up a reqwest-backed client pointing at the mock server.
pub fn setup_test_client(mock_server_uri: &str) -> NetroClient<ReqwestTransport> {
    NetroClient::builder()
        .base_url(format!("{mock_server_uri}{API_ROOT}"))
        .build()
        .expect("Failed to build NetroClient")
}

pub fn ok_envelope(data: Value) -> Value {
    json!({ "status": "OK", "data": data, "meta": {} })
}

/// A request as seen by [`RecordingTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: HeaderMap,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Duration,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Respond {
        status: StatusCode,
        body: String,
        status_check: bool,
    },
    Fail(String),
}

/// Test double that records every request and answers with a canned reply.
#[derive(Debug, Clone)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    reply: Reply,
}

impl RecordingTransport {
    pub fn replying(status: u16, body: impl Into<String>) -> Self {
        Self {
            requests: Arc::default(),
            reply: Reply::Respond {
                status: StatusCode::from_u16(status).expect("valid status code"),
                body: body.into(),
                status_check: true,
            },
        }
    }

    pub fn replying_json(status: u16, body: &Value) -> Self {
        Self::replying(status, body.to_string())
    }

    /// Every request fails before a response arrives.
    pub fn failing(reason: &str) -> Self {
        Self {
            requests: Arc::default(),
            reply: Reply::Fail(reason.to_string()),
        }
    }

    /// Makes `error_for_status` succeed whatever the status code.
    pub fn without_status_check(mut self) -> Self {
        if let Reply::Respond { status_check, .. } = &mut self.reply {
            *status_check = false;
        }
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request was recorded")
    }

    fn record(&self, request: RecordedRequest) -> Result<StubResponse, HttpError> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        match &self.reply {
            Reply::Respond {
                status,
                body,
                status_check,
            } => Ok(StubResponse {
                url,
                status: *status,
                body: body.clone(),
                status_check: *status_check,
            }),
            Reply::Fail(reason) => Err(HttpError::request(reason.clone())),
        }
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    type Response = StubResponse;

    async fn get(
        &self,
        url: &str,
        headers: HeaderMap,
        params: &[(String, String)],
        timeout: Duration,
    ) -> Result<StubResponse, HttpError> {
        self.record(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            headers,
            params: params.to_vec(),
            body: None,
            timeout,
        })
    }

    async fn post(
        &self,
        url: &str,
        headers: HeaderMap,
        body: &Value,
        timeout: Duration,
    ) -> Result<StubResponse, HttpError> {
        self.record(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            headers,
            params: Vec::new(),
            body: Some(body.clone()),
            timeout,
        })
    }
}

#[derive(Debug)]
pub struct StubResponse {
    url: String,
    status: StatusCode,
    body: String,
    status_check: bool,
}

#[async_trait]
impl TransportResponse for StubResponse {
    fn status(&self) -> StatusCode {
        self.status
    }

    fn error_for_status(&self) -> Result<(), HttpError> {
        if self.status_check {
            check_status(self.status, &self.url)
        } else {
            Ok(())
        }
    }

    async fn text(self) -> Result<String, HttpError> {
        Ok(self.body)
    }
}

/// A client over a [`RecordingTransport`] with the default configuration
/// pointed at a fake host.
pub fn recording_client(transport: RecordingTransport) -> NetroClient<RecordingTransport> {
    let config = NetroConfig {
        base_url: "https://netro.test/npa/v1/".to_string(),
        ..NetroConfig::default()
    };
    NetroClient::new(transport, config).expect("valid configuration")
}

/// Loads `tests/reference_data/<name>` if it exists.
pub fn load_reference(name: &str) -> Option<Value> {
    let file = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("reference_data")
        .join(name);
    let raw = std::fs::read_to_string(file).ok()?;
    Some(serde_json::from_str(&raw).expect("reference file is valid JSON"))
}

/// Checks that every field of `reference` also appears in `actual`.
pub fn assert_has_reference_fields(actual: &Value, reference: &Value) {
    let reference = reference.as_object().expect("reference must be an object");
    for field in reference.keys() {
        assert!(actual.get(field).is_some(), "missing expected field: {field}");
    }
}

/// Validates a `get_info` envelope for a soil sensor.
pub fn assert_sensor_info(envelope: &netro_client::Envelope, serial: &str) {
    assert_eq!(envelope.status(), Some("OK"));
    assert!(envelope.meta().is_some(), "envelope should carry meta");

    let data = envelope.data().expect("envelope should carry data");
    assert!(data.get("device").is_none(), "sensor response should not contain 'device'");

    let sensor = data.get("sensor").expect("sensor response should contain 'sensor'");
    assert_eq!(sensor["serial"], json!(serial));
    for field in ["name", "status", "battery_level"] {
        assert!(sensor.get(field).is_some(), "sensor is missing {field}");
    }
    assert!(sensor.get("zone_num").is_none(), "sensor should not have zone_num");

    let battery_level = sensor["battery_level"].as_f64().expect("battery_level should be numeric");
    assert!((0.0..=1.0).contains(&battery_level), "battery_level should be between 0 and 1");
}

/// Validates a `get_info` envelope for a controller.
pub fn assert_controller_info(envelope: &netro_client::Envelope, serial: &str) {
    assert_eq!(envelope.status(), Some("OK"));
    assert!(envelope.meta().is_some(), "envelope should carry meta");

    let data = envelope.data().expect("envelope should carry data");
    assert!(data.get("sensor").is_none(), "controller response should not contain 'sensor'");

    let device = data.get("device").expect("controller response should contain 'device'");
    assert_eq!(device["serial"], json!(serial));
    assert!(device.get("zone_num").is_some(), "controller should have zone_num");

    let zones = device["zones"].as_array().expect("zones should be a list");
    assert!(!zones.is_empty(), "controller should have at least one zone");
    for zone in zones {
        for field in ["name", "ith", "enabled", "smart"] {
            assert!(zone.get(field).is_some(), "zone is missing {field}");
        }
    }
}
