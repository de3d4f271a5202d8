use std::time::Duration;

use netro_client::{NetroClient, NetroConfig, NetroError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

mod common;

use common::RecordingTransport;

fn config_with_base(base_url: &str) -> NetroConfig {
    NetroConfig {
        base_url: base_url.to_string(),
        ..NetroConfig::default()
    }
}

#[test]
fn test_empty_base_url_rejected() {
    // What it tests: Construction fails for base URLs that are empty once trailing slashes
    // are removed, before any request is sent.
    //
    // Why it's valuable: A missing base URL would otherwise only surface as confusing
    // transport errors on the first call.
    for base_url in ["", "/", "///"] {
        let transport = RecordingTransport::replying(200, "{}");
        match NetroClient::new(transport, config_with_base(base_url)) {
            Err(NetroError::ConfigurationError(msg)) => assert_eq!(msg, "Base URL is required"),
            other => panic!("expected ConfigurationError for {base_url:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_trailing_slashes_trimmed() {
    for (base_url, expected) in [
        ("https://api.netrohome.com/npa/v1", "https://api.netrohome.com/npa/v1"),
        ("https://api.netrohome.com/npa/v1/", "https://api.netrohome.com/npa/v1"),
        ("http://localhost:8080//", "http://localhost:8080"),
        ("x", "x"),
    ] {
        let transport = RecordingTransport::replying(200, "{}");
        let client = NetroClient::new(transport, config_with_base(base_url)).unwrap();
        assert_eq!(client.base_url(), expected);
    }
}

#[test]
fn test_default_config() {
    let config = NetroConfig::default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.base_url, "https://api.netrohome.com/npa/v1");
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert!(config.extra_headers.is_empty());
}

#[test]
fn test_invalid_extra_header_rejected() {
    let config = NetroConfig {
        extra_headers: vec![("bad header".to_string(), "value".to_string())],
        ..NetroConfig::default()
    };
    match NetroClient::new(RecordingTransport::replying(200, "{}"), config) {
        Err(NetroError::ConfigurationError(msg)) => {
            assert!(msg.contains("Invalid header name 'bad header'"));
        }
        other => panic!("expected ConfigurationError, got {other:?}"),
    }

    let config = NetroConfig {
        extra_headers: vec![("x-note".to_string(), "line\nbreak".to_string())],
        ..NetroConfig::default()
    };
    match NetroClient::new(RecordingTransport::replying(200, "{}"), config) {
        Err(NetroError::ConfigurationError(msg)) => {
            assert!(msg.contains("Invalid value for header 'x-note'"));
        }
        other => panic!("expected ConfigurationError, got {other:?}"),
    }
}

#[test]
fn test_builder_defaults() {
    let client = NetroClient::builder().build().unwrap();
    assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
}

#[test]
fn test_builder_validates_base_url() {
    let err = NetroClient::builder().base_url("//").build().unwrap_err();
    assert!(matches!(err, NetroError::ConfigurationError(_)));

    let client = NetroClient::builder()
        .base_url("https://example.com/npa/v1/")
        .timeout(Duration::from_secs(3))
        .user_agent("irrigation-dashboard/1.0")
        .build()
        .unwrap();
    assert_eq!(client.base_url(), "https://example.com/npa/v1");
    assert_eq!(client.timeout(), Duration::from_secs(3));
}

#[test]
fn test_builder_accepts_custom_http_client() {
    let http_client = reqwest::Client::new();
    let client = NetroClient::builder()
        .http_client(http_client)
        .header("x-request-source", "tests")
        .build()
        .unwrap();
    assert_eq!(client.base_url(), DEFAULT_BASE_URL);
}

#[test]
fn test_debug_hides_header_values() {
    // What it tests: The Debug output lists header names but never their values.
    //
    // Why it's valuable: Extra headers often carry tokens and clients end up in logs.
    let config = NetroConfig {
        extra_headers: vec![("authorization".to_string(), "Bearer s3cret".to_string())],
        ..NetroConfig::default()
    };
    let client = NetroClient::new(RecordingTransport::replying(200, "{}"), config).unwrap();
    let debug = format!("{client:?}");
    assert!(debug.contains("authorization"));
    assert!(!debug.contains("s3cret"));
}
