//! HTTP transport abstraction.
//!
//! The client never talks to the network itself. It hands fully-built
//! requests to an [`HttpTransport`] and interprets the [`TransportResponse`]
//! it gets back, which lets callers plug in their own HTTP stack or a test
//! double.
//!
//! A response owns the underlying connection. It is released when the
//! response is consumed by [`TransportResponse::text`] /
//! [`TransportResponse::json`] or simply dropped, which also covers early
//! returns and cancelled futures.

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::NetroResult;

#[cfg(feature = "reqwest-transport")]
mod reqwest_transport;

#[cfg(feature = "reqwest-transport")]
pub use reqwest_transport::{ReqwestResponse, ReqwestTransport};

/// Errors raised by the transport layer.
#[derive(Error, Debug)]
pub enum HttpError {
    /// The server answered with a 4xx or 5xx status.
    #[error("HTTP status {} ({status}) for url ({url})", status_class(.status))]
    Status { status: StatusCode, url: String },

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(#[source] Box<dyn StdError + Send + Sync>),
}

impl HttpError {
    /// Wraps any transport-specific failure.
    pub fn request(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        HttpError::Request(err.into())
    }

    /// The HTTP status that caused this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            HttpError::Request(_) => None,
        }
    }
}

fn status_class(status: &StatusCode) -> &'static str {
    if status.is_server_error() {
        "server error"
    } else {
        "client error"
    }
}

/// Fails with [`HttpError::Status`] for 4xx/5xx statuses and leaves everything
/// else alone.
///
/// Transport implementations can use this to back
/// [`TransportResponse::error_for_status`].
pub fn check_status(status: StatusCode, url: &str) -> Result<(), HttpError> {
    if status.is_client_error() || status.is_server_error() {
        return Err(HttpError::Status {
            status,
            url: url.to_string(),
        });
    }
    Ok(())
}

/// Minimal async HTTP capability required by [`NetroClient`](crate::NetroClient).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// The response handle produced by this transport.
    type Response: TransportResponse;

    /// Sends a GET request with the given query parameters.
    async fn get(
        &self,
        url: &str,
        headers: HeaderMap,
        params: &[(String, String)],
        timeout: Duration,
    ) -> Result<Self::Response, HttpError>;

    /// Sends a POST request with a JSON body.
    async fn post(
        &self,
        url: &str,
        headers: HeaderMap,
        body: &Value,
        timeout: Duration,
    ) -> Result<Self::Response, HttpError>;
}

/// A response whose headers have arrived but whose body may still be in flight.
#[async_trait]
pub trait TransportResponse: Send + Sized {
    /// The HTTP status code.
    fn status(&self) -> StatusCode;

    /// Fails when the status is a client or server error.
    fn error_for_status(&self) -> Result<(), HttpError>;

    /// Reads the whole body as text, releasing the connection.
    async fn text(self) -> Result<String, HttpError>;

    /// Reads the whole body and parses it as JSON.
    async fn json(self) -> NetroResult<Value> {
        let body = self.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
