use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, StatusCode};
use reqwest::Client as ReqwestClient;
use serde_json::Value;

use super::{check_status, HttpError, HttpTransport, TransportResponse};
use crate::{NetroError, NetroResult};

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        HttpError::Request(Box::new(err))
    }
}

/// [`HttpTransport`] backed by a [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http_client: ReqwestClient,
}

impl ReqwestTransport {
    /// Creates a transport with a fresh `reqwest` client.
    ///
    /// The user agent defaults to `netro-client/<version>`.
    pub fn new(user_agent: Option<&str>) -> NetroResult<Self> {
        let user_agent = user_agent.unwrap_or(concat!("netro-client/", env!("CARGO_PKG_VERSION")));

        let http_client = ReqwestClient::builder().user_agent(user_agent).build().map_err(|e| {
            NetroError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self { http_client })
    }

    /// Wraps an existing `reqwest` client (e.g., for custom middleware or proxies).
    pub fn from_client(http_client: ReqwestClient) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    type Response = ReqwestResponse;

    async fn get(
        &self,
        url: &str,
        headers: HeaderMap,
        params: &[(String, String)],
        timeout: Duration,
    ) -> Result<ReqwestResponse, HttpError> {
        let response = self
            .http_client
            .get(url)
            .headers(headers)
            .query(params)
            .timeout(timeout)
            .send()
            .await?;

        Ok(ReqwestResponse { inner: response })
    }

    async fn post(
        &self,
        url: &str,
        headers: HeaderMap,
        body: &Value,
        timeout: Duration,
    ) -> Result<ReqwestResponse, HttpError> {
        let response = self
            .http_client
            .post(url)
            .headers(headers)
            .json(body)
            .timeout(timeout)
            .send()
            .await?;

        Ok(ReqwestResponse { inner: response })
    }
}

/// Response handle returned by [`ReqwestTransport`].
#[derive(Debug)]
pub struct ReqwestResponse {
    inner: reqwest::Response,
}

#[async_trait]
impl TransportResponse for ReqwestResponse {
    fn status(&self) -> StatusCode {
        self.inner.status()
    }

    fn error_for_status(&self) -> Result<(), HttpError> {
        check_status(self.inner.status(), self.inner.url().as_str())
    }

    async fn text(self) -> Result<String, HttpError> {
        Ok(self.inner.text().await?)
    }
}
