use std::fmt;
use std::time::Duration;

use http::header::{HeaderName, ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, StatusCode};
use log::{debug, warn};
#[cfg(feature = "reqwest-transport")]
use reqwest::Client as ReqwestClient;
use serde::Serialize;

use crate::api::device::DeviceApi;
use crate::api::sensor::SensorApi;
use crate::models::envelope::Envelope;
use crate::models::requests::to_query;
use crate::transport::{HttpTransport, TransportResponse};
#[cfg(feature = "reqwest-transport")]
use crate::transport::ReqwestTransport;
use crate::{NetroError, NetroResult};

/// Base URL of the Netro Public API, version 1.
pub const DEFAULT_BASE_URL: &str = "https://api.netrohome.com/npa/v1";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const JSON: &str = "application/json";

/// Settings shared by every request a [`NetroClient`] sends.
#[derive(Clone, Debug)]
pub struct NetroConfig {
    /// API root. Trailing slashes are ignored.
    pub base_url: String,
    /// Timeout handed to the transport for each request.
    pub timeout: Duration,
    /// Headers added to every request. They take precedence over the
    /// client's own `Accept` and `Content-Type` defaults.
    pub extra_headers: Vec<(String, String)>,
}

impl Default for NetroConfig {
    fn default() -> Self {
        NetroConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            extra_headers: Vec::new(),
        }
    }
}

/// Builder for a [`NetroClient`] backed by [`ReqwestTransport`].
///
/// Validation happens in [`build`](NetroClientBuilder::build); no request is
/// sent.
#[cfg(feature = "reqwest-transport")]
#[derive(Default)]
pub struct NetroClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    extra_headers: Vec<(String, String)>,
    user_agent: Option<String>,
    http_client: Option<ReqwestClient>,
}

#[cfg(feature = "reqwest-transport")]
impl NetroClientBuilder {
    /// Sets the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Sets a custom user agent string.
    ///
    /// Ignored when a custom client is supplied with
    /// [`http_client`](NetroClientBuilder::http_client).
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets a custom reqwest client (e.g., for testing or custom middleware).
    pub fn http_client(mut self, http_client: ReqwestClient) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn build(self) -> NetroResult<NetroClient<ReqwestTransport>> {
        let config = NetroConfig {
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            extra_headers: self.extra_headers,
        };

        let transport = match self.http_client {
            Some(custom_client) => ReqwestTransport::from_client(custom_client),
            None => ReqwestTransport::new(self.user_agent.as_deref())?,
        };

        NetroClient::new(transport, config)
    }
}

/// Async client for the Netro Public API.
///
/// The client holds no per-call state: every method sends exactly one request
/// through the transport and either returns the response [`Envelope`] or
/// fails. Sharing one instance between tasks is fine.
#[derive(Clone)]
pub struct NetroClient<T> {
    base_url: String,
    timeout: Duration,
    get_headers: HeaderMap,
    post_headers: HeaderMap,
    transport: T,
}

impl<T> fmt::Debug for NetroClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Header values may carry credentials, so only the names are shown.
        let header_names: Vec<&str> = self.post_headers.keys().map(HeaderName::as_str).collect();

        f.debug_struct("NetroClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("headers", &header_names)
            .finish()
    }
}

#[cfg(feature = "reqwest-transport")]
impl NetroClient<ReqwestTransport> {
    pub fn builder() -> NetroClientBuilder {
        NetroClientBuilder::default()
    }
}

impl<T: HttpTransport> NetroClient<T> {
    /// Creates a client that sends its requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`NetroError::ConfigurationError`] if the base URL is empty once
    /// trailing slashes are removed, or if an extra header is not a valid HTTP
    /// header.
    pub fn new(transport: T, config: NetroConfig) -> NetroResult<Self> {
        let base_url = config.base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(NetroError::ConfigurationError("Base URL is required".into()));
        }

        let mut get_headers = HeaderMap::new();
        get_headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        for (name, value) in &config.extra_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                NetroError::ConfigurationError(format!("Invalid header name '{name}': {e}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                NetroError::ConfigurationError(format!("Invalid value for header '{name}': {e}"))
            })?;
            get_headers.insert(header_name, header_value);
        }

        let mut post_headers = get_headers.clone();
        post_headers.entry(CONTENT_TYPE).or_insert(HeaderValue::from_static(JSON));

        Ok(NetroClient {
            base_url: base_url.to_string(),
            timeout: config.timeout,
            get_headers,
            post_headers,
            transport,
        })
    }

    /// The API root, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The timeout passed to the transport with every request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Gets the device (controller and sensor) API interface.
    pub fn devices(&self) -> DeviceApi<'_, T> {
        DeviceApi::new(self)
    }

    /// Gets the sensor API interface.
    pub fn sensors(&self) -> SensorApi<'_, T> {
        SensorApi::new(self)
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Sends a GET request with `query` encoded as query parameters.
    pub(crate) async fn get<Q>(&self, endpoint: &str, query: &Q) -> NetroResult<Envelope>
    where
        Q: Serialize,
    {
        let params = to_query(query)?;
        let url = self.endpoint_url(endpoint);
        debug!("GET {url}");

        let response = self
            .transport
            .get(&url, self.get_headers.clone(), &params, self.timeout)
            .await?;

        self.handle(response).await
    }

    /// Sends a POST request with `body` as JSON.
    pub(crate) async fn post<B>(&self, endpoint: &str, body: &B) -> NetroResult<Envelope>
    where
        B: Serialize,
    {
        let body = serde_json::to_value(body)?;
        let url = self.endpoint_url(endpoint);
        debug!("POST {url}");

        let response = self
            .transport
            .post(&url, self.post_headers.clone(), &body, self.timeout)
            .await?;

        self.handle(response).await
    }

    /// Turns an HTTP response into the envelope or a classified error.
    async fn handle(&self, response: T::Response) -> NetroResult<Envelope> {
        let status = response.status();
        debug!("Netro API responded with status {status}");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!("Netro API rejected the device key with status {status}");
            let message = match response.error_for_status() {
                Err(e) => e.to_string(),
                // Only with a transport whose status check disagrees with the code.
                Ok(()) => "Authentication failed".to_string(),
            };
            return Err(NetroError::AuthenticationError(message));
        }

        response.error_for_status()?;

        let body = response.json().await?;
        let envelope: Envelope = serde_json::from_value(body)?;

        match envelope.failure_message() {
            Some(message) => Err(classify_failure(message)),
            None => Ok(envelope),
        }
    }
}

/// Some authorization problems come back as a 200 with an error envelope.
fn classify_failure(message: String) -> NetroError {
    let lowered = message.to_lowercase();
    if lowered.contains("auth") || lowered.contains("invalid key") {
        warn!("Netro API reported an authorization problem: {message}");
        NetroError::AuthenticationError(message)
    } else {
        NetroError::ApiError(message)
    }
}
