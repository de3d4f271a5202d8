use thiserror::Error;

use crate::transport::HttpError;

/// Error types for the Netro API client.
#[derive(Error, Debug)]
pub enum NetroError {
    /// The API rejected the device key, either with HTTP 401/403 or with an
    /// error envelope that reads like an authorization problem.
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// The API answered with a non-OK envelope.
    #[error("API error: {0}")]
    ApiError(String),

    /// HTTP request failed, or the server answered with an error status.
    #[error("HTTP error: {0}")]
    HttpError(#[from] HttpError),

    /// The response body was not a JSON object.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),
}

impl NetroError {
    /// Returns `true` for errors caused by a rejected device key.
    pub fn is_auth(&self) -> bool {
        matches!(self, NetroError::AuthenticationError(_))
    }
}

/// Result type for Netro API operations.
pub type NetroResult<T> = Result<T, NetroError>;
