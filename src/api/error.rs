//! Error types for the forms backend client.

use thiserror::Error;

/// Errors that can occur when talking to the forms backend.
///
/// Every variant carries the endpoint name so log lines identify which
/// of the calls failed without a backtrace.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the connection failed.
    #[error("{endpoint}: network error - {message}")]
    Network {
        endpoint: &'static str,
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("{endpoint}: HTTP {status}")]
    Http { endpoint: &'static str, status: u16 },

    /// The response body did not match the expected shape.
    #[error("{endpoint}: invalid response - {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },
}

impl ApiError {
    /// Create a network error for an endpoint.
    pub fn network(endpoint: &'static str, message: impl Into<String>) -> Self {
        ApiError::Network {
            endpoint,
            message: message.into(),
        }
    }

    /// Create an HTTP status error for an endpoint.
    pub fn http(endpoint: &'static str, status: u16) -> Self {
        ApiError::Http { endpoint, status }
    }

    /// Create a decode error for an endpoint.
    pub fn decode(endpoint: &'static str, message: impl Into<String>) -> Self {
        ApiError::Decode {
            endpoint,
            message: message.into(),
        }
    }

    /// Get the endpoint name for this error.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ApiError::Network { endpoint, .. } => endpoint,
            ApiError::Http { endpoint, .. } => endpoint,
            ApiError::Decode { endpoint, .. } => endpoint,
        }
    }

    /// Get the HTTP status if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
