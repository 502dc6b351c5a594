//! Error taxonomy for validation failures and remote API errors.

use http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Stable error code strings shared with the server's error envelope.
///
/// Use these constants for compile-time safety when matching codes.
pub mod code {
    /// Authentication failed (HTTP 401).
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    /// The requested resource does not exist (HTTP 404).
    pub const NOT_FOUND: &str = "NOT_FOUND";
    /// The request was malformed (HTTP 400).
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    /// An input failed validation, client-side or server-side.
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    /// The server failed, or answered something this client cannot map.
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

/// Error type for all client operations.
///
/// A closed set: client-side validation failures, the server-mapped kinds
/// from the API's error envelope, the deferred missing-API-key failure, and
/// transport-level failures that never produced a response. Nothing here is
/// retried by the client; every failure surfaces to the caller as-is.
#[derive(Debug, Error)]
pub enum Error {
    /// No API key was configured.
    ///
    /// Raised on first use, not at construction, so a client can be built
    /// before credentials are known.
    #[error(
        "API key is required: set `Config::api_key` or the HOOKWAVE_API_KEY environment variable"
    )]
    MissingApiKey,

    /// An input was rejected, either client-side before any request was
    /// sent or by the server (HTTP 400 with a `VALIDATION_ERROR` code).
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description of the rejected input.
        message: String,
        /// Structured context (offending field, rejected value).
        details: Option<serde_json::Value>,
    },

    /// Authentication failed (HTTP 401).
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Server-supplied message.
        message: String,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("Not found: {message}")]
    NotFound {
        /// Server-supplied message.
        message: String,
    },

    /// The request was malformed (HTTP 400 without a validation code).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Server-supplied message.
        message: String,
        /// Structured context, if the server attached any.
        details: Option<serde_json::Value>,
    },

    /// The server failed (HTTP 5xx), answered with a status this client
    /// does not map, or produced a body that does not parse.
    #[error("Internal server error: {message}")]
    InternalServer {
        /// Server-supplied message, or a description of the unmappable
        /// response.
        message: String,
        /// Structured context, if the server attached any.
        details: Option<serde_json::Value>,
    },

    /// Network connection failed before a response arrived.
    ///
    /// Includes DNS resolution failures, connection refused, and other
    /// network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The request timed out.
    #[error("Request timed out")]
    Timeout,
}

/// Wire shape of the server's error envelope: `{ "error": { ... } }`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

impl Error {
    /// Creates a validation error with a message only.
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: None,
        }
    }

    /// Creates a validation error carrying structured details.
    pub(crate) fn validation_with(
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            details: Some(details),
        }
    }

    /// Translates a non-2xx response into the matching taxonomy entry.
    ///
    /// The body must parse as the server's error envelope; anything else
    /// collapses into [`Error::InternalServer`], as does any status not
    /// explicitly mapped. A 400 splits on the server code:
    /// `VALIDATION_ERROR` becomes [`Error::Validation`], everything else
    /// [`Error::BadRequest`].
    pub(crate) fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) else {
            return Self::InternalServer {
                message: format!("unexpected response from server (HTTP {status})"),
                details: None,
            };
        };
        let ErrorBody {
            message,
            code,
            details,
        } = envelope.error;

        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized { message },
            StatusCode::NOT_FOUND => Self::NotFound { message },
            StatusCode::BAD_REQUEST => {
                if code.as_deref() == Some(code::VALIDATION_ERROR) {
                    Self::Validation { message, details }
                } else {
                    Self::BadRequest { message, details }
                }
            }
            _ => Self::InternalServer { message, details },
        }
    }

    /// Returns the stable code string for API-mapped errors.
    ///
    /// Configuration and transport failures (`MissingApiKey`, `Connection`,
    /// `Timeout`) have no wire code and return `None`.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Validation { .. } => Some(code::VALIDATION_ERROR),
            Self::Unauthorized { .. } => Some(code::UNAUTHORIZED),
            Self::NotFound { .. } => Some(code::NOT_FOUND),
            Self::BadRequest { .. } => Some(code::BAD_REQUEST),
            Self::InternalServer { .. } => Some(code::INTERNAL_SERVER_ERROR),
            Self::MissingApiKey | Self::Connection(_) | Self::Timeout => None,
        }
    }

    /// Returns the HTTP status associated with API-mapped errors.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Validation { .. } | Self::BadRequest { .. } => Some(StatusCode::BAD_REQUEST),
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Self::InternalServer { .. } => Some(StatusCode::INTERNAL_SERVER_ERROR),
            Self::MissingApiKey | Self::Connection(_) | Self::Timeout => None,
        }
    }
}
