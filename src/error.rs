// src/error.rs
//! Application error types with structured error handling.
//!
//! Two failure families exist: configuration problems, which abort the
//! build before any request leaves the process, and content-fetch failures,
//! which abort the page being built. Absent content is not an error and
//! has no variant here.

use std::fmt;
use thiserror::Error;

/// Content hub error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubErrorCode {
    /// Token missing, malformed or revoked
    InvalidCredentials,
    /// Token valid but not allowed to read this content
    InsufficientPermissions,
    /// Too many requests
    RateLimited,
    /// Hub internal failure
    InternalError,
    /// Hub temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl HubErrorCode {
    /// Parse an error code string reported by the hub.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "INVALID_AUTHORIZATION_HEADER" | "INVALID_API_TOKEN" | "UNAUTHORIZED" => {
                Self::InvalidCredentials
            }
            "INSUFFICIENT_PERMISSIONS" | "FORBIDDEN" => Self::InsufficientPermissions,
            "RATE_LIMIT_EXCEEDED" | "TOO_MANY_REQUESTS" => Self::RateLimited,
            "INTERNAL_SERVER_ERROR" => Self::InternalError,
            "SERVICE_UNAVAILABLE" | "MAINTENANCE_MODE" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 => Self::InvalidCredentials,
            403 => Self::InsufficientPermissions,
            429 => Self::RateLimited,
            500 => Self::InternalError,
            502..=504 => Self::ServiceUnavailable,
            other => Self::HttpStatus(other),
        }
    }

    /// Whether the failure is transient. Retrying is left to the build orchestrator.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError
        )
    }

    /// Whether the failure points at the configured credential.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::InsufficientPermissions)
    }
}

impl fmt::Display for HubErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid_credentials"),
            Self::InsufficientPermissions => write!(f, "insufficient_permissions"),
            Self::RateLimited => write!(f, "rate_limited"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Why a single query against the content hub failed.
#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("query rejected by the hub schema: {}", messages.join("; "))]
    QueryRejected { messages: Vec<String> },

    #[error("hub returned an error ({code}, HTTP {status}): {message}")]
    Service {
        code: HubErrorCode,
        status: u16,
        message: String,
    },

    #[error("response could not be decoded: {0}")]
    Malformed(String),
}

impl FetchFailure {
    /// Whether the call ran out of time before the hub answered.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(e) if e.is_timeout())
    }
}

impl From<serde_json::Error> for FetchFailure {
    fn from(err: serde_json::Error) -> Self {
        FetchFailure::Malformed(err.to_string())
    }
}

impl From<crate::types::ValidationError> for FetchFailure {
    fn from(err: crate::types::ValidationError) -> Self {
        FetchFailure::Malformed(err.to_string())
    }
}

/// A failed fetch, reported together with the query that caused it.
#[derive(Error, Debug)]
#[error("content fetch for query '{query}' failed: {failure}")]
pub struct ContentFetchError {
    /// Name of the failing query
    pub query: String,
    /// Full GraphQL text sent to the hub, kept for diagnosis
    pub query_text: String,
    #[source]
    pub failure: FetchFailure,
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Query '{query}' does not match the hub schema: {reason}")]
    InvalidQuery { query: String, reason: String },

    #[error("Preview mode denied: {0}")]
    PreviewDenied(String),

    #[error("Cannot load content fixture {path}: {message}")]
    FixtureLoad { path: String, message: String },

    #[error(transparent)]
    ContentFetch(#[from] ContentFetchError),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template render error for template {name}: {message}")]
    TemplateRenderError { name: String, message: String },

    #[error("Failed to serialize page artifact: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AppError {
    /// Configuration failures abort the build before any fetch happens.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AppError::MissingConfiguration(_)
                | AppError::InvalidQuery { .. }
                | AppError::PreviewDenied(_)
                | AppError::FixtureLoad { .. }
                | AppError::Validation(_)
        )
    }

    /// Process exit status for this failure; never zero.
    pub fn exit_code(&self) -> u8 {
        if self.is_configuration() {
            2
        } else {
            1
        }
    }
}

// Allow converting from anyhow::Error, preserving the message
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError {
            message: format!("{:#}", err),
            source: None,
        }
    }
}
