// src/error.rs

//! Unified error handling for the client.
//!
//! [`ApiError`] is what every backend call fails with: a small closed
//! taxonomy plus a message a caller can show as-is. [`AppError`] covers the
//! local side (configuration, session file, form validation) and wraps
//! [`ApiError`] so a front-end can propagate both with `?`.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::constants::messages;

/// Result type alias for local operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for backend calls.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failure categories for backend calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// No response was received.
    #[serde(rename = "network-error")]
    Network,
    /// 401: the session is gone.
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 422
    ValidationFailed,
    /// Any other non-2xx status.
    #[serde(rename = "generic-server-error")]
    Server,
    /// Anything that is neither a transport failure nor an HTTP status.
    #[serde(rename = "unexpected-error")]
    Unexpected,
}

impl ErrorKind {
    /// Fixed message for the category.
    pub fn message(self) -> &'static str {
        match self {
            Self::Network => messages::NETWORK_ERROR,
            Self::Unauthorized => messages::UNAUTHORIZED,
            Self::Forbidden => messages::FORBIDDEN,
            Self::NotFound => messages::NOT_FOUND,
            Self::ValidationFailed => messages::VALIDATION_ERROR,
            Self::Server => messages::SERVER_ERROR,
            Self::Unexpected => messages::UNEXPECTED_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Network => "network-error",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not-found",
            Self::ValidationFailed => "validation-failed",
            Self::Server => "generic-server-error",
            Self::Unexpected => "unexpected-error",
        };
        f.write_str(name)
    }
}

/// Uniform error for backend calls.
///
/// `status` is the HTTP status, or `0` when no response was received.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    /// Error for a received non-2xx response.
    pub fn http(kind: ErrorKind, status: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
            details: None,
        }
    }

    /// Error for a request that got no response.
    pub fn network() -> Self {
        Self::http(ErrorKind::Network, 0, messages::NETWORK_ERROR)
    }

    /// Error for any other failure, keeping the original message.
    pub fn unexpected(message: impl fmt::Display) -> Self {
        let message = message.to_string();
        let message = if message.trim().is_empty() {
            messages::UNEXPECTED_ERROR.to_string()
        } else {
            message
        };
        Self::http(ErrorKind::Unexpected, 0, message)
    }

    /// Attach server-provided details.
    pub fn with_details(mut self, details: Option<Value>) -> Self {
        self.details = details;
        self
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Backend call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Form data rejected before sending
    #[error("Validation error: {0}")]
    Validation(String),

    /// Session store error
    #[error("Session error: {0}")]
    Session(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a session store error.
    pub fn session(message: impl fmt::Display) -> Self {
        Self::Session(message.to_string())
    }
}
