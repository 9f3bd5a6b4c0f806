//! Error types for the OneLogin sync connector
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Nothing in this crate retries or classifies errors on its own: every
//! failure is surfaced unchanged in kind, and the previous continuation token
//! stays the correct resume point.

use thiserror::Error;

/// The main error type for the connector
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    /// Credential acquisition failed. Never retried.
    #[error("Authentication failed{}: {message}", status_suffix(*status))]
    Auth {
        status: Option<u16>,
        message: String,
    },

    // ============================================================================
    // Continuation Token Errors
    // ============================================================================
    /// A supplied continuation token is structurally invalid
    #[error("Invalid continuation token: {message}")]
    Token { message: String },

    // ============================================================================
    // Backend Errors
    // ============================================================================
    /// Non-success response from a data or write endpoint
    #[error("Backend request to {endpoint} failed with HTTP {status}")]
    Backend { status: u16, endpoint: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Write Path Errors
    // ============================================================================
    /// A grant or revoke was rejected before any network call
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ============================================================================
    // Call Lifecycle
    // ============================================================================
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Unknown resource type: {name}")]
    UnknownResourceType { name: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

fn status_suffix(status: Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an auth error without an upstream status
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            status: None,
            message: message.into(),
        }
    }

    /// Create a continuation token error
    pub fn token(message: impl Into<String>) -> Self {
        Self::Token {
            message: message.into(),
        }
    }

    /// Create a backend error
    pub fn backend(status: u16, endpoint: impl Into<String>) -> Self {
        Self::Backend {
            status,
            endpoint: endpoint.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Upstream HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Auth { status, .. } => *status,
            Error::Backend { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Short stable name of the error class
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config { .. }
            | Error::MissingConfigField { .. }
            | Error::InvalidConfigValue { .. }
            | Error::YamlParse(_) => "config",
            Error::Auth { .. } => "auth",
            Error::Token { .. } => "token",
            Error::Backend { .. } => "backend",
            Error::Http(_) | Error::InvalidUrl(_) => "transport",
            Error::Decode { .. } | Error::JsonParse(_) => "decode",
            Error::Validation { .. } | Error::UnknownResourceType { .. } => "validation",
            Error::Cancelled => "cancelled",
            Error::Io(_) | Error::FileNotFound { .. } => "io",
        }
    }
}

/// Result type alias for the connector
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("client_id");
        assert_eq!(err.to_string(), "Missing required config field: client_id");

        let err = Error::backend(404, "https://acme.onelogin.com/api/2/roles");
        assert_eq!(
            err.to_string(),
            "Backend request to https://acme.onelogin.com/api/2/roles failed with HTTP 404"
        );

        let err = Error::Auth {
            status: Some(401),
            message: "token request rejected".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Authentication failed (HTTP 401): token request rejected"
        );
        assert_eq!(
            Error::auth("no token").to_string(),
            "Authentication failed: no token"
        );
    }

    #[test]
    fn test_status_preserved() {
        assert_eq!(Error::backend(429, "/x").status(), Some(429));
        assert_eq!(
            Error::Auth {
                status: Some(403),
                message: String::new()
            }
            .status(),
            Some(403)
        );
        assert_eq!(Error::token("bad").status(), None);
    }

    #[test]
    fn test_kind() {
        assert_eq!(Error::auth("x").kind(), "auth");
        assert_eq!(Error::token("x").kind(), "token");
        assert_eq!(Error::backend(500, "/x").kind(), "backend");
        assert_eq!(Error::validation("x").kind(), "validation");
        assert_eq!(Error::Cancelled.kind(), "cancelled");
        assert_eq!(Error::missing_field("subdomain").kind(), "config");
    }

    #[test]
    fn test_propagation_keeps_kind_and_status() {
        fn fetch() -> Result<()> {
            Err(Error::backend(429, "https://acme.onelogin.com/api/2/roles"))
        }
        fn call() -> Result<()> {
            fetch()?;
            Ok(())
        }

        let err = call().unwrap_err();
        assert_eq!(err.kind(), "backend");
        assert_eq!(err.status(), Some(429));
    }
}
