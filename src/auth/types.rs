//! Credential types
//!
//! Secrets never appear in `Debug` output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Client-credentials pair used against the token endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    /// Client ID
    pub client_id: String,
    /// Client secret
    pub client_secret: String,
}

impl ClientCredentials {
    /// Create a new credentials pair
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Value of the `Authorization` header sent to the token endpoint
    pub fn authorization_header(&self) -> String {
        format!(
            "client_id:{},client_secret:{}",
            self.client_id, self.client_secret
        )
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Bearer credential held for the lifetime of the connector.
///
/// Immutable after construction, so it can be shared across concurrent calls.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    access_token: String,
    subdomain: String,
    acquired_at: DateTime<Utc>,
}

impl Credential {
    /// Create a credential acquired now
    pub fn new(access_token: impl Into<String>, subdomain: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            subdomain: subdomain.into(),
            acquired_at: Utc::now(),
        }
    }

    /// The bearer token
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The tenant subdomain the token was issued for
    pub fn subdomain(&self) -> &str {
        &self.subdomain
    }

    /// When the token was acquired
    pub fn acquired_at(&self) -> DateTime<Utc> {
        self.acquired_at
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("subdomain", &self.subdomain)
            .field("acquired_at", &self.acquired_at)
            .finish()
    }
}

/// Token request body
#[derive(Debug, Serialize)]
pub(crate) struct GrantBody {
    pub grant_type: &'static str,
}

impl GrantBody {
    pub(crate) fn client_credentials() -> Self {
        Self {
            grant_type: "client_credentials",
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_authorization_header_format() {
        let creds = ClientCredentials::new("abc", "s3cret");
        assert_eq!(
            creds.authorization_header(),
            "client_id:abc,client_secret:s3cret"
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = ClientCredentials::new("abc", "s3cret");
        let debug = format!("{creds:?}");
        assert!(debug.contains("abc"));
        assert!(!debug.contains("s3cret"));

        let credential = Credential::new("tok-123", "acme");
        let debug = format!("{credential:?}");
        assert!(debug.contains("acme"));
        assert!(!debug.contains("tok-123"));
    }

    #[test]
    fn test_grant_body() {
        let body = serde_json::to_value(GrantBody::client_credentials()).unwrap();
        assert_eq!(body, serde_json::json!({"grant_type": "client_credentials"}));
    }
}
