//! Authenticator implementation
//!
//! Performs the single client-credentials token request and applies the
//! resulting bearer credential to outgoing requests.

use super::types::{ClientCredentials, Credential, GrantBody};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use reqwest::RequestBuilder;
use serde::Deserialize;
use tracing::{debug, info};

/// Authenticator acquires the bearer credential from the token endpoint
#[derive(Debug, Clone)]
pub struct Authenticator {
    /// HTTP client for the token request (must not carry a credential)
    http_client: HttpClient,
    /// Token endpoint URL
    token_url: String,
}

impl Authenticator {
    /// Create an authenticator for the given token endpoint
    pub fn new(http_client: HttpClient, token_url: impl Into<String>) -> Self {
        Self {
            http_client,
            token_url: token_url.into(),
        }
    }

    /// Exchange client credentials for an access token.
    ///
    /// One POST, no retry. Any non-2xx response becomes `Error::Auth` with the
    /// upstream status preserved.
    pub async fn acquire(
        &self,
        credentials: &ClientCredentials,
        subdomain: &str,
    ) -> Result<Credential> {
        debug!("Requesting access token from {}", self.token_url);

        let config = RequestConfig::new()
            .header("Authorization", credentials.authorization_header())
            .json(serde_json::to_value(GrantBody::client_credentials())?);

        let response = match self.http_client.post_with_config(&self.token_url, config).await {
            Ok(response) => response,
            Err(Error::Backend { status, .. }) => {
                return Err(Error::Auth {
                    status: Some(status),
                    message: "token request rejected".to_string(),
                });
            }
            Err(e) => return Err(Error::auth(format!("token request failed: {e}"))),
        };

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::auth(format!("invalid token response: {e}")))?;

        if token_response.access_token.is_empty() {
            return Err(Error::auth("token response carried an empty access_token"));
        }

        let credential = Credential::new(token_response.access_token, subdomain);
        info!(subdomain, acquired_at = %credential.acquired_at(), "Acquired access token");
        Ok(credential)
    }

    /// Token endpoint URL
    pub fn token_url(&self) -> &str {
        &self.token_url
    }
}

impl Credential {
    /// Attach the bearer token to a request
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(self.access_token())
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}
