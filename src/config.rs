//! Connector configuration
//!
//! Loaded from a YAML (or JSON) file, then overridden by command-line flags,
//! which clap also fills from `BATON_CLIENT_ID`, `BATON_CLIENT_SECRET`, and
//! `BATON_SUBDOMAIN`.

use crate::api::Endpoints;
use crate::auth::ClientCredentials;
use crate::engine::SyncConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Connector Config
// ============================================================================

/// Complete connector configuration
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectorConfig {
    /// OAuth client id
    #[serde(default)]
    pub client_id: String,

    /// OAuth client secret
    #[serde(default)]
    pub client_secret: String,

    /// Tenant subdomain (`<subdomain>.onelogin.com`)
    #[serde(default)]
    pub subdomain: String,

    /// Override of the tenant base URL
    #[serde(default)]
    pub base_url: Option<String>,

    /// Page size sent on list requests
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Maximum backend fetches per sync call
    #[serde(default = "default_fetch_budget")]
    pub fetch_budget: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Client-side pacing (disabled when unset)
    #[serde(default)]
    pub requests_per_second: Option<u32>,
}

fn default_page_size() -> u32 {
    100
}

fn default_fetch_budget() -> usize {
    2
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            subdomain: String::new(),
            base_url: None,
            page_size: default_page_size(),
            fetch_budget: default_fetch_budget(),
            timeout_secs: default_timeout_secs(),
            requests_per_second: None,
        }
    }
}

impl fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("subdomain", &self.subdomain)
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .field("fetch_budget", &self.fetch_budget)
            .field("timeout_secs", &self.timeout_secs)
            .field("requests_per_second", &self.requests_per_second)
            .finish()
    }
}

impl ConnectorConfig {
    /// Config with the three required values and defaults elsewhere
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        subdomain: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            subdomain: subdomain.into(),
            ..Self::default()
        }
    }

    /// Load from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse from a YAML (or JSON) string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply command-line overrides; set values win
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(v) = overrides.client_id {
            self.client_id = v;
        }
        if let Some(v) = overrides.client_secret {
            self.client_secret = v;
        }
        if let Some(v) = overrides.subdomain {
            self.subdomain = v;
        }
        if let Some(v) = overrides.base_url {
            self.base_url = Some(v);
        }
        if let Some(v) = overrides.page_size {
            self.page_size = v;
        }
        self
    }

    /// Check required fields and ranges
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("subdomain", &self.subdomain),
        ] {
            if value.trim().is_empty() {
                return Err(Error::missing_field(field));
            }
        }

        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }
        if self.fetch_budget == 0 {
            return Err(Error::invalid_value("fetch_budget", "must be at least 1"));
        }
        if self.requests_per_second == Some(0) {
            return Err(Error::invalid_value(
                "requests_per_second",
                "must be at least 1 when set",
            ));
        }
        Ok(())
    }

    /// Endpoint catalogue for this tenant
    pub fn endpoints(&self) -> Result<Endpoints> {
        match &self.base_url {
            Some(base) => Endpoints::new(base),
            None => Endpoints::for_subdomain(&self.subdomain),
        }
    }

    /// Client credentials for the token request
    pub fn credentials(&self) -> ClientCredentials {
        ClientCredentials::new(&self.client_id, &self.client_secret)
    }

    /// HTTP client settings
    pub fn http_client_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder().timeout(Duration::from_secs(self.timeout_secs));
        match self.requests_per_second {
            Some(rps) => builder.rate_limit(RateLimiterConfig::per_second(rps)),
            None => builder.no_rate_limit(),
        }
        .build()
    }

    /// Engine settings
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig::new()
            .with_page_size(self.page_size)
            .with_fetch_budget(self.fetch_budget)
    }
}

// ============================================================================
// Overrides
// ============================================================================

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub subdomain: Option<String>,
    pub base_url: Option<String>,
    pub page_size: Option<u32>,
}
