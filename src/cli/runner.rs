//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{ConfigOverrides, ConnectorConfig};
use crate::connector::{OneLoginConnector, ResourceTypeInfo};
use crate::error::{Error, Result};
use crate::resources::{Resource, ResourceId};
use crate::types::{EntitlementKind, ResourceTypeTag};
use serde::Serialize;
use serde_json::json;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Validate => self.validate().await,
            Commands::ResourceTypes => self.resource_types(),
            Commands::List {
                resource_type,
                parent,
                token,
            } => self.list(resource_type, parent.as_deref(), token).await,
            Commands::Entitlements { resource } => self.entitlements(resource).await,
            Commands::Sync { types } => self.sync(types.as_deref()).await,
            Commands::Grant {
                role_id,
                principal,
                kind,
            } => self.grant(role_id, principal, kind, true).await,
            Commands::Revoke {
                role_id,
                principal,
                kind,
            } => self.grant(role_id, principal, kind, false).await,
        }
    }

    /// Configuration file merged with flags and environment
    fn load_config(&self) -> Result<ConnectorConfig> {
        let config = match &self.cli.config {
            Some(path) => ConnectorConfig::from_file(path)?,
            None => ConnectorConfig::default(),
        };

        Ok(config.with_overrides(ConfigOverrides {
            client_id: self.cli.client_id.clone(),
            client_secret: self.cli.client_secret.clone(),
            subdomain: self.cli.subdomain.clone(),
            base_url: self.cli.base_url.clone(),
            page_size: None,
        }))
    }

    async fn connect(&self) -> Result<OneLoginConnector> {
        OneLoginConnector::new(&self.load_config()?).await
    }

    /// Acquire a credential and check scope; a failed check is printed, then returned
    async fn validate(&self) -> Result<()> {
        let connector = self.connect().await?;
        let result = connector.validate().await;
        let (status, message) = match &result {
            Ok(()) => ("SUCCEEDED", "Connection successful".to_string()),
            Err(e) => ("FAILED", e.to_string()),
        };
        self.output_message(&json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": { "status": status, "message": message }
        }));
        result
    }

    fn resource_types(&self) -> Result<()> {
        for tag in ResourceTypeTag::TOP_LEVEL {
            self.output_message(&ResourceTypeInfo {
                id: tag,
                display_name: tag.display_name().to_string(),
            });
        }
        Ok(())
    }

    async fn list(&self, resource_type: &str, parent: Option<&str>, token: &str) -> Result<()> {
        let resource_type: ResourceTypeTag = resource_type.parse()?;
        let connector = self.connect().await?;
        let page = connector.list(resource_type, parent, token).await?;
        self.output_message(&page);
        Ok(())
    }

    async fn entitlements(&self, resource: &str) -> Result<()> {
        let id: ResourceId = resource.parse()?;
        let connector = self.connect().await?;
        let syncer = connector.syncer(id.resource_type)?;

        let display_name = id.resource.clone();
        for entitlement in syncer.entitlements(&Resource::new(id, display_name)) {
            self.output_message(&entitlement);
        }
        Ok(())
    }

    async fn sync(&self, types: Option<&str>) -> Result<()> {
        let types = parse_types(types)?;
        let connector = self.connect().await?;

        let stats = connector
            .sync(&types, |record| self.output_message(&record))
            .await?;
        self.output_message(&json!({ "type": "STATS", "stats": stats }));
        Ok(())
    }

    async fn grant(&self, role_id: &str, principal: &str, kind: &str, add: bool) -> Result<()> {
        let principal: ResourceId = principal.parse()?;
        let kind: EntitlementKind = kind.parse()?;
        let connector = self.connect().await?;

        if add {
            connector.grant(role_id, &principal, kind).await?;
        } else {
            connector.revoke(role_id, &principal, kind).await?;
        }

        info!(role_id, principal = %principal, kind = %kind, granted = add, "Role assignment updated");
        self.output_message(&json!({
            "type": if add { "GRANTED" } else { "REVOKED" },
            "role_id": role_id,
            "principal": principal.to_string(),
            "entitlement": kind.slug(),
        }));
        Ok(())
    }

    /// Output a message
    fn output_message<T: Serialize + ?Sized>(&self, msg: &T) {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg),
            OutputFormat::Pretty => serde_json::to_string_pretty(msg),
        };
        println!("{}", line.unwrap_or_default());
    }
}

/// Comma-separated resource types; empty means every top-level type
fn parse_types(types: Option<&str>) -> Result<Vec<ResourceTypeTag>> {
    let Some(types) = types.filter(|t| !t.trim().is_empty()) else {
        return Ok(ResourceTypeTag::TOP_LEVEL.to_vec());
    };

    types
        .split(',')
        .map(|name| {
            let tag: ResourceTypeTag = name.trim().parse()?;
            if tag.is_top_level() {
                Ok(tag)
            } else {
                Err(Error::UnknownResourceType {
                    name: name.trim().to_string(),
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_types() {
        assert_eq!(parse_types(None).unwrap(), ResourceTypeTag::TOP_LEVEL.to_vec());
        assert_eq!(
            parse_types(Some("role, group")).unwrap(),
            vec![ResourceTypeTag::Role, ResourceTypeTag::Group]
        );
        assert!(matches!(
            parse_types(Some("role-apps")),
            Err(Error::UnknownResourceType { .. })
        ));
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "client_id: file-id\nclient_secret: file-secret\nsubdomain: file-sub").unwrap();

        let cli = Cli::try_parse_from([
            "onelogin-sync",
            "--config",
            file.path().to_str().unwrap(),
            "--client-id",
            "flag-id",
            "--base-url",
            "http://127.0.0.1:9000",
            "resource-types",
        ])
        .unwrap();

        let config = Runner::new(cli).load_config().unwrap();
        assert_eq!(config.client_id, "flag-id");
        assert_eq!(config.client_secret, "file-secret");
        assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:9000"));
    }

    #[tokio::test]
    async fn test_grant_rejects_unknown_kind_before_connecting() {
        let cli = Cli::try_parse_from(["onelogin-sync", "grant", "7", "user:42", "owner"]).unwrap();
        let err = Runner::new(cli).run().await.unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[tokio::test]
    async fn test_validate_returns_failed_scope_check() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/oauth2/v2/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"access_token": "tok"})),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/2/connectors"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&mock_server)
            .await;

        let uri = mock_server.uri();
        let cli = Cli::try_parse_from([
            "onelogin-sync",
            "--client-id",
            "a",
            "--client-secret",
            "b",
            "--subdomain",
            "acme",
            "--base-url",
            uri.as_str(),
            "validate",
        ])
        .unwrap();

        let err = Runner::new(cli).run().await.unwrap_err();
        assert_eq!(err.kind(), "backend");
        assert_eq!(err.status(), Some(403));
    }
}
