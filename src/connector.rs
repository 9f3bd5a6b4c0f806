//! Connector surface
//!
//! Defines the `ResourceSyncer` trait implemented per resource type, and
//! `OneLoginConnector`, which owns the credential-bearing client, the sync
//! engine, and the syncers.

use crate::api::{Endpoints, OneLoginClient};
use crate::auth::Authenticator;
use crate::config::ConnectorConfig;
use crate::engine::{ListScope, Page, PhaseItem, SyncConfig, SyncEngine, SyncStats};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::resources::{
    AppSyncer, Entitlement, Grant, GroupSyncer, Resource, ResourceId, RoleSyncer, UserSyncer,
};
use crate::types::{EntitlementKind, ResourceTypeTag};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

// ============================================================================
// Metadata
// ============================================================================

/// Description of one resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceTypeInfo {
    pub id: ResourceTypeTag,
    pub display_name: String,
}

/// Connector description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorMetadata {
    pub display_name: String,
    pub description: String,
    pub resource_types: Vec<ResourceTypeInfo>,
}

// ============================================================================
// Sync Output
// ============================================================================

/// One record emitted by a full sync
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncRecord {
    Resource(Resource),
    Entitlement(Entitlement),
    Grant(Grant),
}

// ============================================================================
// Resource Syncer Trait
// ============================================================================

/// Per resource type listing, entitlements, and grants
#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    /// Resource type handled by this syncer
    fn resource_type(&self) -> ResourceTypeTag;

    /// One page of resources
    async fn list(&self, token: &str) -> Result<Page<Resource>>;

    /// Static entitlements of a resource
    fn entitlements(&self, resource: &Resource) -> Vec<Entitlement>;

    /// One page of grants on a resource
    async fn grants(&self, resource: &ResourceId, token: &str) -> Result<Page<Grant>>;
}

// ============================================================================
// OneLogin Connector
// ============================================================================

/// The OneLogin connector
pub struct OneLoginConnector {
    client: OneLoginClient,
    engine: SyncEngine,
    syncers: Vec<Arc<dyn ResourceSyncer>>,
}

impl OneLoginConnector {
    /// Validate `config`, acquire the credential, and wire everything up.
    ///
    /// Fails immediately with `Error::Auth` if the token request is rejected.
    pub async fn new(config: &ConnectorConfig) -> Result<Self> {
        config.validate()?;

        let endpoints = config.endpoints()?;
        let http = HttpClient::with_config(config.http_client_config())?;

        let credential = Authenticator::new(http.clone(), endpoints.token()?)
            .acquire(&config.credentials(), &config.subdomain)
            .await?;

        Ok(Self::from_parts(
            http.with_credential(credential),
            endpoints,
            config.sync_config(),
        ))
    }

    /// Build from an HTTP client that already carries a credential
    pub fn from_parts(http: HttpClient, endpoints: Endpoints, sync: SyncConfig) -> Self {
        let client = OneLoginClient::new(http.clone(), endpoints.clone());
        let engine = SyncEngine::new(Arc::new(http), endpoints).with_config(sync);

        let syncers: Vec<Arc<dyn ResourceSyncer>> = vec![
            Arc::new(UserSyncer::new(engine.clone(), client.clone())),
            Arc::new(RoleSyncer::new(engine.clone())),
            Arc::new(AppSyncer::new(engine.clone())),
            Arc::new(GroupSyncer::new(engine.clone())),
        ];

        Self {
            client,
            engine,
            syncers,
        }
    }

    /// Connector description
    pub fn metadata(&self) -> ConnectorMetadata {
        ConnectorMetadata {
            display_name: "OneLogin".to_string(),
            description: "Syncs users, roles, apps, and groups from OneLogin".to_string(),
            resource_types: self
                .syncers
                .iter()
                .map(|s| ResourceTypeInfo {
                    id: s.resource_type(),
                    display_name: s.resource_type().display_name().to_string(),
                })
                .collect(),
        }
    }

    /// Check that the credential can read the API with the needed scope
    pub async fn validate(&self) -> Result<()> {
        self.client.validate_scope().await
    }

    /// Raw engine call: resources of a type when `parent_id` is `None`,
    /// grants of that resource otherwise
    pub async fn list(
        &self,
        resource_type: ResourceTypeTag,
        parent_id: Option<&str>,
        token: &str,
    ) -> Result<Page<PhaseItem>> {
        let scope = ListScope::new(resource_type, parent_id.map(str::to_string))?;
        self.engine.list(&scope, token).await
    }

    /// [`OneLoginConnector::list`] that fails with `Error::Cancelled` once
    /// `cancel` fires
    pub async fn list_cancellable(
        &self,
        resource_type: ResourceTypeTag,
        parent_id: Option<&str>,
        token: &str,
        cancel: &CancellationToken,
    ) -> Result<Page<PhaseItem>> {
        let scope = ListScope::new(resource_type, parent_id.map(str::to_string))?;
        self.engine.list_cancellable(&scope, token, cancel).await
    }

    /// All syncers, in sync order
    pub fn resource_syncers(&self) -> &[Arc<dyn ResourceSyncer>] {
        &self.syncers
    }

    /// Syncer for one resource type
    pub fn syncer(&self, resource_type: ResourceTypeTag) -> Result<Arc<dyn ResourceSyncer>> {
        self.syncers
            .iter()
            .find(|s| s.resource_type() == resource_type)
            .cloned()
            .ok_or_else(|| Error::UnknownResourceType {
                name: resource_type.to_string(),
            })
    }

    /// The sync engine
    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    /// Assign `principal` to the role as member or admin
    pub async fn grant(
        &self,
        role_id: &str,
        principal: &ResourceId,
        kind: EntitlementKind,
    ) -> Result<()> {
        ensure_user_principal(principal, "granted role membership")?;
        self.client
            .grant_role(role_id, &principal.resource, kind)
            .await
    }

    /// Remove `principal` from the role's members or admins
    pub async fn revoke(
        &self,
        role_id: &str,
        principal: &ResourceId,
        kind: EntitlementKind,
    ) -> Result<()> {
        ensure_user_principal(principal, "revoked from a role")?;
        self.client
            .revoke_role(role_id, &principal.resource, kind)
            .await
    }

    /// Drain resources, entitlements, and grants for `types`, handing each
    /// record to `sink`.
    pub async fn sync<F>(&self, types: &[ResourceTypeTag], mut sink: F) -> Result<SyncStats>
    where
        F: FnMut(SyncRecord) + Send,
    {
        let start = Instant::now();
        let mut stats = SyncStats::new();

        for resource_type in types {
            let syncer = self.syncer(*resource_type)?;
            stats.add_resource_type();

            let mut token = String::new();
            loop {
                let page = syncer.list(&token).await?;
                stats.add_call();
                stats.add_resources(page.items.len());

                for resource in page.items {
                    let id = resource.id.clone();
                    let entitlements = syncer.entitlements(&resource);

                    sink(SyncRecord::Resource(resource));
                    for entitlement in entitlements {
                        sink(SyncRecord::Entitlement(entitlement));
                    }
                    self.sync_grants(syncer.as_ref(), &id, &mut stats, &mut sink)
                        .await?;
                }

                if page.next_token.is_empty() {
                    break;
                }
                token = page.next_token;
            }
        }

        stats.set_duration(u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX));
        info!(
            resources = stats.resources,
            grants = stats.grants,
            calls = stats.calls,
            "Sync complete"
        );
        Ok(stats)
    }

    async fn sync_grants<F>(
        &self,
        syncer: &dyn ResourceSyncer,
        resource: &ResourceId,
        stats: &mut SyncStats,
        sink: &mut F,
    ) -> Result<()>
    where
        F: FnMut(SyncRecord) + Send,
    {
        let mut token = String::new();
        loop {
            let page = syncer.grants(resource, &token).await?;
            stats.add_call();
            stats.add_grants(page.items.len());

            for grant in page.items {
                sink(SyncRecord::Grant(grant));
            }

            if page.next_token.is_empty() {
                return Ok(());
            }
            token = page.next_token;
        }
    }
}

impl std::fmt::Debug for OneLoginConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OneLoginConnector")
            .field("engine", &self.engine)
            .field("syncers", &self.syncers.len())
            .finish_non_exhaustive()
    }
}

/// Only users can hold role assignments on the write path.
fn ensure_user_principal(principal: &ResourceId, action: &str) -> Result<()> {
    if principal.is_user() {
        return Ok(());
    }
    warn!(
        principal_type = %principal.resource_type,
        principal_id = %principal.resource,
        "Rejected non-user principal"
    );
    Err(Error::validation(format!(
        "only users can be {action}, got {principal}"
    )))
}
