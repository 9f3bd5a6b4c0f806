//! User syncer and manager email cache

use super::types::{Entitlement, Grant, Resource, ResourceId, UserStatus};
use super::{ensure_type, payload};
use crate::api::{BaseResource, OneLoginClient, User};
use crate::connector::ResourceSyncer;
use crate::engine::{ListScope, Page, SyncEngine};
use crate::error::Result;
use crate::types::ResourceTypeTag;
use async_trait::async_trait;
use futures::TryStreamExt;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// How long a loaded manager email table stays fresh
pub const MANAGER_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

// ============================================================================
// Manager Email Cache
// ============================================================================

#[derive(Debug, Default)]
struct CacheState {
    emails: HashMap<i64, String>,
    loaded_at: Option<Instant>,
}

/// User id -> email table used to resolve manager emails.
///
/// Reloaded by a full user traversal once older than its TTL. The mutex only
/// guards this table.
#[derive(Debug)]
pub struct ManagerEmailCache {
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl Default for ManagerEmailCache {
    fn default() -> Self {
        Self::new(MANAGER_CACHE_TTL)
    }
}

impl ManagerEmailCache {
    /// Create an empty cache
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Email of `user_id`, reloading the table first if it is stale
    pub async fn email_for(&self, engine: &SyncEngine, user_id: i64) -> Result<Option<String>> {
        let mut state = self.state.lock().await;

        let fresh = state
            .loaded_at
            .is_some_and(|at| at.elapsed() < self.ttl);
        if !fresh {
            state.emails = load_emails(engine).await?;
            state.loaded_at = Some(Instant::now());
            debug!(users = state.emails.len(), "Loaded manager email table");
        }

        Ok(state.emails.get(&user_id).cloned())
    }

    /// Number of users in the loaded table
    pub async fn cached_users(&self) -> usize {
        self.state.lock().await.emails.len()
    }
}

async fn load_emails(engine: &SyncEngine) -> Result<HashMap<i64, String>> {
    let scope = ListScope::resources(ResourceTypeTag::User)?;
    let mut batches = Box::pin(engine.stream(scope));
    let mut emails = HashMap::new();

    while let Some(batch) = batches.try_next().await? {
        for item in batch {
            let user: User = payload(item)?;
            if let Some(email) = user.email.filter(|e| !e.is_empty()) {
                emails.insert(user.id, email);
            }
        }
    }

    Ok(emails)
}

// ============================================================================
// User Syncer
// ============================================================================

/// Syncs OneLogin users
#[derive(Debug, Clone)]
pub struct UserSyncer {
    engine: SyncEngine,
    client: OneLoginClient,
    managers: Arc<ManagerEmailCache>,
}

impl UserSyncer {
    /// Create a user syncer
    pub fn new(engine: SyncEngine, client: OneLoginClient) -> Self {
        Self {
            engine,
            client,
            managers: Arc::new(ManagerEmailCache::default()),
        }
    }

    /// Use a specific manager cache
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<ManagerEmailCache>) -> Self {
        self.managers = cache;
        self
    }
}

/// Map a fully fetched user
pub(crate) fn user_resource(user: &User, manager_email: Option<String>) -> Resource {
    let mut resource = Resource::new(ResourceId::user(user.id), user.display_name())
        .with_profile("user_id", user.id.to_string())
        .with_profile("login", user.username.clone().unwrap_or_default())
        .with_profile("first_name", user.firstname.clone().unwrap_or_default())
        .with_profile("last_name", user.lastname.clone().unwrap_or_default())
        .with_profile("email", user.email.clone().unwrap_or_default())
        .with_status(UserStatus::from_code(user.status));

    if let Some(manager_id) = user.manager_user_id {
        resource = resource.with_profile("manager_user_id", manager_id.to_string());
    }
    if let Some(email) = manager_email {
        resource = resource.with_profile("manager_email", email);
    }

    resource
}

#[async_trait]
impl ResourceSyncer for UserSyncer {
    fn resource_type(&self) -> ResourceTypeTag {
        ResourceTypeTag::User
    }

    async fn list(&self, token: &str) -> Result<Page<Resource>> {
        let scope = ListScope::resources(ResourceTypeTag::User)?;
        let page = self.engine.list(&scope, token).await?;

        let mut resources = Vec::with_capacity(page.items.len());
        for item in page.items {
            let listed: BaseResource = payload(item)?;

            let user = match self.client.get_user_by_id(&listed.id.to_string()).await {
                Ok(user) => user,
                Err(e) => {
                    warn!(user_id = listed.id, error = %e, "Skipping user, lookup failed");
                    continue;
                }
            };

            let manager_email = match user.manager_user_id {
                Some(manager_id) => self.managers.email_for(&self.engine, manager_id).await?,
                None => None,
            };

            resources.push(user_resource(&user, manager_email));
        }

        Ok(Page::new(resources, page.next_token))
    }

    fn entitlements(&self, _resource: &Resource) -> Vec<Entitlement> {
        Vec::new()
    }

    async fn grants(&self, resource: &ResourceId, token: &str) -> Result<Page<Grant>> {
        ensure_type(resource, ResourceTypeTag::User)?;
        let scope = ListScope::grants(ResourceTypeTag::User, resource.resource.clone())?;
        let page = self.engine.list(&scope, token).await?;
        Ok(Page::new(Vec::new(), page.next_token))
    }
}
