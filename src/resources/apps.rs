//! App syncer

use super::types::{Entitlement, Grant, Resource, ResourceId};
use super::{assignment, ensure_type, payload};
use crate::api::{App, BaseResource};
use crate::connector::ResourceSyncer;
use crate::engine::{ListScope, Page, SyncEngine};
use crate::error::Result;
use crate::types::{EntitlementKind, ResourceTypeTag};
use async_trait::async_trait;

/// Syncs OneLogin apps and their user assignments
#[derive(Debug, Clone)]
pub struct AppSyncer {
    engine: SyncEngine,
}

impl AppSyncer {
    /// Create an app syncer
    pub fn new(engine: SyncEngine) -> Self {
        Self { engine }
    }
}

fn app_resource(app: &App) -> Resource {
    let name = app.name.clone().unwrap_or_default();
    Resource::new(ResourceId::app(app.id), &name)
        .with_profile("app_id", app.id)
        .with_profile("app_name", name)
}

#[async_trait]
impl ResourceSyncer for AppSyncer {
    fn resource_type(&self) -> ResourceTypeTag {
        ResourceTypeTag::App
    }

    async fn list(&self, token: &str) -> Result<Page<Resource>> {
        let scope = ListScope::resources(ResourceTypeTag::App)?;
        self.engine
            .list(&scope, token)
            .await?
            .try_map(|item| payload::<App>(item).map(|app| app_resource(&app)))
    }

    fn entitlements(&self, resource: &Resource) -> Vec<Entitlement> {
        vec![assignment(
            resource,
            EntitlementKind::Member,
            &[ResourceTypeTag::User],
        )]
    }

    async fn grants(&self, resource: &ResourceId, token: &str) -> Result<Page<Grant>> {
        ensure_type(resource, ResourceTypeTag::App)?;
        let scope = ListScope::grants(ResourceTypeTag::App, resource.resource.clone())?;
        self.engine.list(&scope, token).await?.try_map(|item| {
            let user: BaseResource = payload(item)?;
            Ok(Grant::new(
                resource.clone(),
                EntitlementKind::Member,
                ResourceId::user(user.id),
            ))
        })
    }
}
