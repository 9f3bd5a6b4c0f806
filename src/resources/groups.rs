//! Group syncer

use super::types::{Entitlement, Grant, Resource, ResourceId};
use super::{assignment, ensure_type, payload};
use crate::api::{BaseResource, Group};
use crate::connector::ResourceSyncer;
use crate::engine::{ListScope, Page, SyncEngine};
use crate::error::Result;
use crate::types::{EntitlementKind, ResourceTypeTag};
use async_trait::async_trait;

/// Syncs OneLogin groups and their members
#[derive(Debug, Clone)]
pub struct GroupSyncer {
    engine: SyncEngine,
}

impl GroupSyncer {
    /// Create a group syncer
    pub fn new(engine: SyncEngine) -> Self {
        Self { engine }
    }
}

fn group_resource(group: &Group) -> Resource {
    let name = group.name.clone().unwrap_or_default();
    Resource::new(
        ResourceId::new(ResourceTypeTag::Group, group.id.to_string()),
        &name,
    )
    .with_profile("group_id", group.id)
    .with_profile("group_name", name)
}

#[async_trait]
impl ResourceSyncer for GroupSyncer {
    fn resource_type(&self) -> ResourceTypeTag {
        ResourceTypeTag::Group
    }

    async fn list(&self, token: &str) -> Result<Page<Resource>> {
        let scope = ListScope::resources(ResourceTypeTag::Group)?;
        self.engine
            .list(&scope, token)
            .await?
            .try_map(|item| payload::<Group>(item).map(|group| group_resource(&group)))
    }

    fn entitlements(&self, resource: &Resource) -> Vec<Entitlement> {
        vec![assignment(
            resource,
            EntitlementKind::Member,
            &[ResourceTypeTag::User],
        )]
    }

    async fn grants(&self, resource: &ResourceId, token: &str) -> Result<Page<Grant>> {
        ensure_type(resource, ResourceTypeTag::Group)?;
        let scope = ListScope::grants(ResourceTypeTag::Group, resource.resource.clone())?;
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
