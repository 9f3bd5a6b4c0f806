//! Role syncer

use super::types::{Entitlement, Grant, Resource, ResourceId};
use super::{assignment, ensure_type, payload};
use crate::api::{App, Role, UserUnderRole};
use crate::connector::ResourceSyncer;
use crate::engine::{ListScope, Page, PhaseItem, SyncEngine};
use crate::error::{Error, Result};
use crate::types::{EntitlementKind, ResourceTypeTag};
use async_trait::async_trait;

/// Syncs OneLogin roles and their member, admin, and app assignments
#[derive(Debug, Clone)]
pub struct RoleSyncer {
    engine: SyncEngine,
}

impl RoleSyncer {
    /// Create a role syncer
    pub fn new(engine: SyncEngine) -> Self {
        Self { engine }
    }
}

fn role_resource(role: &Role) -> Resource {
    let name = role.name.clone().unwrap_or_default();
    Resource::new(ResourceId::new(ResourceTypeTag::Role, role.id.to_string()), &name)
        .with_profile("role_id", role.id)
        .with_profile("role_name", name)
}

/// Grant for one item of a role's grant traversal
fn role_grant(role: &ResourceId, item: PhaseItem) -> Result<Grant> {
    match item.phase {
        ResourceTypeTag::RoleMembers => {
            let user: UserUnderRole = payload(item)?;
            Ok(Grant::new(role.clone(), EntitlementKind::Member, ResourceId::user(user.id)))
        }
        ResourceTypeTag::RoleAdmins => {
            let user: UserUnderRole = payload(item)?;
            Ok(Grant::new(role.clone(), EntitlementKind::Admin, ResourceId::user(user.id)))
        }
        // Apps attached to a role hold its admin entitlement.
        ResourceTypeTag::RoleApps => {
            let app: App = payload(item)?;
            Ok(Grant::new(role.clone(), EntitlementKind::Admin, ResourceId::app(app.id)))
        }
        other => Err(Error::token(format!("'{other}' is not a role grant phase"))),
    }
}

#[async_trait]
impl ResourceSyncer for RoleSyncer {
    fn resource_type(&self) -> ResourceTypeTag {
        ResourceTypeTag::Role
    }

    async fn list(&self, token: &str) -> Result<Page<Resource>> {
        let scope = ListScope::resources(ResourceTypeTag::Role)?;
        self.engine
            .list(&scope, token)
            .await?
            .try_map(|item| payload::<Role>(item).map(|role| role_resource(&role)))
    }

    fn entitlements(&self, resource: &Resource) -> Vec<Entitlement> {
        let grantable = [ResourceTypeTag::User, ResourceTypeTag::App];
        vec![
            assignment(resource, EntitlementKind::Member, &grantable),
            assignment(resource, EntitlementKind::Admin, &grantable),
        ]
    }

    async fn grants(&self, resource: &ResourceId, token: &str) -> Result<Page<Grant>> {
        ensure_type(resource, ResourceTypeTag::Role)?;
        let scope = ListScope::grants(ResourceTypeTag::Role, resource.resource.clone())?;
        self.engine
            .list(&scope, token)
            .await?
            .try_map(|item| role_grant(resource, item))
    }
}
