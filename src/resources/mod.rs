//! Resource mapping module
//!
//! Turns engine pages into the resource/entitlement/grant graph, one syncer
//! per top-level resource type.
//!
//! # Overview
//!
//! - `UserSyncer` - users, re-fetched by id, with manager email lookup
//! - `RoleSyncer` - roles; grants walk members, admins, and apps
//! - `AppSyncer` - apps; grants are app user assignments
//! - `GroupSyncer` - groups; grants are group memberships

mod apps;
mod groups;
mod roles;
mod types;
mod users;

pub use apps::AppSyncer;
pub use groups::GroupSyncer;
pub use roles::RoleSyncer;
pub use types::{Entitlement, Grant, Resource, ResourceId, UserStatus};
pub use users::{ManagerEmailCache, UserSyncer, MANAGER_CACHE_TTL};

use crate::engine::PhaseItem;
use crate::error::{Error, Result};
use crate::types::{EntitlementKind, ResourceTypeTag};
use serde::de::DeserializeOwned;

/// Deserialize an item payload into an upstream model
pub(crate) fn payload<T: DeserializeOwned>(item: PhaseItem) -> Result<T> {
    let phase = item.phase;
    serde_json::from_value(item.payload)
        .map_err(|e| Error::decode(format!("unexpected {phase} payload: {e}")))
}

/// Reject a resource id of the wrong type before any request
pub(crate) fn ensure_type(id: &ResourceId, expected: ResourceTypeTag) -> Result<()> {
    if id.resource_type == expected {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "expected a {expected} resource, got {id}"
        )))
    }
}

/// Assignment entitlement on `resource`
pub(crate) fn assignment(
    resource: &Resource,
    kind: EntitlementKind,
    grantable_to: &[ResourceTypeTag],
) -> Entitlement {
    let label = resource.id.resource_type.display_name();
    let name = &resource.display_name;
    let description = match kind {
        EntitlementKind::Member => format!("Access to {name} {label} in OneLogin"),
        EntitlementKind::Admin => format!("Admin access to {name} {label} in OneLogin"),
    };

    Entitlement {
        resource: resource.id.clone(),
        kind,
        display_name: format!("{name} {label} {kind}"),
        description,
        grantable_to: grantable_to.to_vec(),
    }
}
