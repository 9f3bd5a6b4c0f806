//! Phase transition table
//!
//! Maps (scope, top frame) to what the engine does next. This is the only
//! place that knows which resource types are multi-phase.

use super::types::ListScope;
use crate::api::Endpoints;
use crate::error::{Error, Result};
use crate::pagination::Endpoint;
use crate::types::ResourceTypeTag;

/// Role grant phases in push order; the last one runs first.
pub const ROLE_PHASES: [ResourceTypeTag; 3] = [
    ResourceTypeTag::RoleMembers,
    ResourceTypeTag::RoleAdmins,
    ResourceTypeTag::RoleApps,
];

/// Action for the top frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseAction {
    /// Replace the entry frame with fresh frames, pushed in order
    Expand(Vec<ResourceTypeTag>),
    /// Fetch one page of this endpoint at the frame's cursor
    Fetch(Endpoint),
    /// Pop without fetching
    Skip,
}

/// Look up the action for `tag` within `scope`.
///
/// A frame that this scope can never produce is an `Error::Token`.
pub fn action(
    scope: &ListScope,
    tag: ResourceTypeTag,
    endpoints: &Endpoints,
) -> Result<PhaseAction> {
    use ResourceTypeTag::{App, Group, Role, RoleAdmins, RoleApps, RoleMembers, User};

    let parent = scope.parent_id.as_deref();
    let action = match (scope.resource_type, parent, tag) {
        (User, None, User) => PhaseAction::Fetch(endpoints.users()?),
        (Role, None, Role) => PhaseAction::Fetch(endpoints.roles()?),
        (App, None, App) => PhaseAction::Fetch(endpoints.apps()?),
        (Group, None, Group) => PhaseAction::Fetch(endpoints.groups()?),

        (Role, Some(_), Role) => PhaseAction::Expand(ROLE_PHASES.to_vec()),
        (Role, Some(id), RoleApps) => PhaseAction::Fetch(endpoints.role_apps(id)?),
        (Role, Some(id), RoleAdmins) => PhaseAction::Fetch(endpoints.role_admins(id)?),
        (Role, Some(id), RoleMembers) => PhaseAction::Fetch(endpoints.role_users(id)?),
        (App, Some(id), App) => PhaseAction::Fetch(endpoints.app_users(id)?),
        (Group, Some(id), Group) => PhaseAction::Fetch(endpoints.group_users(id)?),
        (User, Some(_), User) => PhaseAction::Skip,

        _ => {
            return Err(Error::token(format!(
                "frame '{tag}' cannot occur while listing {scope}"
            )))
        }
    };
    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::CursorStyle;

    fn endpoints() -> Endpoints {
        Endpoints::for_subdomain("acme").unwrap()
    }

    #[test]
    fn test_role_entry_expands_members_admins_apps() {
        let scope = ListScope::grants(ResourceTypeTag::Role, "7").unwrap();
        let action = action(&scope, ResourceTypeTag::Role, &endpoints()).unwrap();
        assert_eq!(
            action,
            PhaseAction::Expand(vec![
                ResourceTypeTag::RoleMembers,
                ResourceTypeTag::RoleAdmins,
                ResourceTypeTag::RoleApps,
            ])
        );
    }

    #[test]
    fn test_group_resources_use_body_cursor() {
        let scope = ListScope::resources(ResourceTypeTag::Group).unwrap();
        match action(&scope, ResourceTypeTag::Group, &endpoints()).unwrap() {
            PhaseAction::Fetch(endpoint) => assert_eq!(endpoint.style, CursorStyle::Body),
            other => panic!("Expected Fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_group_grants_filter_users() {
        let scope = ListScope::grants(ResourceTypeTag::Group, "55").unwrap();
        match action(&scope, ResourceTypeTag::Group, &endpoints()).unwrap() {
            PhaseAction::Fetch(endpoint) => {
                assert!(endpoint.url.ends_with("/api/2/users"));
                assert!(endpoint
                    .filters
                    .contains(&("group_id".to_string(), "55".to_string())));
            }
            other => panic!("Expected Fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_user_grants_skip() {
        let scope = ListScope::grants(ResourceTypeTag::User, "42").unwrap();
        assert_eq!(
            action(&scope, ResourceTypeTag::User, &endpoints()).unwrap(),
            PhaseAction::Skip
        );
    }

    #[test]
    fn test_foreign_frame_is_token_error() {
        let scope = ListScope::grants(ResourceTypeTag::Group, "55").unwrap();
        let err = action(&scope, ResourceTypeTag::RoleAdmins, &endpoints()).unwrap_err();
        assert_eq!(err.kind(), "token");

        let scope = ListScope::resources(ResourceTypeTag::Role).unwrap();
        assert!(action(&scope, ResourceTypeTag::RoleApps, &endpoints()).is_err());
    }
}
