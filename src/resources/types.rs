//! Resource graph types
//!
//! Resources, their entitlements, and grants of an entitlement to a
//! principal. Upstream numeric ids are stringified here.

use crate::error::{Error, Result};
use crate::types::{EntitlementKind, JsonObject, ResourceTypeTag};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Resource Id
// ============================================================================

/// Typed resource identifier, rendered as `<type>:<id>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceId {
    pub resource_type: ResourceTypeTag,
    pub resource: String,
}

impl ResourceId {
    /// Create an id
    pub fn new(resource_type: ResourceTypeTag, resource: impl Into<String>) -> Self {
        Self {
            resource_type,
            resource: resource.into(),
        }
    }

    /// Id of a user
    pub fn user(id: impl ToString) -> Self {
        Self::new(ResourceTypeTag::User, id.to_string())
    }

    /// Id of an app
    pub fn app(id: impl ToString) -> Self {
        Self::new(ResourceTypeTag::App, id.to_string())
    }

    /// Whether this id names a user
    pub fn is_user(&self) -> bool {
        self.resource_type == ResourceTypeTag::User
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource)
    }
}

impl FromStr for ResourceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, id) = s.split_once(':').ok_or_else(|| {
            Error::validation(format!("'{s}' is not a resource id, expected <type>:<id>"))
        })?;

        let resource_type: ResourceTypeTag = kind.parse()?;
        if !resource_type.is_top_level() {
            return Err(Error::UnknownResourceType {
                name: kind.to_string(),
            });
        }
        if id.is_empty() {
            return Err(Error::validation(format!("'{s}' has an empty id")));
        }

        Ok(Self::new(resource_type, id))
    }
}

// ============================================================================
// User Status
// ============================================================================

/// Account status of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Enabled,
    Disabled,
    Deleted,
    Unspecified,
}

impl UserStatus {
    /// Map the upstream numeric status
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => Self::Disabled,
            Some(1) => Self::Enabled,
            Some(2) => Self::Deleted,
            _ => Self::Unspecified,
        }
    }
}

// ============================================================================
// Resource, Entitlement, Grant
// ============================================================================

/// A synced resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub id: ResourceId,
    pub display_name: String,
    /// Flat profile attributes
    pub profile: JsonObject,
    /// Only set for users
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl Resource {
    /// Create a resource with an empty profile
    pub fn new(id: ResourceId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            profile: JsonObject::new(),
            status: None,
        }
    }

    /// Add a profile attribute
    #[must_use]
    pub fn with_profile(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.profile.insert(key.to_string(), value.into());
        self
    }

    /// Set the user status
    #[must_use]
    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// An assignable permission on a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entitlement {
    pub resource: ResourceId,
    pub kind: EntitlementKind,
    pub display_name: String,
    pub description: String,
    pub grantable_to: Vec<ResourceTypeTag>,
}

impl Entitlement {
    /// Stable id, `<type>:<id>:<slug>`
    pub fn id(&self) -> String {
        format!("{}:{}", self.resource, self.kind)
    }
}

/// One principal holding one entitlement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Grant {
    pub resource: ResourceId,
    pub kind: EntitlementKind,
    pub principal: ResourceId,
}

impl Grant {
    /// Create a grant
    pub fn new(resource: ResourceId, kind: EntitlementKind, principal: ResourceId) -> Self {
        Self {
            resource,
            kind,
            principal,
        }
    }

    /// Stable id, `<entitlement id>:<principal>`
    pub fn id(&self) -> String {
        format!("{}:{}:{}", self.resource, self.kind, self.principal)
    }
}
