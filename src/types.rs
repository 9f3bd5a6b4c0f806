//! Common types used throughout the connector
//!
//! This module contains the closed set of resource type tags, the
//! entitlement kinds accepted by the write path, and small shared aliases.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Resource Type Tag
// ============================================================================

/// Identifier of a resource category or of a sub-phase of a traversal.
///
/// The first four variants are the top-level resource types; the `Role*`
/// variants only ever appear as phases of a role's grant enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceTypeTag {
    User,
    Role,
    App,
    Group,
    RoleMembers,
    RoleAdmins,
    RoleApps,
}

impl ResourceTypeTag {
    /// Top-level resource types, in sync order
    pub const TOP_LEVEL: [ResourceTypeTag; 4] = [
        ResourceTypeTag::User,
        ResourceTypeTag::Role,
        ResourceTypeTag::App,
        ResourceTypeTag::Group,
    ];

    /// Wire name of the tag
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Role => "role",
            Self::App => "app",
            Self::Group => "group",
            Self::RoleMembers => "role-members",
            Self::RoleAdmins => "role-admins",
            Self::RoleApps => "role-apps",
        }
    }

    /// Human-readable name
    pub fn display_name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Role => "Role",
            Self::App => "App",
            Self::Group => "Group",
            Self::RoleMembers => "Role Members",
            Self::RoleAdmins => "Role Admins",
            Self::RoleApps => "Role Apps",
        }
    }

    /// Whether this tag names a resource category rather than a sub-phase
    pub fn is_top_level(self) -> bool {
        Self::TOP_LEVEL.contains(&self)
    }
}

impl fmt::Display for ResourceTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceTypeTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(Self::User),
            "role" => Ok(Self::Role),
            "app" => Ok(Self::App),
            "group" => Ok(Self::Group),
            "role-members" => Ok(Self::RoleMembers),
            "role-admins" => Ok(Self::RoleAdmins),
            "role-apps" => Ok(Self::RoleApps),
            other => Err(Error::UnknownResourceType {
                name: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// Entitlement Kind
// ============================================================================

/// Kind of role assignment accepted by grant and revoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementKind {
    Member,
    Admin,
}

impl EntitlementKind {
    /// Entitlement slug
    pub fn slug(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for EntitlementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for EntitlementKind {
    type Err = Error;

    // Anything outside {member, admin} fails closed.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            other => Err(Error::validation(format!(
                "unsupported entitlement kind '{other}', expected 'member' or 'admin'"
            ))),
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
