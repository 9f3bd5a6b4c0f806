//! OneLogin payload models
//!
//! Numeric ids are kept as `i64` here and stringified once they leave this
//! module.

use serde::{Deserialize, Serialize};

/// Id shared by every OneLogin object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseResource {
    pub id: i64,
}

/// A OneLogin user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub manager_user_id: Option<i64>,
    #[serde(default)]
    pub group_id: Option<i64>,
}

impl User {
    /// Display name: username, else "first last", else email
    pub fn display_name(&self) -> String {
        if let Some(username) = self.username.as_deref().filter(|s| !s.is_empty()) {
            return username.to_string();
        }

        let full = [self.firstname.as_deref(), self.lastname.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }

        self.email.clone().unwrap_or_default()
    }
}

/// A OneLogin role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// A user as listed under a role's members or admins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUnderRole {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A OneLogin app
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// A OneLogin group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}
