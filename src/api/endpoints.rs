//! Endpoint catalogue
//!
//! All paths are relative to the tenant base URL
//! (`https://<subdomain>.onelogin.com/`).

use crate::error::{Error, Result};
use crate::pagination::Endpoint;
use crate::types::EntitlementKind;
use url::Url;

/// Fields requested from the users listing
pub const USER_FIELDS: &str = "id,email,username,firstname,lastname,status,group_id";

/// URL builder for one tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Catalogue rooted at `base_url`. A missing trailing slash is added.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    /// Catalogue for the public OneLogin tenant `subdomain`
    pub fn for_subdomain(subdomain: &str) -> Result<Self> {
        if subdomain.is_empty()
            || !subdomain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(Error::invalid_value(
                "subdomain",
                format!("'{subdomain}' is not a valid tenant subdomain"),
            ));
        }
        Self::new(&format!("https://{subdomain}.onelogin.com/"))
    }

    /// Base URL
    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<String> {
        Ok(self.base.join(path)?.to_string())
    }

    // ========================================================================
    // Non-paginated
    // ========================================================================

    /// Token endpoint
    pub fn token(&self) -> Result<String> {
        self.url("auth/oauth2/v2/token")
    }

    /// Single user lookup
    pub fn user(&self, user_id: &str) -> Result<String> {
        self.url(&format!("api/2/users/{}", segment(user_id)?))
    }

    /// Grant/revoke target for a role assignment kind
    pub fn role_assignment(&self, role_id: &str, kind: EntitlementKind) -> Result<String> {
        let collection = match kind {
            EntitlementKind::Member => "users",
            EntitlementKind::Admin => "admins",
        };
        self.url(&format!("api/2/roles/{}/{collection}", segment(role_id)?))
    }

    // ========================================================================
    // Paginated
    // ========================================================================

    /// All users
    pub fn users(&self) -> Result<Endpoint> {
        Ok(Endpoint::header(self.url("api/2/users")?).with_filter("fields", USER_FIELDS))
    }

    /// Users that belong to a group
    pub fn group_users(&self, group_id: &str) -> Result<Endpoint> {
        Ok(self.users()?.with_filter("group_id", segment(group_id)?))
    }

    /// All roles
    pub fn roles(&self) -> Result<Endpoint> {
        Ok(Endpoint::header(self.url("api/2/roles")?))
    }

    /// Members of a role
    pub fn role_users(&self, role_id: &str) -> Result<Endpoint> {
        self.role_collection(role_id, "users")
    }

    /// Admins of a role
    pub fn role_admins(&self, role_id: &str) -> Result<Endpoint> {
        self.role_collection(role_id, "admins")
    }

    /// Apps granted by a role
    pub fn role_apps(&self, role_id: &str) -> Result<Endpoint> {
        self.role_collection(role_id, "apps")
    }

    fn role_collection(&self, role_id: &str, collection: &str) -> Result<Endpoint> {
        Ok(Endpoint::header(self.url(&format!(
            "api/2/roles/{}/{collection}",
            segment(role_id)?
        ))?))
    }

    /// All apps
    pub fn apps(&self) -> Result<Endpoint> {
        Ok(Endpoint::header(self.url("api/2/apps")?))
    }

    /// Users assigned to an app
    pub fn app_users(&self, app_id: &str) -> Result<Endpoint> {
        Ok(Endpoint::header(self.url(&format!(
            "api/2/apps/{}/users",
            segment(app_id)?
        ))?))
    }

    /// All groups (v1 API, cursor in the body envelope)
    pub fn groups(&self) -> Result<Endpoint> {
        Ok(Endpoint::body(self.url("api/1/groups")?))
    }

    /// Connectors listing, only readable with the "Manage all" scope
    pub fn connectors(&self) -> Result<Endpoint> {
        Ok(Endpoint::header(self.url("api/2/connectors")?))
    }
}

/// Identifiers end up in URL paths; only accept plain id characters.
fn segment(id: &str) -> Result<&str> {
    if !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(id)
    } else {
        Err(Error::validation(format!("invalid resource id '{id}'")))
    }
}
