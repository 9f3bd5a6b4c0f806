//! Direct OneLogin calls
//!
//! Everything here is a single request; paginated listings go through the
//! sync engine instead.

use super::endpoints::Endpoints;
use super::models::User;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::PageSource;
use crate::types::EntitlementKind;
use serde_json::json;
use tracing::{debug, info, warn};

/// Client for the non-paginated OneLogin calls
#[derive(Debug, Clone)]
pub struct OneLoginClient {
    http: HttpClient,
    endpoints: Endpoints,
}

impl OneLoginClient {
    /// Create a client. `http` must already carry the credential.
    pub fn new(http: HttpClient, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    /// Endpoint catalogue
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Fetch one user with full details
    pub async fn get_user_by_id(&self, user_id: &str) -> Result<User> {
        let url = self.endpoints.user(user_id)?;
        debug!(user_id, "Fetching user");
        self.http.get_json(&url).await
    }

    /// Add `user_id` to the role as member or admin
    pub async fn grant_role(
        &self,
        role_id: &str,
        user_id: &str,
        kind: EntitlementKind,
    ) -> Result<()> {
        let url = self.endpoints.role_assignment(role_id, kind)?;
        self.http
            .post_with_config(&url, RequestConfig::new().json(json!([user_id])))
            .await?;
        info!(role_id, user_id, kind = %kind, "Granted role assignment");
        Ok(())
    }

    /// Remove `user_id` from the role's members or admins
    pub async fn revoke_role(
        &self,
        role_id: &str,
        user_id: &str,
        kind: EntitlementKind,
    ) -> Result<()> {
        let url = self.endpoints.role_assignment(role_id, kind)?;
        self.http
            .delete_with_config(&url, RequestConfig::new().json(json!([user_id])))
            .await?;
        info!(role_id, user_id, kind = %kind, "Revoked role assignment");
        Ok(())
    }

    /// Read one page of the connectors listing.
    ///
    /// Fails unless the credential carries the "Manage all" API scope.
    pub async fn validate_scope(&self) -> Result<()> {
        let endpoint = self.endpoints.connectors()?;
        if let Err(e) = self.http.fetch_page(&endpoint, "", 1).await {
            warn!("Connectors listing failed; the API credential needs the 'Manage all' scope");
            return Err(e);
        }
        Ok(())
    }
}
