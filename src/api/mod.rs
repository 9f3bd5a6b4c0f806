//! OneLogin API module
//!
//! Endpoint catalogue, payload models, and the non-paginated calls
//! (single-user lookup, role grant/revoke, scope check).
//!
//! # Overview
//!
//! - `Endpoints` - Every URL the connector talks to, built from one base URL
//! - `OneLoginClient` - Direct calls that sit outside the pagination engine
//! - Models - `User`, `Role`, `App`, `Group`, `UserUnderRole`

mod client;
mod endpoints;
mod models;

pub use client::OneLoginClient;
pub use endpoints::{Endpoints, USER_FIELDS};
pub use models::{App, BaseResource, Group, Role, User, UserUnderRole};
