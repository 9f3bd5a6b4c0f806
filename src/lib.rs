// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # OneLogin Sync
//!
//! Resumable identity sync for the OneLogin API. Users, roles, apps, and
//! groups are listed into a resource/entitlement/grant graph, and role
//! membership can be granted or revoked.
//!
//! ## Features
//!
//! - **Stateless resume**: every call returns an opaque continuation token
//!   that fully captures the traversal position
//! - **Multi-phase traversal**: a role's grants walk its apps, admins, and
//!   members under one token
//! - **Two cursor styles**: response-header cursors (v2 API) and body
//!   envelope cursors (v1 groups API) behind one `PageSource` seam
//! - **Fail fast**: credentials are acquired at construction; nothing retries
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use onelogin_sync::{ConnectorConfig, OneLoginConnector, ResourceTypeTag, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ConnectorConfig::new("client-id", "client-secret", "acme");
//!     let connector = OneLoginConnector::new(&config).await?;
//!
//!     let mut token = String::new();
//!     loop {
//!         let page = connector.list(ResourceTypeTag::Role, Some("7"), &token).await?;
//!         for item in &page.items {
//!             println!("{} {}", item.phase, item.payload);
//!         }
//!         if page.is_last() {
//!             break;
//!         }
//!         token = page.next_token;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     OneLoginConnector                           │
//! │  validate()   list(type, parent, token)   grant()   revoke()    │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │   Paginate    │   State   │   Engine    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Client   │ Bearer    │ Header cursor │ PhaseStack│ Phase table │
//! │ creds    │ Pacing    │ Body cursor   │ Token     │ Fetch budget│
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the connector
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client-credentials authentication
pub mod auth;

/// HTTP client with optional pacing
pub mod http;

/// Pagination strategies and the page source seam
pub mod pagination;

/// Response decoders
pub mod decode;

/// Phase stack and continuation token codec
pub mod state;

/// Multi-phase sync engine
pub mod engine;

/// OneLogin endpoints, models, and write calls
pub mod api;

/// Resource, entitlement, and grant mapping
pub mod resources;

/// Connector configuration
pub mod config;

/// Connector surface and syncer trait
pub mod connector;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ConnectorConfig;
pub use connector::{OneLoginConnector, ResourceSyncer, SyncRecord};
pub use engine::{ListScope, Page, PhaseItem, SyncConfig, SyncEngine};
pub use error::{Error, Result};
pub use resources::{Entitlement, Grant, Resource, ResourceId};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
