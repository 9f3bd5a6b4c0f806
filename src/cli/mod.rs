//! CLI module
//!
//! Command-line interface for the connector.
//!
//! # Commands
//!
//! - `validate` - Acquire a credential and check the API scope
//! - `resource-types` - List the top-level resource types
//! - `list` - One sync call over resources or grants
//! - `entitlements` - Static entitlements of a resource
//! - `sync` - Drain everything as JSON lines
//! - `grant` / `revoke` - Change role membership

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
