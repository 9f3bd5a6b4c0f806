//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// OneLogin identity sync CLI
#[derive(Parser, Debug)]
#[command(name = "onelogin-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// OAuth client id
    #[arg(long, global = true, env = "BATON_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long, global = true, env = "BATON_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Tenant subdomain
    #[arg(long, global = true, env = "BATON_SUBDOMAIN")]
    pub subdomain: Option<String>,

    /// Override the tenant base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Acquire a credential and check the API scope
    Validate,

    /// List the top-level resource types
    ResourceTypes,

    /// One sync call: resources of a type, or grants of one resource
    List {
        /// Resource type (user, role, app, group)
        resource_type: String,

        /// Parent resource id; lists its grants
        #[arg(long)]
        parent: Option<String>,

        /// Continuation token from a previous call
        #[arg(long, default_value = "")]
        token: String,
    },

    /// Print the entitlements of a resource (`<type>:<id>`)
    Entitlements {
        resource: String,
    },

    /// Drain resources, entitlements, and grants
    Sync {
        /// Resource types to sync (comma-separated, empty = all)
        #[arg(long)]
        types: Option<String>,
    },

    /// Assign a principal to a role
    Grant {
        /// Role id
        role_id: String,

        /// Principal (`user:<id>`)
        principal: String,

        /// Entitlement (member or admin)
        kind: String,
    },

    /// Remove a principal from a role
    Revoke {
        /// Role id
        role_id: String,

        /// Principal (`user:<id>`)
        principal: String,

        /// Entitlement (member or admin)
        kind: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
