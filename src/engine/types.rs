//! Engine types
//!
//! Call scope, page shape, and configuration for the sync engine.

use crate::error::{Error, Result};
use crate::types::{JsonValue, ResourceTypeTag};
use serde::Serialize;
use std::fmt;

/// What one traversal enumerates
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListScope {
    /// Top-level resource type
    pub resource_type: ResourceTypeTag,
    /// Parent resource id; `None` lists the resources themselves, `Some`
    /// lists the grants of that resource
    pub parent_id: Option<String>,
}

impl ListScope {
    /// Scope for an explicit (type, parent) pair
    pub fn new(resource_type: ResourceTypeTag, parent_id: Option<String>) -> Result<Self> {
        if !resource_type.is_top_level() {
            return Err(Error::validation(format!(
                "'{resource_type}' is a traversal phase, not a resource type"
            )));
        }
        Ok(Self {
            resource_type,
            parent_id,
        })
    }

    /// List every resource of a type
    pub fn resources(resource_type: ResourceTypeTag) -> Result<Self> {
        Self::new(resource_type, None)
    }

    /// List the grants of one resource
    pub fn grants(resource_type: ResourceTypeTag, parent_id: impl Into<String>) -> Result<Self> {
        Self::new(resource_type, Some(parent_id.into()))
    }

    /// Tag of the frame a fresh traversal starts with
    pub fn seed(&self) -> ResourceTypeTag {
        self.resource_type
    }
}

impl fmt::Display for ListScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent_id {
            Some(parent) => write!(f, "grants of {}:{parent}", self.resource_type),
            None => write!(f, "{} resources", self.resource_type),
        }
    }
}

/// One raw item, labelled with the phase that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseItem {
    /// Phase tag of the frame that fetched the item
    pub phase: ResourceTypeTag,
    /// Raw backend payload
    pub payload: JsonValue,
}

impl PhaseItem {
    /// Create an item
    pub fn new(phase: ResourceTypeTag, payload: JsonValue) -> Self {
        Self { phase, payload }
    }
}

/// Result of one sync call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items produced by this call
    pub items: Vec<T>,
    /// Token for the next call; empty when the traversal is complete
    pub next_token: String,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, next_token: impl Into<String>) -> Self {
        Self {
            items,
            next_token: next_token.into(),
        }
    }

    /// Whether the traversal is complete
    pub fn is_last(&self) -> bool {
        self.next_token.is_empty()
    }

    /// Convert the items, keeping the token
    pub fn try_map<U, F>(self, f: F) -> Result<Page<U>>
    where
        F: FnMut(T) -> Result<U>,
    {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>>>()?;
        Ok(Page {
            items,
            next_token: self.next_token,
        })
    }
}

/// Configuration for sync calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Page size sent to the backend
    pub page_size: u32,
    /// Maximum backend fetches per call
    pub fetch_budget: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            fetch_budget: 2,
        }
    }
}

impl SyncConfig {
    /// Create a new sync config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page size
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Set the per-call fetch budget
    #[must_use]
    pub fn with_fetch_budget(mut self, budget: usize) -> Self {
        self.fetch_budget = budget;
        self
    }
}

/// Statistics from a full sync
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    /// Resource types traversed
    pub resource_types: usize,
    /// Resources emitted
    pub resources: usize,
    /// Grants emitted
    pub grants: usize,
    /// Engine calls made
    pub calls: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource type
    pub fn add_resource_type(&mut self) {
        self.resource_types += 1;
    }

    /// Add resources
    pub fn add_resources(&mut self, count: usize) {
        self.resources += count;
    }

    /// Add grants
    pub fn add_grants(&mut self, count: usize) {
        self.grants += count;
    }

    /// Add an engine call
    pub fn add_call(&mut self) {
        self.calls += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
