//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use super::strategies::{BodyCursorPaginator, HeaderCursorPaginator};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;

/// Where an endpoint reports its next cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorStyle {
    /// Bare JSON array body, cursor in the `after-cursor` response header
    Header,
    /// `{data, pagination}` envelope, cursor at `pagination.after_cursor`
    Body,
}

impl CursorStyle {
    /// Strategy implementing this convention
    pub fn paginator(self) -> Box<dyn Paginator> {
        match self {
            Self::Header => Box::new(HeaderCursorPaginator::default()),
            Self::Body => Box::new(BodyCursorPaginator::default()),
        }
    }
}

/// A paginated list endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Absolute URL without query string
    pub url: String,
    /// Cursor convention of this endpoint
    pub style: CursorStyle,
    /// Fixed query filters sent on every request
    pub filters: Vec<(String, String)>,
}

impl Endpoint {
    /// Create a header-cursor endpoint
    pub fn header(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            style: CursorStyle::Header,
            filters: Vec::new(),
        }
    }

    /// Create a body-cursor endpoint
    pub fn body(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            style: CursorStyle::Body,
            filters: Vec::new(),
        }
    }

    /// Add a fixed query filter
    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }
}

/// Normalized result of one page fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendPage {
    /// Raw item payloads
    pub items: Vec<Value>,
    /// Cursor for the next page, empty when the phase is exhausted
    pub next_cursor: String,
}

impl BackendPage {
    /// Create a page
    pub fn new(items: Vec<Value>, next_cursor: impl Into<String>) -> Self {
        Self {
            items,
            next_cursor: next_cursor.into(),
        }
    }

    /// Whether this page ends its phase
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_empty()
    }
}

/// Trait for cursor conventions
pub trait Paginator: Send + Sync {
    /// Query parameters for a request at `cursor` (empty on the first page)
    fn request_params(&self, cursor: &str, limit: u32) -> Vec<(String, String)>;

    /// Split a successful response into items and the next cursor
    fn extract(&self, body: &str, headers: &HeaderMap) -> Result<BackendPage>;
}

/// Anything that can fetch one page of one endpoint
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page at `cursor`. Status >= 300 fails with `Error::Backend`
    /// and yields no items.
    async fn fetch_page(&self, endpoint: &Endpoint, cursor: &str, limit: u32)
        -> Result<BackendPage>;
}
