//! Pagination module
//!
//! Supports: header cursor, body-envelope cursor
//!
//! # Overview
//!
//! One page fetch against one endpoint, normalized to a `BackendPage`
//! (`items`, `next_cursor`). An empty `next_cursor` means the phase is
//! exhausted. Which cursor convention applies is a property of the
//! `Endpoint`, so callers never inspect response shapes themselves.

mod adapter;
mod strategies;
mod types;

pub use strategies::{BodyCursorPaginator, HeaderCursorPaginator};
pub use types::{BackendPage, CursorStyle, Endpoint, PageSource, Paginator};
