//! Pagination strategy implementations
//!
//! Each strategy handles one cursor convention.

use super::types::{BackendPage, Paginator};
use crate::decode::{extract_path, JsonDecoder, RecordDecoder};
use crate::error::{Error, Result};
use reqwest::header::HeaderMap;
use serde_json::Value;

// ============================================================================
// Header Cursor Pagination
// ============================================================================

/// Cursor returned in a response header (OneLogin API v2)
///
/// - first page: `?limit=N`
/// - later pages: `?cursor=<after-cursor>` (no `limit`)
#[derive(Debug, Clone)]
pub struct HeaderCursorPaginator {
    /// Response header carrying the next cursor
    pub cursor_header: String,
    /// Query parameter name for cursor
    pub cursor_param: String,
    /// Query parameter name for page size
    pub limit_param: String,
    decoder: JsonDecoder,
}

impl Default for HeaderCursorPaginator {
    fn default() -> Self {
        Self {
            cursor_header: "after-cursor".to_string(),
            cursor_param: "cursor".to_string(),
            limit_param: "limit".to_string(),
            decoder: JsonDecoder::new(),
        }
    }
}

impl Paginator for HeaderCursorPaginator {
    fn request_params(&self, cursor: &str, limit: u32) -> Vec<(String, String)> {
        if cursor.is_empty() {
            vec![(self.limit_param.clone(), limit.to_string())]
        } else {
            vec![(self.cursor_param.clone(), cursor.to_string())]
        }
    }

    fn extract(&self, body: &str, headers: &HeaderMap) -> Result<BackendPage> {
        let items = self.decoder.decode(body)?;

        let next_cursor = match headers.get(self.cursor_header.as_str()) {
            Some(value) => value
                .to_str()
                .map_err(|e| Error::decode(format!("invalid {} header: {e}", self.cursor_header)))?
                .to_string(),
            None => String::new(),
        };

        Ok(BackendPage::new(items, next_cursor))
    }
}

// ============================================================================
// Body Cursor Pagination
// ============================================================================

/// Cursor embedded in the response envelope (OneLogin API v1)
///
/// Every request carries `limit`; later pages add `after_cursor`.
#[derive(Debug, Clone)]
pub struct BodyCursorPaginator {
    /// Path to the next cursor inside the body
    pub cursor_path: String,
    /// Query parameter name for cursor
    pub cursor_param: String,
    /// Query parameter name for page size
    pub limit_param: String,
    decoder: JsonDecoder,
}

impl Default for BodyCursorPaginator {
    fn default() -> Self {
        Self {
            cursor_path: "pagination.after_cursor".to_string(),
            cursor_param: "after_cursor".to_string(),
            limit_param: "limit".to_string(),
            decoder: JsonDecoder::with_path("data"),
        }
    }
}

impl Paginator for BodyCursorPaginator {
    fn request_params(&self, cursor: &str, limit: u32) -> Vec<(String, String)> {
        let mut params = vec![(self.limit_param.clone(), limit.to_string())];
        if !cursor.is_empty() {
            params.push((self.cursor_param.clone(), cursor.to_string()));
        }
        params
    }

    fn extract(&self, body: &str, _headers: &HeaderMap) -> Result<BackendPage> {
        let value = self.decoder.decode_raw(body)?;
        let items = self.decoder.records(&value)?;

        let next_cursor = match extract_path(&value, &self.cursor_path) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(Error::decode(format!(
                    "expected a string at '{}', found {other}",
                    self.cursor_path
                )))
            }
        };

        Ok(BackendPage::new(items, next_cursor))
    }
}
