//! Sync engine module
//!
//! Multi-phase traversal driver.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - Runs one call: decode token, execute frames, encode token
//! - `ListScope` - What a traversal enumerates (resources, or grants of one)
//! - `Page` / `PhaseItem` - Call results
//! - `SyncConfig` / `SyncStats` - Configuration and counters
//!
//! One call executes frames from the top of the decoded stack. Entry frames
//! expand into their sub-phases without fetching. Before each fetch the call
//! stops if it already holds items or has used up its fetch budget, so an
//! exhausted empty phase hands over to the next phase within the same call.
//! On error the stack is never re-encoded: the caller's previous token stays
//! the resume point.

mod phases;
mod types;

pub use phases::{action, PhaseAction, ROLE_PHASES};
pub use types::{ListScope, Page, PhaseItem, SyncConfig, SyncStats};

use crate::api::Endpoints;
use crate::error::{Error, Result};
use crate::pagination::PageSource;
use crate::state::{PhaseFrame, PhaseStack};
use futures::stream::{self, Stream};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Sync engine driving phase stacks against a page source
#[derive(Clone)]
pub struct SyncEngine {
    /// Page source (HTTP in production)
    source: Arc<dyn PageSource>,
    /// Endpoint catalogue
    endpoints: Endpoints,
    /// Sync configuration
    config: SyncConfig,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(source: Arc<dyn PageSource>, endpoints: Endpoints) -> Self {
        Self {
            source,
            endpoints,
            config: SyncConfig::default(),
        }
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Get the endpoint catalogue
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Run one call of the traversal described by `scope`, resuming at
    /// `token` (`""` starts from the beginning).
    pub async fn list(&self, scope: &ListScope, token: &str) -> Result<Page<PhaseItem>> {
        let mut stack = PhaseStack::resume(token, scope.seed())?;
        let budget = self.config.fetch_budget.max(1);
        let mut items = Vec::new();
        let mut fetches = 0usize;

        while let Some(top) = stack.top().cloned() {
            match action(scope, top.tag, &self.endpoints)? {
                PhaseAction::Expand(phases) => {
                    stack.pop();
                    for phase in phases {
                        stack.push(PhaseFrame::new(phase));
                    }
                }
                PhaseAction::Skip => {
                    stack.pop();
                }
                PhaseAction::Fetch(endpoint) => {
                    if !items.is_empty() || fetches >= budget {
                        break;
                    }

                    let page = self
                        .source
                        .fetch_page(&endpoint, &top.cursor, self.config.page_size)
                        .await?;
                    fetches += 1;

                    debug!(
                        scope = %scope,
                        phase = %top.tag,
                        items = page.items.len(),
                        exhausted = page.is_last(),
                        "Phase page"
                    );

                    items.extend(
                        page.items
                            .into_iter()
                            .map(|payload| PhaseItem::new(top.tag, payload)),
                    );

                    if page.next_cursor.is_empty() {
                        stack.pop();
                    } else {
                        stack.set_cursor(page.next_cursor);
                    }
                }
            }
        }

        Ok(Page::new(items, stack.encode()))
    }

    /// Like [`SyncEngine::list`], failing with `Error::Cancelled` as soon as
    /// `cancel` fires. The in-flight request is dropped and no token is
    /// produced.
    pub async fn list_cancellable(
        &self,
        scope: &ListScope,
        token: &str,
        cancel: &CancellationToken,
    ) -> Result<Page<PhaseItem>> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(Error::Cancelled),
            result = self.list(scope, token) => result,
        }
    }

    /// Drain a whole traversal from the start, one call per stream item.
    pub fn stream(
        &self,
        scope: ListScope,
    ) -> impl Stream<Item = Result<Vec<PhaseItem>>> + Send + '_ {
        stream::try_unfold(Some(String::new()), move |token| {
            let scope = scope.clone();
            async move {
                let Some(token) = token else {
                    return Ok(None);
                };
                let page = self.list(&scope, &token).await?;
                let next = (!page.is_last()).then_some(page.next_token);
                Ok(Some((page.items, next)))
            }
        })
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("endpoints", &self.endpoints)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
