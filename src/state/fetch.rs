//! Fetch state machine and outcome application.
//!
//! At most one page fetch is in flight per carousel instance; the
//! [`FetchState`] sum type enforces it. Every request carries the
//! generation tag current at issue time, and [`apply_fetch_outcome`]
//! discards any resolved fetch whose tag no longer matches the pending one
//! - that is how a slow "next page" response is prevented from clobbering a
//! freshly-searched first page.

use crate::catalog::PageData;
use crate::model::{CatalogError, CatalogQuery, Page};
use crate::state::app_state::{AppState, Direction, Notice};
use crate::state::navigation::Effect;
use tracing::{debug, warn};

/// Why the pending fetch was issued.
///
/// Determines where the cursor lands when the fetched page replaces the
/// live one, and how a failure is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Initial load, query change, or explicit refresh. Lands on index 0;
    /// failure empties the page.
    Fresh,
    /// Forward boundary crossing. Lands on index 0; failure keeps the
    /// cursor where it was.
    Next,
    /// Backward boundary crossing. Lands on the fetched page's last item;
    /// failure keeps the cursor where it was.
    Previous,
}

/// Fetch axis of the carousel state machine. Sum type - exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    /// No fetch in flight; advance/retreat are accepted.
    #[default]
    Idle,
    /// One fetch in flight. Further advance/retreat calls are rejected
    /// until it resolves.
    Loading {
        /// Why the fetch was issued.
        kind: FetchKind,
        /// Generation tag captured at issue time.
        generation: u64,
    },
}

impl FetchState {
    /// True when no fetch is in flight.
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }
}

/// A page fetch to be executed by the fetch worker.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// Query to search for, captured at issue time.
    pub query: CatalogQuery,
    /// 1-based page number to fetch.
    pub page: u32,
    /// Generation tag captured at issue time.
    pub generation: u64,
}

/// The resolved result of a [`FetchRequest`], delivered back to the event
/// loop.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Generation tag of the originating request.
    pub generation: u64,
    /// Page number of the originating request.
    pub page: u32,
    /// What the catalog returned.
    pub result: Result<PageData, CatalogError>,
}

/// Apply a resolved fetch to the carousel state.
///
/// Stale outcomes (generation mismatch, or nothing pending) are discarded
/// without touching any state. On success the live page is replaced
/// wholesale and the cursor lands according to the fetch kind; on failure
/// the cursor stays at its last valid position and a transient notice is
/// surfaced. Either way the fetch axis returns to `Idle` - the next
/// advance/retreat re-attempts, there is no automatic retry.
pub fn apply_fetch_outcome(app: &mut AppState, outcome: FetchOutcome) -> Vec<Effect> {
    let FetchState::Loading { kind, generation } = app.fetch else {
        debug!(
            generation = outcome.generation,
            "discarding fetch outcome with no fetch pending"
        );
        return Vec::new();
    };
    if outcome.generation != generation {
        debug!(
            stale = outcome.generation,
            current = generation,
            "discarding stale fetch outcome"
        );
        return Vec::new();
    }

    app.fetch = FetchState::Idle;
    match outcome.result {
        Ok(data) => {
            if data.items.len() > app.page_size() as usize {
                warn!(
                    got = data.items.len(),
                    page_size = app.page_size(),
                    "catalog returned more items than the configured page size"
                );
            }
            let page = Page::new(data.items, outcome.page, data.total_pages, data.total_results);
            let landing = match kind {
                FetchKind::Fresh | FetchKind::Next => 0,
                // Land on the last slot that actually exists. The fetched
                // page's real length, not the advertised page size: the
                // final page of a result set approached backward can be
                // short.
                FetchKind::Previous => page.len().saturating_sub(1),
            };
            app.cursor.index = landing;
            app.cursor.direction = match kind {
                FetchKind::Previous => Direction::Backward,
                FetchKind::Fresh | FetchKind::Next => Direction::Forward,
            };
            app.page = page;
            if app.page.is_empty() {
                Vec::new()
            } else {
                vec![Effect::ItemChanged(landing)]
            }
        }
        Err(err) => {
            warn!(%err, ?kind, page = outcome.page, "page fetch failed");
            match kind {
                FetchKind::Fresh => {
                    // The old page was fetched for a query that is no
                    // longer active; showing it would be a stale mix.
                    app.page = Page::empty();
                    app.cursor.index = 0;
                    app.cursor.direction = Direction::Forward;
                }
                FetchKind::Next | FetchKind::Previous => {
                    // Abort the crossing; cursor stays on the last valid
                    // item.
                }
            }
            app.notice = Some(Notice::new(err.to_string()));
            Vec::new()
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
