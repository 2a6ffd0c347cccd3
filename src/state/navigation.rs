//! Carousel navigation state machine and query-change reconciler.
//!
//! Unifies the locally-held page with the globally-paged remote collection
//! into one continuous, bidirectionally navigable sequence. A move within
//! the live page is synchronous and always succeeds; a move past either
//! edge of the page issues a fetch effect for the adjacent page and parks
//! the state machine in `Loading` until `fetch::apply_fetch_outcome`
//! resolves it.
//!
//! All functions here are pure transitions: they mutate `AppState` and
//! return the side effects for the shell to execute. They never perform
//! I/O themselves.

use crate::state::app_state::{AppState, Direction};
use crate::state::fetch::{FetchKind, FetchRequest, FetchState};

/// Side effect requested by a state transition.
///
/// The shell executes these: fetches go to the worker thread, item-change
/// notifications are fire-and-forget telemetry hooks, address pushes go to
/// the address sink.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Issue a page fetch to the catalog worker.
    Fetch(FetchRequest),
    /// The current item changed to the given index. Fired on every
    /// successful index change, local moves and fetch-induced resets alike.
    ItemChanged(usize),
    /// Mirror the committed query text into the address sink. Independent
    /// of fetch success or failure.
    PushAddress(String),
}

/// Move to the next item.
///
/// Within the page: a pure local move. At the page's last item with more
/// pages available: transitions to `Loading` and emits a fetch for the next
/// page. At the very end of the collection, or while a fetch is already in
/// flight (reentrancy guard), this is a no-op.
pub fn advance(app: &mut AppState) -> Vec<Effect> {
    if !app.fetch.is_idle() {
        return Vec::new();
    }

    if app.cursor.index + 1 < app.page.len() {
        app.cursor.index += 1;
        app.cursor.direction = Direction::Forward;
        return vec![Effect::ItemChanged(app.cursor.index)];
    }

    if app.page.page_number() < app.page.total_pages() {
        let page = app.page.page_number() + 1;
        return vec![issue_fetch(app, FetchKind::Next, page)];
    }

    Vec::new()
}

/// Move to the previous item. Mirror of [`advance`].
///
/// At the page's first item with earlier pages available, fetches the
/// previous page; the landing index is decided when that page arrives (its
/// real last slot, see `fetch`).
pub fn retreat(app: &mut AppState) -> Vec<Effect> {
    if !app.fetch.is_idle() {
        return Vec::new();
    }

    if app.cursor.index > 0 {
        app.cursor.index -= 1;
        app.cursor.direction = Direction::Backward;
        return vec![Effect::ItemChanged(app.cursor.index)];
    }

    if app.page.page_number() > 1 {
        let page = app.page.page_number() - 1;
        return vec![issue_fetch(app, FetchKind::Previous, page)];
    }

    Vec::new()
}

/// Commit a new search text: the query-change reconciler.
///
/// Resets the cursor to the first item, forces the fetch axis onto a fresh
/// first-page load under a new generation (any in-flight fetch's eventual
/// result becomes stale and is discarded on arrival, not applied), and
/// mirrors the text into the address sink regardless of how the fetch
/// turns out.
pub fn commit_query_text(app: &mut AppState, text: String) -> Vec<Effect> {
    app.query.text = text;
    app.cursor = Default::default();
    app.dismiss_notice();
    let fetch = issue_fetch(app, FetchKind::Fresh, 1);
    vec![fetch, Effect::PushAddress(app.query.text.clone())]
}

/// Issue the startup load: the first page of the seeded query.
pub fn initial_load(app: &mut AppState) -> Vec<Effect> {
    app.cursor = Default::default();
    vec![issue_fetch(app, FetchKind::Fresh, 1)]
}

/// Re-fetch the current page for the active query.
///
/// Rejected while a fetch is in flight, like advance/retreat. Lands on the
/// page's first item.
pub fn refresh(app: &mut AppState) -> Vec<Effect> {
    if !app.fetch.is_idle() {
        return Vec::new();
    }
    let page = app.page.page_number();
    vec![issue_fetch(app, FetchKind::Fresh, page)]
}

fn issue_fetch(app: &mut AppState, kind: FetchKind, page: u32) -> Effect {
    let generation = app.next_generation();
    app.fetch = FetchState::Loading { kind, generation };
    Effect::Fetch(FetchRequest {
        query: app.query.clone(),
        page,
        generation,
    })
}

// ===== Tests =====

#[cfg(test)]
#[path = "navigation_tests.rs"]
mod tests;
