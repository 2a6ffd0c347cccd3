//! Tests for fetch outcome application: landings, staleness, failures.

use super::*;
use crate::model::{MediaItem, MediaKind};
use crate::state::navigation::{advance, commit_query_text, retreat};
use std::time::Duration;

// ===== Test Helpers =====

fn items(n: usize) -> Vec<MediaItem> {
    (0..n)
        .map(|i| MediaItem::new(MediaKind::Video, format!("http://cat/v/{i}.mp4"), format!("clip {i}")))
        .collect()
}

fn app_with_page(len: usize, page_number: u32, total_pages: u32) -> AppState {
    let mut app = AppState::new(
        CatalogQuery::new(""),
        40,
        Duration::from_millis(500),
        Duration::from_millis(2000),
    );
    app.page = Page::new(items(len), page_number, total_pages, total_pages as u64 * 40);
    app
}

fn issued_request(effects: &[Effect]) -> FetchRequest {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::Fetch(request) => Some(request.clone()),
            _ => None,
        })
        .unwrap_or_else(|| panic!("expected a fetch effect, got {effects:?}"))
}

fn page_data(len: usize, total_pages: u32) -> PageData {
    PageData {
        items: items(len),
        total_pages,
        total_results: total_pages as u64 * 40,
    }
}

// ===== successful crossings =====

#[test]
fn next_page_success_lands_on_first_item() {
    let mut app = app_with_page(40, 1, 2);
    app.cursor.index = 39;
    let request = issued_request(&advance(&mut app));

    let effects = apply_fetch_outcome(
        &mut app,
        FetchOutcome {
            generation: request.generation,
            page: request.page,
            result: Ok(page_data(40, 2)),
        },
    );

    assert_eq!(app.page.page_number(), 2);
    assert_eq!(app.cursor.index, 0);
    assert_eq!(app.cursor.direction, Direction::Forward);
    assert!(app.fetch.is_idle());
    assert_eq!(
        effects,
        vec![Effect::ItemChanged(0)],
        "fetch-induced resets notify like local moves"
    );
}

#[test]
fn previous_page_success_lands_on_last_item() {
    let mut app = app_with_page(40, 2, 2);
    let request = issued_request(&retreat(&mut app));

    let effects = apply_fetch_outcome(
        &mut app,
        FetchOutcome {
            generation: request.generation,
            page: request.page,
            result: Ok(page_data(40, 2)),
        },
    );

    assert_eq!(app.page.page_number(), 1);
    assert_eq!(app.cursor.index, 39);
    assert_eq!(app.cursor.direction, Direction::Backward);
    assert_eq!(effects, vec![Effect::ItemChanged(39)]);
}

#[test]
fn previous_page_success_clamps_landing_to_real_length() {
    // A short page: the catalog served fewer items than the page size.
    let mut app = app_with_page(40, 2, 2);
    let request = issued_request(&retreat(&mut app));

    apply_fetch_outcome(
        &mut app,
        FetchOutcome {
            generation: request.generation,
            page: request.page,
            result: Ok(page_data(3, 2)),
        },
    );

    assert_eq!(
        app.cursor.index, 2,
        "landing index is the fetched page's real last slot, not page_size - 1"
    );
}

#[test]
fn fresh_success_replaces_page_and_resets_cursor() {
    let mut app = app_with_page(40, 3, 5);
    app.cursor.index = 17;
    let request = issued_request(&commit_query_text(&mut app, "sunset".to_string()));

    let effects = apply_fetch_outcome(
        &mut app,
        FetchOutcome {
            generation: request.generation,
            page: request.page,
            result: Ok(page_data(12, 1)),
        },
    );

    assert_eq!(app.page.page_number(), 1);
    assert_eq!(app.page.len(), 12);
    assert_eq!(app.cursor.index, 0);
    assert_eq!(effects, vec![Effect::ItemChanged(0)]);
}

// ===== staleness =====

#[test]
fn stale_outcome_is_discarded_after_query_reset() {
    let mut app = app_with_page(40, 3, 5);
    app.cursor.index = 39;
    let stale = issued_request(&advance(&mut app));
    let fresh = issued_request(&commit_query_text(&mut app, "new".to_string()));

    // The slow boundary fetch resolves after the reset.
    let effects = apply_fetch_outcome(
        &mut app,
        FetchOutcome {
            generation: stale.generation,
            page: stale.page,
            result: Ok(page_data(40, 5)),
        },
    );

    assert!(effects.is_empty(), "stale result must not be applied");
    assert_eq!(app.page.page_number(), 3, "live page untouched by stale result");
    assert!(
        matches!(app.fetch, FetchState::Loading { generation, .. } if generation == fresh.generation),
        "the fresh fetch is still pending"
    );

    // The fresh result then lands normally.
    let effects = apply_fetch_outcome(
        &mut app,
        FetchOutcome {
            generation: fresh.generation,
            page: fresh.page,
            result: Ok(page_data(12, 1)),
        },
    );
    assert_eq!(effects, vec![Effect::ItemChanged(0)]);
    assert_eq!(app.page.page_number(), 1);
    assert_eq!(app.cursor.index, 0);
}

#[test]
fn outcome_with_nothing_pending_is_discarded() {
    let mut app = app_with_page(5, 1, 1);
    app.cursor.index = 3;

    let effects = apply_fetch_outcome(
        &mut app,
        FetchOutcome {
            generation: 99,
            page: 2,
            result: Ok(page_data(40, 2)),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(app.cursor.index, 3);
    assert_eq!(app.page.page_number(), 1);
}

// ===== failures =====

#[test]
fn boundary_failure_keeps_cursor_and_surfaces_a_notice() {
    let mut app = app_with_page(40, 1, 2);
    app.cursor.index = 39;
    let request = issued_request(&advance(&mut app));

    let effects = apply_fetch_outcome(
        &mut app,
        FetchOutcome {
            generation: request.generation,
            page: request.page,
            result: Err(CatalogError::Network {
                message: "connection refused".to_string(),
            }),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(app.cursor.index, 39, "no partial mutation on failure");
    assert_eq!(app.page.page_number(), 1, "live page untouched");
    assert!(app.fetch.is_idle(), "next advance re-attempts");
    let notice = app.notice.as_ref().expect("a notice must be surfaced");
    assert!(notice.text.contains("connection refused"));
}

#[test]
fn fresh_failure_empties_the_page() {
    let mut app = app_with_page(40, 3, 5);
    app.cursor.index = 17;
    let request = issued_request(&commit_query_text(&mut app, "new".to_string()));

    apply_fetch_outcome(
        &mut app,
        FetchOutcome {
            generation: request.generation,
            page: request.page,
            result: Err(CatalogError::Server { status: 502 }),
        },
    );

    assert!(app.page.is_empty(), "old page would be a stale mix for the new query");
    assert_eq!(app.cursor.index, 0);
    assert!(!app.has_next());
    assert!(!app.has_previous());
    assert!(app.notice.is_some());
}

// ===== empty results =====

#[test]
fn empty_result_is_a_terminal_state_not_an_error() {
    let mut app = app_with_page(40, 3, 5);
    let request = issued_request(&commit_query_text(&mut app, "nothing matches".to_string()));

    let effects = apply_fetch_outcome(
        &mut app,
        FetchOutcome {
            generation: request.generation,
            page: request.page,
            result: Ok(PageData {
                items: vec![],
                total_pages: 1,
                total_results: 0,
            }),
        },
    );

    assert!(effects.is_empty(), "no item to notify about");
    assert!(app.page.is_empty());
    assert!(!app.has_next());
    assert!(!app.has_previous());
    assert_eq!(app.notice, None, "an empty result is not a failure");
}
