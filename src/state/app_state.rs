//! Application state.
//!
//! AppState is the root state type for the carousel. It is pure data; all
//! transitions live in the handler modules (`navigation`, `fetch`,
//! `search_input`, `overlay`) and the rendering shell only ever reads it.
//!
//! # State Machine
//!
//! The carousel operates as a state machine with these primary axes:
//!
//! - **Fetch**: `Idle` vs one in-flight page fetch (`FetchState`) - at most
//!   one per carousel instance
//! - **Search**: inactive vs typing a query (`SearchInput`), with a
//!   debounced commit
//! - **Overlay**: controls/metadata shown vs hidden (`Overlay`)
//!
//! The live [`Page`] and the [`NavigationCursor`] are mutated only by the
//! navigation state machine and the query-change reconciler, always on the
//! event loop thread in response to a resolved event.

use crate::model::{CatalogQuery, MediaItem, Page};
use crate::state::{Debouncer, FetchState, Overlay, SearchInput};
use std::time::Duration;

/// Traversal direction of the most recent move.
///
/// Only affects transition presentation (which way the card slides);
/// never logical position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Last move was toward later items.
    #[default]
    Forward,
    /// Last move was toward earlier items.
    Backward,
}

/// Position within the live page.
///
/// Invariant: `0 <= index < page.len()`, or `index == 0` when the page is
/// empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationCursor {
    /// 0-based index into the live page's items.
    pub index: usize,
    /// Presentation direction of the last move.
    pub direction: Direction,
}

/// How the metadata card's art box is proportioned.
///
/// Pure UI preference; no effect on navigation correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CropMode {
    /// Letterbox the art area to the item's nominal aspect.
    #[default]
    Fit,
    /// Fill the available area, cropping overflow.
    Fill,
}

impl CropMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            CropMode::Fit => CropMode::Fill,
            CropMode::Fill => CropMode::Fit,
        }
    }
}

/// Transient, dismissible message surfaced to the user.
///
/// Produced by failed fetches; replaced by newer notices; cleared by an
/// explicit dismiss. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Human-readable message.
    pub text: String,
}

impl Notice {
    /// Notice with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Root carousel state. Pure data, no side effects.
#[derive(Debug)]
pub struct AppState {
    /// The live server page. Replaced wholesale on every successful fetch.
    pub page: Page,
    /// Position within the live page.
    pub cursor: NavigationCursor,
    /// In-flight fetch, if any.
    pub fetch: FetchState,
    /// The query the live page was (or is being) fetched for.
    pub query: CatalogQuery,
    /// Search text input state machine.
    pub search: SearchInput,
    /// Trailing-edge debouncer between keystrokes and query commits.
    pub debouncer: Debouncer,
    /// Auto-hiding controls/metadata overlay.
    pub overlay: Overlay,
    /// Transient error notice, if one is showing.
    pub notice: Option<Notice>,
    /// Art box proportioning preference.
    pub crop: CropMode,
    /// Whether the help overlay is showing.
    pub help_visible: bool,

    page_size: u32,
    generation: u64,
}

impl AppState {
    /// Create carousel state for `query`.
    ///
    /// `page_size` is the fixed, client-known page size the catalog was
    /// configured with; it is threaded in here rather than read from an
    /// ambient constant. `debounce` and `overlay_timeout` come from
    /// configuration as well.
    pub fn new(
        query: CatalogQuery,
        page_size: u32,
        debounce: Duration,
        overlay_timeout: Duration,
    ) -> Self {
        Self {
            page: Page::empty(),
            cursor: NavigationCursor::default(),
            fetch: FetchState::Idle,
            query,
            search: SearchInput::Inactive,
            debouncer: Debouncer::new(debounce),
            overlay: Overlay::new(overlay_timeout),
            notice: None,
            crop: CropMode::default(),
            help_visible: false,
            page_size,
            generation: 0,
        }
    }

    /// The fixed page size the catalog serves.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Bump and return the generation counter.
    ///
    /// Captured into each fetch request at issue time; a resolved fetch
    /// whose tag no longer matches the pending one is stale and must be
    /// discarded.
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Whether a later item exists, on this page or a following one.
    pub fn has_next(&self) -> bool {
        self.cursor.index + 1 < self.page.len()
            || self.page.page_number() < self.page.total_pages()
    }

    /// Whether an earlier item exists, on this page or a preceding one.
    pub fn has_previous(&self) -> bool {
        self.cursor.index > 0 || self.page.page_number() > 1
    }

    /// The item under the cursor, if the page is non-empty.
    pub fn current_item(&self) -> Option<&MediaItem> {
        self.page.item(self.cursor.index)
    }

    /// True while a page fetch is in flight.
    pub fn loading(&self) -> bool {
        !self.fetch.is_idle()
    }

    /// Flip the art box proportioning preference.
    pub fn toggle_crop(&mut self) {
        self.crop = self.crop.toggled();
    }

    /// Clear the transient notice, if any.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
