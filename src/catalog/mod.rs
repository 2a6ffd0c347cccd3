//! Remote media catalog access.
//!
//! The catalog owns storage, search ranking, and media delivery; this
//! module only defines the paged search contract ([`MediaCatalog`]), an
//! HTTP/JSON adapter implementing it, and the background fetch worker that
//! keeps catalog I/O off the event loop thread.

use crate::model::{CatalogError, CatalogQuery, MediaItem};

pub mod fetcher;
pub mod http;

pub use fetcher::FetchHandle;
pub use http::HttpCatalog;

/// One page of search results as returned by the catalog.
///
/// Pure data handed from the catalog boundary to the state machine, which
/// stamps it with the page number it asked for to build the live
/// `model::Page`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageData {
    /// Matching items for the requested page, in ranked order.
    pub items: Vec<MediaItem>,
    /// Total pages available for the query.
    pub total_pages: u32,
    /// Total matching items for the query.
    pub total_results: u64,
}

/// Paged search contract of the remote catalog.
///
/// `search` must be idempotent per `(query, page)` pair: the server is the
/// source of truth and repeated identical calls must not corrupt state -
/// each successful result fully replaces the live page. A valid response
/// with zero items is `Ok` with an empty `items` vec, never an error.
pub trait MediaCatalog {
    /// Fetch one page of results for `query`.
    ///
    /// `page` is 1-based. The page size is fixed and client-known,
    /// configured on the implementation.
    fn search(&self, query: &CatalogQuery, page: u32) -> Result<PageData, CatalogError>;
}
