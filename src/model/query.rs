//! The active catalog query.
//!
//! Owned by the query-change reconciler in `state::navigation`; a change to
//! `text` invalidates the live page and resets the cursor to the first item
//! of the first page.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Sort key understood by the catalog's search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Server-side search relevance ranking.
    Relevance,
    /// Release date.
    Date,
    /// Lexicographic title.
    Title,
    /// Server-side rating.
    Rating,
    /// View count.
    ViewCount,
}

impl SortKey {
    /// Wire value used in the search request.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::Date => "date",
            SortKey::Title => "title",
            SortKey::Rating => "rating",
            SortKey::ViewCount => "view_count",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" => Ok(SortKey::Relevance),
            "date" => Ok(SortKey::Date),
            "title" => Ok(SortKey::Title),
            "rating" => Ok(SortKey::Rating),
            "view_count" => Ok(SortKey::ViewCount),
            other => Err(format!(
                "unknown sort key '{other}' (expected one of: relevance, date, title, rating, view_count)"
            )),
        }
    }
}

/// Ordering direction for sorted queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending order (smallest first).
    Asc,
    /// Descending order (largest first).
    #[default]
    Desc,
}

impl SortDirection {
    /// Wire value used in the search request.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// The query the live page was fetched for.
///
/// `text` is the only field the user edits at runtime; sort key and
/// direction come from configuration. Empty text is a valid query and means
/// an unfiltered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    /// Free-text search input.
    pub text: String,
    /// Sort key for result ordering.
    pub sort: SortKey,
    /// Sort direction.
    pub direction: SortDirection,
}

impl CatalogQuery {
    /// Query with the given text and the default ordering (date, newest
    /// first).
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sort: SortKey::Date,
            direction: SortDirection::Desc,
        }
    }
}
