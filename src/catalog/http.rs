//! HTTP/JSON catalog adapter.
//!
//! Issues `GET {base}/search?q=&sort=&dir=&page=&per_page=` with a blocking
//! client and decodes the JSON payload into [`PageData`]. Wire records are
//! transformed into `MediaItem`s here, at the boundary - nothing downstream
//! sees raw server data.

use crate::catalog::{MediaCatalog, PageData};
use crate::model::{CatalogError, CatalogQuery, MediaItem, MediaKind};
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Request timeout for catalog calls.
///
/// Long enough for a slow search, short enough that a dead server surfaces
/// as a notice while the carousel stays interactive.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking HTTP client for a remote media catalog.
#[derive(Debug)]
pub struct HttpCatalog {
    client: reqwest::blocking::Client,
    base: Url,
    per_page: u32,
}

impl HttpCatalog {
    /// Create a catalog client for `base` with a fixed page size.
    pub fn new(base: Url, per_page: u32) -> Result<Self, CatalogError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::Network {
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            base,
            per_page,
        })
    }

    fn search_url(&self, query: &CatalogQuery, page: u32) -> Result<Url, CatalogError> {
        let mut url = self
            .base
            .join("search")
            .map_err(|e| CatalogError::Network {
                message: format!("invalid search endpoint: {e}"),
            })?;
        url.query_pairs_mut()
            .append_pair("q", &query.text)
            .append_pair("sort", query.sort.as_str())
            .append_pair("dir", query.direction.as_str())
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &self.per_page.to_string());
        Ok(url)
    }
}

impl MediaCatalog for HttpCatalog {
    fn search(&self, query: &CatalogQuery, page: u32) -> Result<PageData, CatalogError> {
        let url = self.search_url(query, page)?;
        debug!(%url, "issuing catalog search");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| CatalogError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Server {
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| CatalogError::Network {
            message: e.to_string(),
        })?;
        decode_response(&body, self.per_page)
    }
}

/// Decode a search response body into [`PageData`].
///
/// The catalog reports `total_pages` and/or `total_results`; when only the
/// result count is present the page count is derived from the fixed page
/// size.
pub fn decode_response(body: &str, per_page: u32) -> Result<PageData, CatalogError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| CatalogError::Decode {
            message: e.to_string(),
        })?;

    let total_results = response
        .total_results
        .unwrap_or(response.items.len() as u64);
    let total_pages = response.total_pages.unwrap_or_else(|| {
        let per_page = u64::from(per_page.max(1));
        total_results.div_ceil(per_page).max(1) as u32
    });

    Ok(PageData {
        items: response.items.into_iter().map(MediaItem::from).collect(),
        total_pages: total_pages.max(1),
        total_results,
    })
}

/// Wire shape of the search payload.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<ItemRecord>,
    #[serde(default)]
    total_pages: Option<u32>,
    #[serde(default)]
    total_results: Option<u64>,
}

/// Wire shape of one catalog record.
#[derive(Debug, Deserialize)]
struct ItemRecord {
    kind: KindRecord,
    url: String,
    title: String,
    #[serde(default)]
    performers: Vec<String>,
    #[serde(default)]
    studio: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    view_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum KindRecord {
    Video,
    Image,
}

impl From<ItemRecord> for MediaItem {
    fn from(record: ItemRecord) -> Self {
        MediaItem {
            kind: match record.kind {
                KindRecord::Video => MediaKind::Video,
                KindRecord::Image => MediaKind::Image,
            },
            url: record.url,
            title: record.title,
            performers: record.performers,
            studio: record.studio,
            // An unparseable date degrades to "unknown" rather than failing
            // the whole page.
            date: record
                .date
                .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
            tags: record.tags,
            rating: record.rating,
            view_count: record.view_count,
        }
    }
}
