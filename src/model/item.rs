//! Media item domain types.
//!
//! A [`MediaItem`] is one opaque display unit of the carousel. It is created
//! by transforming one server-returned record at the catalog boundary,
//! never mutated afterwards, and discarded wholesale when its page is
//! replaced.

use chrono::NaiveDate;

/// What kind of media an item points at.
///
/// Determines the badge shown on the metadata card and how an external
/// player would open the URL. Sum type - exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Playable video.
    Video,
    /// Viewable still image.
    Image,
}

impl MediaKind {
    /// Short badge label for rendering.
    pub fn badge(&self) -> &'static str {
        match self {
            MediaKind::Video => "VIDEO",
            MediaKind::Image => "IMAGE",
        }
    }
}

/// One display unit of the carousel.
///
/// Immutable once constructed. The catalog boundary owns the transformation
/// from wire records into this type; nothing downstream ever reaches back
/// into raw server data.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    /// Video or image.
    pub kind: MediaKind,
    /// Playable/viewable location of the media bytes.
    pub url: String,
    /// Display title.
    pub title: String,
    /// Credited performers, in server order.
    pub performers: Vec<String>,
    /// Producing studio, when the catalog knows it.
    pub studio: Option<String>,
    /// Release date, when the catalog knows it.
    pub date: Option<NaiveDate>,
    /// Free-form tags, in server order.
    pub tags: Vec<String>,
    /// Server-side rating, typically 0.0 to 5.0.
    pub rating: Option<f32>,
    /// Times the item has been viewed, per the server.
    pub view_count: Option<u64>,
}

impl MediaItem {
    /// Minimal item with only the required fields set.
    ///
    /// Primarily useful for constructing fixtures; production items come
    /// from the catalog boundary with every known field populated.
    pub fn new(kind: MediaKind, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            title: title.into(),
            performers: Vec::new(),
            studio: None,
            date: None,
            tags: Vec::new(),
            rating: None,
            view_count: None,
        }
    }
}
