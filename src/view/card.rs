//! Metadata card for the current item.
//!
//! The card is the full-screen body of the carousel: an art box standing in
//! for the media itself (playback is external) above the item's metadata.
//! When the page is empty it renders the "no results" terminal view
//! instead, or a loading message while the first fetch is in flight.

use crate::model::MediaItem;
use crate::state::{AppState, CropMode};
use crate::view::styles::Palette;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Full-screen card for the item under the cursor.
pub struct ItemCard<'a> {
    state: &'a AppState,
    styles: &'a Palette,
}

impl<'a> ItemCard<'a> {
    /// Create a card over the carousel state.
    pub fn new(state: &'a AppState, styles: &'a Palette) -> Self {
        Self { state, styles }
    }
}

impl Widget for ItemCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state.current_item() {
            Some(item) => render_item(item, self.state.crop, self.styles, area, buf),
            None if self.state.loading() => render_message("Loading…", self.styles, area, buf),
            None => render_message("No results", self.styles, area, buf),
        }
    }
}

fn render_message(text: &str, styles: &Palette, area: Rect, buf: &mut Buffer) {
    let vertical_center = Rect {
        y: area.y + area.height / 2,
        height: 1.min(area.height),
        ..area
    };
    Paragraph::new(Line::from(Span::styled(text, styles.muted)))
        .alignment(Alignment::Center)
        .render(vertical_center, buf);
}

fn render_item(item: &MediaItem, crop: CropMode, styles: &Palette, area: Rect, buf: &mut Buffer) {
    let metadata_height = 8u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(metadata_height)])
        .split(area);

    render_art_box(item, crop, styles, chunks[0], buf);
    render_metadata(item, styles, chunks[1], buf);
}

/// Placeholder art area. `Fit` letterboxes to a 16:9 region centered in the
/// available space; `Fill` takes the whole area.
fn render_art_box(item: &MediaItem, crop: CropMode, styles: &Palette, area: Rect, buf: &mut Buffer) {
    let art_area = match crop {
        CropMode::Fill => area,
        CropMode::Fit => {
            // Terminal cells are roughly twice as tall as wide, so 16:9
            // works out near width/4 rows.
            let target_height = (area.width / 4).max(1).min(area.height);
            let y = area.y + (area.height - target_height) / 2;
            Rect {
                y,
                height: target_height,
                ..area
            }
        }
    };

    let badge = Line::from(Span::styled(
        format!(" {} ", item.kind.badge()),
        styles.badge,
    ));
    Paragraph::new(badge)
        .block(Block::default().borders(Borders::ALL))
        .render(art_area, buf);
}

fn render_metadata(item: &MediaItem, styles: &Palette, area: Rect, buf: &mut Buffer) {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        truncated(&item.title, area.width.saturating_sub(2) as usize),
        styles.accent,
    )));

    if !item.performers.is_empty() {
        lines.push(meta_line("performers", item.performers.join(", "), styles));
    }
    if let Some(studio) = &item.studio {
        lines.push(meta_line("studio", studio.clone(), styles));
    }
    if let Some(date) = item.date {
        lines.push(meta_line("date", date.format("%Y-%m-%d").to_string(), styles));
    }
    if !item.tags.is_empty() {
        lines.push(meta_line("tags", item.tags.join(", "), styles));
    }
    let mut counters = Vec::new();
    if let Some(rating) = item.rating {
        counters.push(format!("rating {rating:.1}"));
    }
    if let Some(views) = item.view_count {
        counters.push(format!("{views} views"));
    }
    if !counters.is_empty() {
        lines.push(Line::from(Span::styled(counters.join("  ·  "), styles.muted)));
    }
    lines.push(meta_line("url", item.url.clone(), styles));

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::TOP))
        .render(area, buf);
}

fn meta_line(label: &str, value: String, styles: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), styles.muted),
        Span::raw(value),
    ])
}

/// Truncate to the display width, appending an ellipsis when cut.
fn truncated(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
