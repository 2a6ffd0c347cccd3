//! Controls/metadata overlay and the help overlay.
//!
//! The controls overlay is the auto-hiding strip at the bottom of the
//! screen: position within the collection, navigation gates, the active
//! query, a loading badge, the transient notice line, and key hints. Its
//! visibility is owned by `state::Overlay`; this module only draws.

use crate::state::AppState;
use crate::view::styles::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Height of the controls strip including its border.
const CONTROLS_HEIGHT: u16 = 6;

/// Render the auto-hiding controls strip at the bottom of the screen.
pub fn render_controls(frame: &mut Frame, state: &AppState, styles: &Palette) {
    let area = frame.area();
    if area.height < CONTROLS_HEIGHT {
        return;
    }
    let strip = Rect {
        x: area.x,
        y: area.y + area.height - CONTROLS_HEIGHT,
        width: area.width,
        height: CONTROLS_HEIGHT,
    };

    frame.render_widget(Clear, strip);

    let mut lines = vec![position_line(state, styles), gates_line(state, styles)];
    if !state.query.text.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("search: ", styles.muted),
            Span::raw(format!("\"{}\"", state.query.text)),
        ]));
    }
    if let Some(notice) = &state.notice {
        lines.push(Line::from(Span::styled(notice.text.clone(), styles.error)));
    }
    lines.push(Line::from(Span::styled(
        "←/→ navigate · / search · c crop · r refresh · ? help · q quit",
        styles.muted,
    )));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Left);
    frame.render_widget(paragraph, strip);
}

fn position_line(state: &AppState, styles: &Palette) -> Line<'static> {
    if state.page.is_empty() {
        return Line::from(Span::styled(
            format!("{} results", state.page.total_results()),
            styles.muted,
        ));
    }
    Line::from(Span::raw(format!(
        "item {}/{} · page {}/{} · {} results",
        state.cursor.index + 1,
        state.page.len(),
        state.page.page_number(),
        state.page.total_pages(),
        state.page.total_results(),
    )))
}

fn gates_line(state: &AppState, styles: &Palette) -> Line<'static> {
    let previous_style = if state.has_previous() {
        Style::default()
    } else {
        styles.disabled
    };
    let next_style = if state.has_next() {
        Style::default()
    } else {
        styles.disabled
    };

    let mut spans = vec![
        Span::styled("‹ prev", previous_style),
        Span::raw("   "),
        Span::styled("next ›", next_style),
    ];
    if state.loading() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled("FETCHING…", styles.loading));
    }
    Line::from(spans)
}

/// Render the help overlay centered on the screen.
pub fn render_help(frame: &mut Frame, styles: &Palette) {
    let area = frame.area();
    let popup = centered_rect(60, 60, area);

    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(Span::styled("Navigation", styles.accent)),
        Line::from("  l / → / Space   next item"),
        Line::from("  h / ←           previous item"),
        Line::from(""),
        Line::from(Span::styled("Search", styles.accent)),
        Line::from("  / or Ctrl+f     edit search text"),
        Line::from("  Enter           commit immediately"),
        Line::from("  Esc             cancel editing"),
        Line::from(""),
        Line::from(Span::styled("Display", styles.accent)),
        Line::from("  c               toggle crop (fit/fill)"),
        Line::from(""),
        Line::from(Span::styled("Application", styles.accent)),
        Line::from("  r               refresh current page"),
        Line::from("  Esc             dismiss notice / close help"),
        Line::from("  q / Ctrl+c      quit"),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Keyboard Shortcuts ")
            .borders(Borders::ALL)
            .border_style(styles.accent),
    );
    frame.render_widget(paragraph, popup);
}

/// Rect centered on `area` with the given percentage of width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
