//! Search bar widget rendering the search text input.

use crate::state::SearchInput;
use crate::view::styles::Palette;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search bar widget.
/// Renders the input line with a block cursor while typing.
pub struct SearchBar<'a> {
    search: &'a SearchInput,
    styles: &'a Palette,
}

impl<'a> SearchBar<'a> {
    /// Create a new SearchBar widget.
    pub fn new(search: &'a SearchInput, styles: &'a Palette) -> Self {
        Self { search, styles }
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let SearchInput::Typing { buffer, cursor } = self.search else {
            return;
        };

        // Split the buffer around the cursor so the cursor cell can be
        // styled as a block.
        let before = &buffer[..*cursor];
        let mut after_chars = buffer[*cursor..].chars();
        let (cursor_char, after) = match after_chars.next() {
            Some(ch) => (ch.to_string(), after_chars.as_str().to_string()),
            None => (" ".to_string(), String::new()),
        };

        let line = Line::from(vec![
            Span::raw(before),
            Span::styled(cursor_char, self.styles.cursor),
            Span::raw(after),
        ]);

        Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL).title("Search"))
            .render(area, buf);
    }
}
