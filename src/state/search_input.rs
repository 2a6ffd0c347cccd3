//! Search input handling (pure state transitions) and the query debouncer.
//!
//! The input side is a typing state machine in the same shape as the other
//! handlers: pure functions from state to state. The [`Debouncer`] sits
//! between keystrokes and the query-change reconciler: it re-arms a single
//! deadline on every change and releases only the final value once input
//! has been quiet for the configured interval (trailing edge). Time is
//! injected so tests never sleep.

use std::time::{Duration, Instant};

/// Search text input state machine. Sum type - exactly one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchInput {
    /// Search input is closed.
    Inactive,
    /// User is editing the search text.
    Typing {
        /// Text entered so far.
        buffer: String,
        /// Byte cursor position within `buffer`.
        cursor: usize,
    },
}

impl SearchInput {
    /// True while the user is editing.
    pub fn is_typing(&self) -> bool {
        matches!(self, SearchInput::Typing { .. })
    }
}

/// Open the search input, seeding it with the active query text.
///
/// No-op if already typing.
pub fn activate(state: SearchInput, current_text: &str) -> SearchInput {
    match state {
        SearchInput::Inactive => SearchInput::Typing {
            cursor: current_text.len(),
            buffer: current_text.to_string(),
        },
        other => other,
    }
}

/// Close the search input, discarding the edit buffer.
pub fn cancel(state: SearchInput) -> SearchInput {
    match state {
        SearchInput::Typing { .. } | SearchInput::Inactive => SearchInput::Inactive,
    }
}

/// Insert a character at the cursor and advance it.
///
/// No-op if not typing.
pub fn insert_char(state: SearchInput, ch: char) -> SearchInput {
    match state {
        SearchInput::Typing { mut buffer, cursor } => {
            buffer.insert(cursor, ch);
            SearchInput::Typing {
                buffer,
                cursor: cursor + ch.len_utf8(),
            }
        }
        other => other,
    }
}

/// Delete the character before the cursor, if any.
///
/// No-op if not typing or at the start.
pub fn backspace(state: SearchInput) -> SearchInput {
    match state {
        SearchInput::Typing { mut buffer, cursor } if cursor > 0 => {
            let prev = previous_char_boundary(&buffer, cursor);
            buffer.remove(prev);
            SearchInput::Typing {
                buffer,
                cursor: prev,
            }
        }
        other => other,
    }
}

/// Move the cursor one character left, saturating at the start.
pub fn cursor_left(state: SearchInput) -> SearchInput {
    match state {
        SearchInput::Typing { buffer, cursor } => {
            let cursor = previous_char_boundary(&buffer, cursor);
            SearchInput::Typing { buffer, cursor }
        }
        other => other,
    }
}

/// Move the cursor one character right, saturating at the end.
pub fn cursor_right(state: SearchInput) -> SearchInput {
    match state {
        SearchInput::Typing { buffer, cursor } => {
            let cursor = next_char_boundary(&buffer, cursor);
            SearchInput::Typing { buffer, cursor }
        }
        other => other,
    }
}

fn previous_char_boundary(s: &str, index: usize) -> usize {
    s[..index]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(s: &str, index: usize) -> usize {
    s[index..]
        .chars()
        .next()
        .map(|c| index + c.len_utf8())
        .unwrap_or(index)
}

// ===== Debouncer =====

/// Trailing-edge debouncer between keystrokes and query commits.
///
/// Holds at most one pending value: every [`note_change`](Self::note_change)
/// replaces both the value and the deadline, so a burst of keystrokes
/// coalesces into a single commit of the last value once input pauses for
/// the quiet interval. No commit is ever skipped - the pending value stays
/// armed until polled out or cancelled.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<(Instant, String)>,
}

impl Debouncer {
    /// Debouncer with the given quiet interval.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Record a text change at `now`, re-arming the deadline.
    pub fn note_change(&mut self, text: String, now: Instant) {
        self.pending = Some((now + self.quiet, text));
    }

    /// Release the pending value if its deadline has passed.
    ///
    /// Call from the event loop tick. Returns `Some` at most once per
    /// armed value.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => {
                self.pending.take().map(|(_, text)| text)
            }
            _ => None,
        }
    }

    /// Take the pending value immediately, regardless of its deadline.
    ///
    /// Used when the user submits explicitly (Enter) so the same value is
    /// not committed a second time by a later poll.
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(_, text)| text)
    }

    /// Drop the pending value without committing it.
    ///
    /// Used when search input is cancelled or the carousel shuts down.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// True while a value is armed and waiting for its deadline.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_input_tests.rs"]
mod tests;
