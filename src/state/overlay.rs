//! Auto-hiding controls/metadata overlay.
//!
//! A single countdown governs visibility: any qualifying interaction forces
//! the overlay visible and re-arms the deadline, replacing the previous one
//! exactly - there are never two countdowns racing to flip visibility. Pure
//! presentation state with injected time.

use std::time::{Duration, Instant};

/// Overlay visibility state machine.
#[derive(Debug)]
pub struct Overlay {
    timeout: Duration,
    hide_at: Option<Instant>,
    visible: bool,
}

impl Overlay {
    /// Overlay with the given idle timeout, initially visible.
    ///
    /// The countdown starts on the first [`touch`](Self::touch); until then
    /// the overlay stays up so a freshly launched carousel shows its
    /// controls.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            hide_at: None,
            visible: true,
        }
    }

    /// Record an interaction at `now`: force visible and re-arm the
    /// countdown.
    pub fn touch(&mut self, now: Instant) {
        self.visible = true;
        self.hide_at = Some(now + self.timeout);
    }

    /// Advance time to `now`, hiding the overlay if the countdown expired
    /// with no further interaction.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.hide_at {
            if deadline <= now {
                self.visible = false;
                self.hide_at = None;
            }
        }
    }

    /// Whether the overlay should be rendered.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;
