//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by
/// `config::KeyBindings`. Every input device funnels through these two
/// navigation actions - there is no device-specific bypass of the
/// carousel state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Carousel navigation
    /// Move to the next item, crossing a page boundary if needed. Default: l/→/Space
    Advance,
    /// Move to the previous item, crossing a page boundary if needed. Default: h/←
    Retreat,

    // Search
    /// Activate the search input. Default: //Ctrl+f
    StartSearch,

    // Display preferences
    /// Toggle the art box between fit and fill proportions. Default: c
    ToggleCrop,

    // Application controls
    /// Re-fetch the current page for the active query. Default: r
    Refresh,
    /// Toggle the help overlay. Default: ?
    Help,
    /// Contextual dismiss: close help, cancel search input, or dismiss the
    /// notice line. Default: Esc
    Dismiss,
    /// Exit the application. Default: q/Ctrl+C
    Quit,
}
