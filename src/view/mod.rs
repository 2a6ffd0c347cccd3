//! TUI rendering and terminal management (impure shell).
//!
//! The event loop owns the terminal, the carousel state, the fetch worker
//! handle, and the address sink. Input events and resolved fetch outcomes
//! both funnel into pure transitions from `state`; the effect lists they
//! return are executed here and nowhere else.

mod card;
mod overlay;
mod search_bar;
mod styles;

pub use card::ItemCard;
pub use overlay::{render_controls, render_help};
pub use search_bar::SearchBar;
pub use styles::{ColorConfig, Palette};

use crate::address::AddressSink;
use crate::catalog::{FetchHandle, MediaCatalog};
use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::{AppError, CatalogQuery, KeyAction};
use crate::state::{self, search_input, AppState, Effect, SearchInput};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("application error: {0}")]
    App(#[from] AppError),
}

/// Interval between timer ticks driving the debounce deadline, the overlay
/// countdown, and fetch outcome polling.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    fetcher: FetchHandle,
    address: Box<dyn AddressSink>,
    key_bindings: KeyBindings,
    styles: Palette,
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Build the application around an existing terminal and issue the
    /// startup load for the seeded query.
    pub fn with_terminal(
        terminal: Terminal<B>,
        fetcher: FetchHandle,
        address: Box<dyn AddressSink>,
        config: &ResolvedConfig,
        initial_query: CatalogQuery,
    ) -> Self {
        let mut app_state = AppState::new(
            initial_query,
            config.page_size,
            Duration::from_millis(config.debounce_ms),
            Duration::from_millis(config.overlay_timeout_ms),
        );
        app_state.overlay.touch(Instant::now());

        let mut app = Self {
            terminal,
            app_state,
            fetcher,
            address,
            key_bindings: KeyBindings::default(),
            styles: Palette::new(),
        };
        let effects = state::initial_load(&mut app.app_state);
        app.execute_effects(effects);
        app
    }

    /// Run the event loop until the user quits.
    ///
    /// Event-driven: input is handled as it arrives; the timer tick drives
    /// the debounce and overlay deadlines and polls fetch outcomes. Redraws
    /// happen only when something changed.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let mut dirty = false;

            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Resize(_, _) => {
                        dirty = true;
                    }
                    _ => {}
                }
            }

            dirty |= self.tick(Instant::now());

            if dirty {
                self.draw()?;
            }
        }
    }

    /// Drive the delayed actions: overlay countdown, debounce commit, and
    /// fetch outcome application. Returns whether anything changed.
    fn tick(&mut self, now: Instant) -> bool {
        let mut dirty = false;

        let overlay_was_visible = self.app_state.overlay.is_visible();
        self.app_state.overlay.tick(now);
        dirty |= overlay_was_visible != self.app_state.overlay.is_visible();

        if let Some(text) = self.app_state.debouncer.poll(now) {
            let effects = state::commit_query_text(&mut self.app_state, text);
            self.execute_effects(effects);
            dirty = true;
        }

        while let Some(outcome) = self.fetcher.try_outcome() {
            let effects = state::apply_fetch_outcome(&mut self.app_state, outcome);
            self.execute_effects(effects);
            dirty = true;
        }

        dirty
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let now = Instant::now();
        self.app_state.overlay.touch(now);

        // Ctrl+C should always quit, even mid-edit
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Text editing consumes every key while the search input is open
        if self.app_state.search.is_typing() {
            self.handle_search_key(key, now);
            return false;
        }

        let action = match self
            .key_bindings
            .get(KeyEvent::new(key.code, key.modifiers))
        {
            Some(action) => action,
            None => return false, // Unknown key, ignore
        };

        // The help overlay captures everything except its own dismissal
        if self.app_state.help_visible
            && !matches!(action, KeyAction::Help | KeyAction::Dismiss | KeyAction::Quit)
        {
            return false;
        }

        match action {
            KeyAction::Advance => {
                let effects = state::advance(&mut self.app_state);
                self.execute_effects(effects);
            }
            KeyAction::Retreat => {
                let effects = state::retreat(&mut self.app_state);
                self.execute_effects(effects);
            }
            KeyAction::StartSearch => {
                let seed = self.app_state.query.text.clone();
                self.app_state.search =
                    search_input::activate(self.app_state.search.clone(), &seed);
            }
            KeyAction::ToggleCrop => self.app_state.toggle_crop(),
            KeyAction::Refresh => {
                let effects = state::refresh(&mut self.app_state);
                self.execute_effects(effects);
            }
            KeyAction::Help => {
                self.app_state.help_visible = !self.app_state.help_visible;
            }
            KeyAction::Dismiss => {
                if self.app_state.help_visible {
                    self.app_state.help_visible = false;
                } else if self.app_state.notice.is_some() {
                    self.app_state.dismiss_notice();
                }
            }
            KeyAction::Quit => return true,
        }

        false
    }

    /// Handle a key while the search input is open.
    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.app_state.search =
                    search_input::insert_char(self.app_state.search.clone(), ch);
                self.note_search_change(now);
            }
            KeyCode::Backspace => {
                self.app_state.search = search_input::backspace(self.app_state.search.clone());
                self.note_search_change(now);
            }
            KeyCode::Left => {
                self.app_state.search = search_input::cursor_left(self.app_state.search.clone());
            }
            KeyCode::Right => {
                self.app_state.search = search_input::cursor_right(self.app_state.search.clone());
            }
            KeyCode::Enter => {
                // Explicit submit: commit the buffer immediately and disarm
                // the debouncer so the same text is not committed twice.
                if let SearchInput::Typing { buffer, .. } = &self.app_state.search {
                    let text = buffer.clone();
                    self.app_state.debouncer.cancel();
                    self.app_state.search = SearchInput::Inactive;
                    let effects = state::commit_query_text(&mut self.app_state, text);
                    self.execute_effects(effects);
                }
            }
            KeyCode::Esc => {
                self.app_state.search = search_input::cancel(self.app_state.search.clone());
                self.app_state.debouncer.cancel();
            }
            _ => {}
        }
    }

    /// Re-arm the debouncer with the current edit buffer.
    fn note_search_change(&mut self, now: Instant) {
        if let SearchInput::Typing { buffer, .. } = &self.app_state.search {
            self.app_state.debouncer.note_change(buffer.clone(), now);
        }
    }

    /// Execute the side effects returned by a pure transition.
    fn execute_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch(request) => {
                    debug!(
                        page = request.page,
                        generation = request.generation,
                        "issuing page fetch"
                    );
                    self.fetcher.request(request);
                }
                Effect::ItemChanged(index) => {
                    // Fire-and-forget viewed-item hook
                    let title = self
                        .app_state
                        .current_item()
                        .map(|item| item.title.clone())
                        .unwrap_or_default();
                    debug!(index, %title, "item changed");
                }
                Effect::PushAddress(text) => {
                    if let Err(err) = self.address.push_query(&text) {
                        warn!(%err, "failed to push query to address store");
                    }
                }
            }
        }
    }

    /// Render the current state.
    fn draw(&mut self) -> Result<(), TuiError> {
        let Self {
            terminal,
            app_state,
            styles,
            ..
        } = self;
        terminal.draw(|frame| render(frame, app_state, styles))?;
        Ok(())
    }
}

/// Compose the full frame from the carousel state.
fn render(frame: &mut Frame, state: &AppState, styles: &Palette) {
    let area = frame.area();
    frame.render_widget(ItemCard::new(state, styles), area);

    if state.search.is_typing() && area.height >= 3 {
        let bar = ratatui::layout::Rect {
            x: area.x,
            y: area.y + area.height - 3,
            width: area.width,
            height: 3,
        };
        frame.render_widget(SearchBar::new(&state.search, styles), bar);
    } else if state.overlay.is_visible() {
        render_controls(frame, state, styles);
    }

    if state.help_visible {
        render_help(frame, styles);
    }
}

/// Set up the terminal, run the carousel, and restore the terminal.
pub fn run_app<C>(
    catalog: C,
    address: Box<dyn AddressSink>,
    config: &ResolvedConfig,
    initial_query: CatalogQuery,
) -> Result<(), TuiError>
where
    C: MediaCatalog + Send + 'static,
{
    let fetcher = FetchHandle::spawn(catalog)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    let mut app = TuiApp::with_terminal(terminal, fetcher, address, config, initial_query);
    let result = app.run();

    // Restore the terminal even when the loop errored.
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AddressError;
    use crate::catalog::PageData;
    use crate::model::{CatalogError, MediaItem, MediaKind};
    use crate::state::FetchState;
    use ratatui::backend::TestBackend;
    use std::sync::{Arc, Mutex};
    use std::thread;

    /// Catalog answering from a canned script keyed by page number.
    struct ScriptedCatalog {
        pages: Vec<(u32, Result<PageData, CatalogError>)>,
    }

    impl MediaCatalog for ScriptedCatalog {
        fn search(&self, _query: &CatalogQuery, page: u32) -> Result<PageData, CatalogError> {
            self.pages
                .iter()
                .find(|(p, _)| *p == page)
                .map(|(_, r)| r.clone())
                .unwrap_or(Err(CatalogError::Server { status: 404 }))
        }
    }

    /// Address sink recording pushes into shared storage the test keeps.
    struct SharedAddress(Arc<Mutex<Vec<String>>>);

    impl AddressSink for SharedAddress {
        fn push_query(&mut self, text: &str) -> Result<(), AddressError> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn page_data(len: usize, total_pages: u32) -> PageData {
        PageData {
            items: (0..len)
                .map(|i| {
                    MediaItem::new(MediaKind::Video, format!("http://cat/{i}"), format!("clip {i}"))
                })
                .collect(),
            total_pages,
            total_results: total_pages as u64 * len as u64,
        }
    }

    fn test_config() -> ResolvedConfig {
        ResolvedConfig {
            debounce_ms: 0,
            ..ResolvedConfig::default()
        }
    }

    fn test_app(
        pages: Vec<(u32, Result<PageData, CatalogError>)>,
    ) -> (TuiApp<TestBackend>, Arc<Mutex<Vec<String>>>) {
        let pushed = Arc::new(Mutex::new(Vec::new()));
        let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let fetcher = FetchHandle::spawn(ScriptedCatalog { pages }).unwrap();
        let app = TuiApp::with_terminal(
            terminal,
            fetcher,
            Box::new(SharedAddress(pushed.clone())),
            &test_config(),
            CatalogQuery::new(""),
        );
        (app, pushed)
    }

    /// Tick until the pending fetch resolves.
    fn pump(app: &mut TuiApp<TestBackend>) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while app.app_state.loading() {
            app.tick(Instant::now());
            assert!(Instant::now() < deadline, "timed out waiting for fetch");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn press(app: &mut TuiApp<TestBackend>, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn startup_loads_the_first_page() {
        let (mut app, _) = test_app(vec![(1, Ok(page_data(5, 1)))]);

        pump(&mut app);

        assert_eq!(app.app_state.page.len(), 5);
        assert_eq!(app.app_state.cursor.index, 0);
    }

    #[test]
    fn advance_key_moves_the_cursor() {
        let (mut app, _) = test_app(vec![(1, Ok(page_data(5, 1)))]);
        pump(&mut app);

        let quit = press(&mut app, KeyCode::Right);

        assert!(!quit);
        assert_eq!(app.app_state.cursor.index, 1);
    }

    #[test]
    fn advance_at_page_end_crosses_to_the_next_page() {
        let (mut app, _) = test_app(vec![
            (1, Ok(page_data(3, 2))),
            (2, Ok(page_data(3, 2))),
        ]);
        pump(&mut app);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.app_state.cursor.index, 2);

        press(&mut app, KeyCode::Right);
        assert!(app.app_state.loading(), "boundary crossing fetches page 2");
        pump(&mut app);

        assert_eq!(app.app_state.page.page_number(), 2);
        assert_eq!(app.app_state.cursor.index, 0);
    }

    #[test]
    fn quit_key_exits() {
        let (mut app, _) = test_app(vec![(1, Ok(page_data(1, 1)))]);
        pump(&mut app);

        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn typed_query_commits_on_enter_and_pushes_the_address() {
        let (mut app, pushed) = test_app(vec![(1, Ok(page_data(5, 1)))]);
        pump(&mut app);

        press(&mut app, KeyCode::Char('/'));
        assert!(app.app_state.search.is_typing());
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.app_state.query.text, "ab");
        assert!(!app.app_state.search.is_typing());
        assert!(matches!(app.app_state.fetch, FetchState::Loading { .. }));
        assert_eq!(*pushed.lock().unwrap(), vec!["ab".to_string()]);
    }

    #[test]
    fn quiet_interval_commits_the_debounced_query() {
        // debounce_ms = 0 in the test config: the first tick after a
        // keystroke is past the deadline.
        let (mut app, pushed) = test_app(vec![(1, Ok(page_data(5, 1)))]);
        pump(&mut app);

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('x'));
        app.tick(Instant::now() + Duration::from_millis(1));

        assert_eq!(app.app_state.query.text, "x");
        assert_eq!(*pushed.lock().unwrap(), vec!["x".to_string()]);
        assert!(
            app.app_state.search.is_typing(),
            "debounced commit keeps the input open for further edits"
        );
    }

    #[test]
    fn escape_cancels_the_edit_and_its_pending_commit() {
        let (mut app, pushed) = test_app(vec![(1, Ok(page_data(5, 1)))]);
        pump(&mut app);

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('z'));
        press(&mut app, KeyCode::Esc);
        app.tick(Instant::now() + Duration::from_millis(1));

        assert_eq!(app.app_state.query.text, "", "cancelled edit never commits");
        assert!(pushed.lock().unwrap().is_empty());
    }

    #[test]
    fn failed_boundary_fetch_surfaces_a_notice_and_keeps_position() {
        let (mut app, _) = test_app(vec![
            (1, Ok(page_data(2, 2))),
            (
                2,
                Err(CatalogError::Network {
                    message: "unreachable".to_string(),
                }),
            ),
        ]);
        pump(&mut app);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.app_state.cursor.index, 1);

        press(&mut app, KeyCode::Right);
        pump(&mut app);

        assert_eq!(app.app_state.cursor.index, 1, "cursor survives the failure");
        assert_eq!(app.app_state.page.page_number(), 1);
        assert!(app.app_state.notice.is_some());

        // Esc dismisses the notice.
        press(&mut app, KeyCode::Esc);
        assert!(app.app_state.notice.is_none());
    }

    #[test]
    fn draw_renders_without_panicking() {
        let (mut app, _) = test_app(vec![(1, Ok(page_data(5, 1)))]);
        pump(&mut app);

        app.draw().unwrap();
    }
}
