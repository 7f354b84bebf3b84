//! App state and core application logic
//!
//! The `App` owns every piece of screen state and is the only writer of it.
//! Key handling and fetch-completion handling both run on the event-loop
//! task; each returns an optional [`Effect`] describing a fetch the loop
//! should start. Completion events carry the ticket minted when the fetch
//! was requested, and an event is applied only if its ticket is still the
//! latest one for that slot.

use crate::api::SubtitleRequest;
use crate::fetch::{Effect, FetchEvent};
use crate::models::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

// =============================================================================
// Screens
// =============================================================================

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Trending content plus the search entry point
    #[default]
    Home,
    /// Search input and results
    Search,
    /// Hero metadata, season rail, episode grid
    Detail,
    /// Subtitle lookup for the current item
    Subtitles,
}

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Loading State
// =============================================================================

/// Loading state for async operations
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    /// Idle - no loading in progress
    #[default]
    Idle,
    /// Loading with optional message
    Loading(Option<String>),
    /// Error with message
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Loading(Some(msg)) => Some(msg),
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Fetch Tickets
// =============================================================================

/// Monotonic ticket counter shared by every fetch slot.
///
/// Each requested fetch takes the next value; a slot remembers the ticket of
/// its most recent request and ignores completion events carrying any other
/// value. Minting is the only way a ticket is produced, so a superseded
/// request can never impersonate its successor.
#[derive(Debug, Clone, Default)]
pub struct Tickets {
    next: u64,
}

impl Tickets {
    pub fn mint(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    /// The most recently minted ticket
    pub fn latest(&self) -> u64 {
        self.next
    }
}

// =============================================================================
// Selection State (per-view)
// =============================================================================

/// Cursor over a list view
#[derive(Debug, Clone, Default)]
pub struct ListCursor {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListCursor {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    /// Move selection up. Returns true if the selection moved.
    pub fn up(&mut self) -> bool {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
            true
        } else {
            false
        }
    }

    /// Move selection down. Returns true if the selection moved.
    pub fn down(&mut self) -> bool {
        if self.len > 0 && self.selected + 1 < self.len {
            self.selected += 1;
            true
        } else {
            false
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
    }

    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update offset to keep the selected item visible
    pub fn scroll_into_view(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible_height {
            self.offset = self.selected - visible_height + 1;
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Update length, clamping the selection into range
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// Browse & Search State
// =============================================================================

/// Home screen state: trending items
#[derive(Debug, Clone, Default)]
pub struct BrowseState {
    pub items: Vec<MediaItem>,
    pub list: ListCursor,
    pub loading: LoadingState,
    pub ticket: u64,
}

impl BrowseState {
    pub fn begin_fetch(&mut self, tickets: &mut Tickets) -> Effect {
        self.loading = LoadingState::Loading(Some("Loading trending...".into()));
        self.ticket = tickets.mint();
        Effect::Trending {
            ticket: self.ticket,
        }
    }

    pub fn set_items(&mut self, items: Vec<MediaItem>) {
        self.list.set_len(items.len());
        self.items = items;
        self.loading = LoadingState::Idle;
    }

    pub fn selected_item(&self) -> Option<&MediaItem> {
        self.items.get(self.list.selected)
    }
}

/// Search screen state
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Search query
    pub query: String,
    /// Cursor position in the query, as a char index
    pub cursor: usize,
    /// Search results
    pub results: Vec<MediaItem>,
    /// Results list cursor
    pub list: ListCursor,
    /// Loading state
    pub loading: LoadingState,
    /// Ticket of the latest issued search
    pub ticket: u64,
}

impl SearchState {
    /// Byte offset of the char the cursor sits on
    fn byte_cursor(&self) -> usize {
        self.query
            .char_indices()
            .nth(self.cursor)
            .map(|(at, _)| at)
            .unwrap_or(self.query.len())
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_cursor();
        self.query.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_cursor();
            self.query.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        let at = self.byte_cursor();
        if at < self.query.len() {
            self.query.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.query.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.query.chars().count();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Issue a search for the current query. Empty queries fetch nothing.
    pub fn begin_fetch(&mut self, tickets: &mut Tickets) -> Option<Effect> {
        let query = self.query.trim();
        if query.is_empty() {
            return None;
        }
        self.loading = LoadingState::Loading(Some(format!("Searching \"{}\"...", query)));
        self.ticket = tickets.mint();
        Some(Effect::Search {
            ticket: self.ticket,
            query: query.to_string(),
        })
    }

    /// Set results and update the list cursor
    pub fn set_results(&mut self, results: Vec<MediaItem>) {
        self.list.set_len(results.len());
        self.results = results;
        self.loading = LoadingState::Idle;
    }

    pub fn selected_result(&self) -> Option<&MediaItem> {
        self.results.get(self.list.selected)
    }
}

// =============================================================================
// Detail State
// =============================================================================

/// Focused panel on the detail screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailFocus {
    #[default]
    Info,
    Seasons,
    Episodes,
}

impl DetailFocus {
    /// Cycle forward. Items without seasons keep focus on the info panel.
    pub fn next(self, has_seasons: bool) -> Self {
        if !has_seasons {
            return DetailFocus::Info;
        }
        match self {
            DetailFocus::Info => DetailFocus::Seasons,
            DetailFocus::Seasons => DetailFocus::Episodes,
            DetailFocus::Episodes => DetailFocus::Info,
        }
    }

    /// Cycle backward
    pub fn prev(self, has_seasons: bool) -> Self {
        if !has_seasons {
            return DetailFocus::Info;
        }
        match self {
            DetailFocus::Info => DetailFocus::Episodes,
            DetailFocus::Seasons => DetailFocus::Info,
            DetailFocus::Episodes => DetailFocus::Seasons,
        }
    }
}

/// Detail screen state.
///
/// The working item starts as the (possibly partial) item the screen was
/// opened with and is replaced wholesale when the details fetch resolves.
/// The episode list always belongs to `selected_season`; season selection
/// clears it in the same call that issues the replacement fetch.
#[derive(Debug, Clone)]
pub struct DetailState {
    pub item: MediaItem,
    pub seasons: Vec<SeasonSummary>,
    pub season_list: ListCursor,
    pub selected_season: Option<u8>,
    pub episodes: Vec<Episode>,
    pub episode_list: ListCursor,
    pub focus: DetailFocus,
    pub details: LoadingState,
    pub episodes_loading: LoadingState,
    pub overview_scroll: u16,
    /// Ticket of the latest details request
    pub details_ticket: u64,
    /// Ticket of the latest episodes request
    pub episodes_ticket: u64,
}

impl DetailState {
    /// Open the screen for an item and issue the background details fetch.
    /// The hero panel renders from `item` as handed in; enrichment arrives
    /// later.
    pub fn open(item: MediaItem, tickets: &mut Tickets) -> (Self, Effect) {
        let ticket = tickets.mint();
        let effect = match item.kind {
            MediaKind::Movie => Effect::MovieDetails {
                ticket,
                id: item.id,
            },
            MediaKind::Tv => Effect::ShowDetails {
                ticket,
                id: item.id,
            },
        };
        let state = Self {
            item,
            seasons: Vec::new(),
            season_list: ListCursor::new(0),
            selected_season: None,
            episodes: Vec::new(),
            episode_list: ListCursor::new(0),
            focus: DetailFocus::Info,
            details: LoadingState::Loading(Some("Loading details...".into())),
            episodes_loading: LoadingState::Idle,
            overview_scroll: 0,
            details_ticket: ticket,
            episodes_ticket: 0,
        };
        (state, effect)
    }

    /// Apply a successful details fetch: replace the working item and the
    /// season list, select season index 0, and issue its episodes fetch.
    /// With no seasons the screen stays idle with an empty episode list.
    pub fn apply_details(
        &mut self,
        item: MediaItem,
        seasons: Vec<SeasonSummary>,
        tickets: &mut Tickets,
    ) -> Option<Effect> {
        self.item = item;
        self.seasons = seasons;
        self.season_list.set_len(self.seasons.len());
        self.season_list.reset();
        self.details = LoadingState::Idle;

        if self.seasons.is_empty() {
            self.selected_season = None;
            None
        } else {
            self.select_season(0, tickets)
        }
    }

    /// Apply a failed details fetch: clear the loading flag, keep the
    /// season list empty. The caller surfaces the error.
    pub fn apply_details_error(&mut self) {
        self.details = LoadingState::Idle;
    }

    /// Select the season at `index`: atomically set the selected season
    /// number, clear the episode list, and issue the episodes fetch.
    pub fn select_season(&mut self, index: usize, tickets: &mut Tickets) -> Option<Effect> {
        let season = self.seasons.get(index)?;
        let number = season.season_number;
        self.selected_season = Some(number);
        self.episodes.clear();
        self.episode_list.set_len(0);
        self.episodes_loading = LoadingState::Loading(Some(format!("Loading season {}...", number)));
        self.episodes_ticket = tickets.mint();
        Some(Effect::Episodes {
            ticket: self.episodes_ticket,
            show_id: self.item.id,
            season: number,
        })
    }

    /// Move the season cursor up; a move selects the season it lands on
    pub fn season_up(&mut self, tickets: &mut Tickets) -> Option<Effect> {
        if self.season_list.up() {
            self.select_season(self.season_list.selected, tickets)
        } else {
            None
        }
    }

    /// Move the season cursor down; a move selects the season it lands on
    pub fn season_down(&mut self, tickets: &mut Tickets) -> Option<Effect> {
        if self.season_list.down() {
            self.select_season(self.season_list.selected, tickets)
        } else {
            None
        }
    }

    /// Apply a successful episodes fetch
    pub fn apply_episodes(&mut self, episodes: Vec<Episode>) {
        self.episode_list.set_len(episodes.len());
        self.episode_list.reset();
        self.episodes = episodes;
        self.episodes_loading = LoadingState::Idle;
    }

    /// Apply a failed episodes fetch: the list stays empty, the loading
    /// flag clears. The caller surfaces the error.
    pub fn apply_episodes_error(&mut self) {
        self.episodes_loading = LoadingState::Idle;
    }

    pub fn selected_episode(&self) -> Option<&Episode> {
        self.episodes.get(self.episode_list.selected)
    }

    /// Build the playable descriptor for the highlighted episode. The
    /// descriptor is surfaced as a notification only; nothing is played.
    pub fn activate_episode(&self) -> Option<PlayRequest> {
        self.selected_episode()
            .map(|ep| PlayRequest::for_episode(&self.item, ep))
    }

    pub fn has_seasons(&self) -> bool {
        !self.seasons.is_empty()
    }
}

// =============================================================================
// Subtitles State
// =============================================================================

/// What a subtitle lookup is probing, for header display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleTarget {
    pub title: String,
    pub request: SubtitleRequest,
}

/// Subtitle screen state
#[derive(Debug, Clone, Default)]
pub struct SubtitlesState {
    pub target: Option<SubtitleTarget>,
    pub subtitles: Vec<Subtitle>,
    pub list: ListCursor,
    pub loading: LoadingState,
    pub ticket: u64,
}

impl SubtitlesState {
    /// Start a lookup: one fetch per probe
    pub fn begin_probe(
        &mut self,
        title: String,
        request: SubtitleRequest,
        tickets: &mut Tickets,
    ) -> Effect {
        self.subtitles.clear();
        self.list.set_len(0);
        self.loading = LoadingState::Loading(Some("Searching subtitles...".into()));
        self.ticket = tickets.mint();
        self.target = Some(SubtitleTarget {
            title,
            request: request.clone(),
        });
        Effect::Subtitles {
            ticket: self.ticket,
            request,
        }
    }

    pub fn set_subtitles(&mut self, subtitles: Vec<Subtitle>) {
        self.list.set_len(subtitles.len());
        self.subtitles = subtitles;
        self.loading = LoadingState::Idle;
    }

    pub fn selected_subtitle(&self) -> Option<&Subtitle> {
        self.subtitles.get(self.list.selected)
    }

    /// One-line outcome of the probe: the first result's language and
    /// locator on success, the empty-state text, or the error verbatim.
    pub fn summary(&self) -> String {
        match &self.loading {
            LoadingState::Loading(_) => "Searching subtitles...".to_string(),
            LoadingState::Error(msg) => format!("Error: {}", msg),
            LoadingState::Idle => match self.subtitles.first() {
                Some(first) => first.to_string(),
                None => "No subtitles found".to_string(),
            },
        }
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state: single writer of everything below
#[derive(Debug)]
pub struct App {
    /// Current screen
    pub screen: Screen,
    /// Navigation history stack
    pub nav_stack: Vec<Screen>,
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Transient error notification (cleared on next keypress)
    pub error: Option<String>,
    /// Transient status line (cleared on next keypress)
    pub status: Option<String>,
    /// Preferred subtitle language code
    pub subtitle_language: String,
    /// The descriptor from the last episode activation
    pub last_play: Option<PlayRequest>,

    // View-specific states
    pub browse: BrowseState,
    pub search: SearchState,
    pub detail: Option<DetailState>,
    pub subtitles: SubtitlesState,

    /// Fetch ticket counter
    pub tickets: Tickets,
}

impl Default for App {
    fn default() -> Self {
        Self {
            screen: Screen::Home,
            nav_stack: Vec::new(),
            running: true,
            input_mode: InputMode::Normal,
            error: None,
            status: None,
            subtitle_language: "en".to_string(),
            last_play: None,

            browse: BrowseState::default(),
            search: SearchState::default(),
            detail: None,
            subtitles: SubtitlesState::default(),

            tickets: Tickets::default(),
        }
    }
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial fetch when the TUI starts
    pub fn start(&mut self) -> Effect {
        self.browse.begin_fetch(&mut self.tickets)
    }

    /// Navigate to a new screen, pushing current to stack
    pub fn navigate(&mut self, screen: Screen) {
        if self.screen != screen {
            self.nav_stack.push(self.screen);
            self.screen = screen;
        }
        self.input_mode = InputMode::Normal;
    }

    /// Go back to the previous screen
    pub fn back(&mut self) -> bool {
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            return true;
        }

        if let Some(prev) = self.nav_stack.pop() {
            self.screen = prev;
            true
        } else {
            false
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    /// Focus the search input
    pub fn focus_search(&mut self) {
        self.navigate(Screen::Search);
        self.input_mode = InputMode::Editing;
    }

    /// Open the detail screen for an item.
    ///
    /// Without an item there is nothing to render a hero from, so the
    /// navigation is refused and no detail state is created.
    pub fn open_detail(&mut self, item: Option<MediaItem>) -> Option<Effect> {
        let Some(item) = item else {
            debug!("detail open refused: no media item");
            return None;
        };
        let (detail, effect) = DetailState::open(item, &mut self.tickets);
        self.detail = Some(detail);
        self.navigate(Screen::Detail);
        Some(effect)
    }

    /// Open the subtitle screen probing the item on the detail screen.
    /// Shows probe the highlighted episode (or the selected season's first
    /// episode); movies probe directly.
    pub fn open_subtitles(&mut self) -> Option<Effect> {
        let Some(detail) = self.detail.as_ref() else {
            return None;
        };

        let Some(imdb_id) = detail.item.imdb_id.clone() else {
            self.set_error("No IMDb id available for this title yet");
            return None;
        };

        let request = match detail.item.kind {
            MediaKind::Movie => SubtitleRequest::movie(imdb_id),
            MediaKind::Tv => {
                let season = detail.selected_season.unwrap_or(1);
                let episode = detail.selected_episode().map(|e| e.number).unwrap_or(1);
                SubtitleRequest::episode(imdb_id, season, episode)
            }
        }
        .with_language(self.subtitle_language.clone());

        let title = detail.item.title.clone();
        let effect = self
            .subtitles
            .begin_probe(title, request, &mut self.tickets);
        self.navigate(Screen::Subtitles);
        Some(effect)
    }

    // -------------------------------------------------------------------------
    // Fetch Completion Handling
    // -------------------------------------------------------------------------

    /// Apply a fetch completion event. Events whose ticket is not the
    /// latest for their slot are discarded. A successful details event may
    /// chain into an episodes fetch for the auto-selected first season.
    pub fn apply_fetch(&mut self, event: FetchEvent) -> Option<Effect> {
        match event {
            FetchEvent::BrowseLoaded { ticket, items } => {
                if ticket != self.browse.ticket {
                    debug!(ticket, current = self.browse.ticket, "ignoring stale trending");
                    return None;
                }
                self.browse.set_items(items);
                None
            }
            FetchEvent::BrowseFailed { ticket, error } => {
                if ticket != self.browse.ticket {
                    return None;
                }
                self.browse.loading = LoadingState::Error(error);
                None
            }
            FetchEvent::SearchLoaded { ticket, items } => {
                if ticket != self.search.ticket {
                    debug!(ticket, current = self.search.ticket, "ignoring stale search");
                    return None;
                }
                self.search.set_results(items);
                None
            }
            FetchEvent::SearchFailed { ticket, error } => {
                if ticket != self.search.ticket {
                    return None;
                }
                self.search.loading = LoadingState::Error(error);
                None
            }
            FetchEvent::DetailsLoaded {
                ticket,
                item,
                seasons,
            } => {
                let detail = self.detail.as_mut()?;
                if ticket != detail.details_ticket {
                    debug!(ticket, current = detail.details_ticket, "ignoring stale details");
                    return None;
                }
                detail.apply_details(*item, seasons, &mut self.tickets)
            }
            FetchEvent::DetailsFailed { ticket, error } => {
                let detail = self.detail.as_mut()?;
                if ticket != detail.details_ticket {
                    return None;
                }
                detail.apply_details_error();
                self.error = Some(error);
                None
            }
            FetchEvent::EpisodesLoaded {
                ticket,
                season,
                episodes,
            } => {
                let detail = self.detail.as_mut()?;
                if ticket != detail.episodes_ticket {
                    debug!(
                        ticket,
                        current = detail.episodes_ticket,
                        season,
                        "ignoring stale episodes"
                    );
                    return None;
                }
                detail.apply_episodes(episodes);
                None
            }
            FetchEvent::EpisodesFailed {
                ticket,
                season,
                error,
            } => {
                let detail = self.detail.as_mut()?;
                if ticket != detail.episodes_ticket {
                    debug!(ticket, season, "ignoring stale episodes error");
                    return None;
                }
                detail.apply_episodes_error();
                self.error = Some(error);
                None
            }
            FetchEvent::SubtitlesLoaded { ticket, subtitles } => {
                if ticket != self.subtitles.ticket {
                    debug!(ticket, current = self.subtitles.ticket, "ignoring stale subtitles");
                    return None;
                }
                self.subtitles.set_subtitles(subtitles);
                None
            }
            FetchEvent::SubtitlesFailed { ticket, error } => {
                if ticket != self.subtitles.ticket {
                    return None;
                }
                self.subtitles.loading = LoadingState::Error(error);
                None
            }
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle a keyboard event, returning any fetch it kicked off
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        // Transient notifications last until the next keypress
        self.error = None;
        self.status = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                None
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.search.begin_fetch(&mut self.tickets)
            }
            KeyCode::Char(c) => {
                self.search.insert(c);
                None
            }
            KeyCode::Backspace => {
                self.search.backspace();
                None
            }
            KeyCode::Delete => {
                self.search.delete();
                None
            }
            KeyCode::Left => {
                self.search.cursor_left();
                None
            }
            KeyCode::Right => {
                self.search.cursor_right();
                None
            }
            KeyCode::Home => {
                self.search.cursor_home();
                None
            }
            KeyCode::End => {
                self.search.cursor_end();
                None
            }
            _ => None,
        }
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return None;
            }
            KeyCode::Char('/') => {
                self.focus_search();
                return None;
            }
            KeyCode::Esc => {
                self.back();
                return None;
            }
            _ => {}
        }

        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Search => self.handle_search_key(key),
            Screen::Detail => self.handle_detail_key(key),
            Screen::Subtitles => self.handle_subtitles_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.browse.list.up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.browse.list.down();
                None
            }
            KeyCode::PageUp => {
                self.browse.list.page_up(10);
                None
            }
            KeyCode::PageDown => {
                self.browse.list.page_down(10);
                None
            }
            KeyCode::Char('r') => Some(self.browse.begin_fetch(&mut self.tickets)),
            KeyCode::Enter => {
                let item = self.browse.selected_item().cloned();
                self.open_detail(item)
            }
            _ => None,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.search.list.up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.search.list.down();
                None
            }
            KeyCode::PageUp => {
                self.search.list.page_up(10);
                None
            }
            KeyCode::PageDown => {
                self.search.list.page_down(10);
                None
            }
            KeyCode::Home => {
                self.search.list.first();
                None
            }
            KeyCode::End => {
                self.search.list.last();
                None
            }
            KeyCode::Enter => {
                let item = self.search.selected_result().cloned();
                self.open_detail(item)
            }
            _ => None,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.focus = detail.focus.next(detail.has_seasons());
                }
                None
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.focus = detail.focus.prev(detail.has_seasons());
                }
                None
            }
            KeyCode::Up | KeyCode::Char('k') => match self.detail.as_mut() {
                Some(detail) => match detail.focus {
                    DetailFocus::Info => {
                        detail.overview_scroll = detail.overview_scroll.saturating_sub(1);
                        None
                    }
                    DetailFocus::Seasons => detail.season_up(&mut self.tickets),
                    DetailFocus::Episodes => {
                        detail.episode_list.up();
                        None
                    }
                },
                None => None,
            },
            KeyCode::Down | KeyCode::Char('j') => match self.detail.as_mut() {
                Some(detail) => match detail.focus {
                    DetailFocus::Info => {
                        detail.overview_scroll = detail.overview_scroll.saturating_add(1);
                        None
                    }
                    DetailFocus::Seasons => detail.season_down(&mut self.tickets),
                    DetailFocus::Episodes => {
                        detail.episode_list.down();
                        None
                    }
                },
                None => None,
            },
            KeyCode::Enter => {
                let Some(detail) = self.detail.as_mut() else {
                    return None;
                };
                match detail.focus {
                    DetailFocus::Info => None,
                    DetailFocus::Seasons => {
                        detail.focus = DetailFocus::Episodes;
                        None
                    }
                    DetailFocus::Episodes => {
                        if let Some(req) = detail.activate_episode() {
                            self.status = Some(format!("Queued: {}", req));
                            self.last_play = Some(req);
                        }
                        None
                    }
                }
            }
            KeyCode::Char('u') => self.open_subtitles(),
            _ => None,
        }
    }

    fn handle_subtitles_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.subtitles.list.up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.subtitles.list.down();
                None
            }
            KeyCode::Char('r') => {
                // Re-run the same probe
                let target = self.subtitles.target.clone()?;
                Some(self.subtitles.begin_probe(
                    target.title,
                    target.request,
                    &mut self.tickets,
                ))
            }
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
