//! Movie browser state management.

use anyhow::Result;
use kinotui_api::tmdb::ListCategory;

use crate::view::{CardView, MovieView};

/// Message shown in the grid when a listing request fails.
pub const LISTING_ERROR: &str = "Error loading movies. Please try again later.";

/// Which request populates the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Curated category listing.
    Category(ListCategory),
    /// Title search with the submitted query.
    Search(String),
}

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Search text input mode.
    Search,
}

/// State for the movie browser.
///
/// The event loop mutates this only through the methods below; the draw code
/// reads it. Listing and detail requests each carry a generation number, and
/// a response whose generation no longer matches is discarded instead of
/// overwriting newer data.
#[derive(Debug)]
pub struct BrowserState {
    /// Current listing mode. Changed only by [`Self::begin_listing`].
    mode: Mode,
    /// Cards for the current listing.
    pub cards: Vec<CardView>,
    /// Selected card index into `cards`.
    pub selected: usize,
    /// First visible grid row.
    pub scroll_row: usize,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Search input buffer.
    pub search_input: String,
    /// Whether a listing request is in flight.
    pub loading: bool,
    /// Whether a detail request is in flight.
    pub detail_loading: bool,
    /// Listing error message, cleared when the next listing request starts.
    pub error: Option<&'static str>,
    /// Whether the detail modal is open.
    pub modal_open: bool,
    /// Movie shown in the modal. Retained when the modal closes.
    pub movie: Option<MovieView>,
    /// Generation of the latest listing request.
    listing_generation: u64,
    /// Generation of the latest detail request.
    detail_generation: u64,
}

impl BrowserState {
    /// Creates the initial state for the given starting category.
    #[must_use]
    pub const fn new(category: ListCategory) -> Self {
        Self {
            mode: Mode::Category(category),
            cards: Vec::new(),
            selected: 0,
            scroll_row: 0,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            loading: false,
            detail_loading: false,
            error: None,
            modal_open: false,
            movie: None,
            listing_generation: 0,
            detail_generation: 0,
        }
    }

    /// Returns the current listing mode.
    #[must_use]
    pub const fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Returns the active category, or `None` in search mode.
    #[must_use]
    pub const fn active_category(&self) -> Option<ListCategory> {
        match &self.mode {
            Mode::Category(category) => Some(*category),
            Mode::Search(_) => None,
        }
    }

    /// Switches the listing mode and registers a new request generation.
    ///
    /// Returns the generation to tag the matching fetch with; responses
    /// carrying an older generation are discarded by [`Self::apply_listing`].
    pub fn begin_listing(&mut self, mode: Mode) -> u64 {
        self.listing_generation = self.listing_generation.wrapping_add(1);
        self.mode = mode;
        self.loading = true;
        self.error = None;
        self.listing_generation
    }

    /// Applies a listing response if it matches the latest generation.
    ///
    /// On success the grid is replaced and the cursor reset. On failure the
    /// grid is cleared and [`LISTING_ERROR`] is shown until the next listing
    /// succeeds. Returns `false` when the response was stale and discarded.
    pub fn apply_listing(&mut self, generation: u64, result: Result<Vec<CardView>>) -> bool {
        if generation != self.listing_generation {
            tracing::debug!(generation, "discarding stale listing response");
            return false;
        }

        self.loading = false;
        match result {
            Ok(cards) => {
                self.cards = cards;
                self.selected = 0;
                self.scroll_row = 0;
                self.error = None;
            }
            Err(error) => {
                tracing::warn!(%error, "listing request failed");
                self.cards.clear();
                self.error = Some(LISTING_ERROR);
            }
        }
        true
    }

    /// Registers a new detail request generation.
    pub fn begin_detail(&mut self) -> u64 {
        self.detail_generation = self.detail_generation.wrapping_add(1);
        self.detail_loading = true;
        self.detail_generation
    }

    /// Applies a detail response if it matches the latest generation.
    ///
    /// The modal opens only on success; a failed detail fetch is logged and
    /// leaves the browser as it was. Returns `false` when the response was
    /// stale and discarded.
    pub fn apply_detail(&mut self, generation: u64, result: Result<MovieView>) -> bool {
        if generation != self.detail_generation {
            tracing::debug!(generation, "discarding stale detail response");
            return false;
        }

        self.detail_loading = false;
        match result {
            Ok(movie) => {
                self.movie = Some(movie);
                self.modal_open = true;
            }
            Err(error) => {
                tracing::warn!(%error, "detail request failed");
            }
        }
        true
    }

    /// Closes the detail modal. The grid and the loaded movie are retained.
    pub const fn close_modal(&mut self) {
        self.modal_open = false;
    }

    /// Returns the selected card, if any.
    #[must_use]
    pub fn current_card(&self) -> Option<&CardView> {
        self.cards.get(self.selected)
    }

    /// Moves selection left.
    pub fn move_left(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves selection right.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_right(&mut self) {
        if self.selected + 1 < self.cards.len() {
            self.selected += 1;
        }
    }

    /// Moves selection up one grid row.
    pub fn move_up(&mut self, columns: usize) {
        if columns > 0 && self.selected >= columns {
            self.selected = self.selected.saturating_sub(columns);
        }
    }

    /// Moves selection down one grid row.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_down(&mut self, columns: usize) {
        if columns == 0 {
            return;
        }
        let target = self.selected + columns;
        if target < self.cards.len() {
            self.selected = target;
        }
    }

    /// Selects the card at `index` (mouse clicks). Out-of-range is ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.cards.len() {
            self.selected = index;
        }
    }

    /// Scrolls so the selected card's row is visible.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn scroll_to_selected(&mut self, columns: usize, visible_rows: usize) {
        if columns == 0 || visible_rows == 0 {
            return;
        }
        let row = self.selected / columns;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + visible_rows {
            self.scroll_row = row + 1 - visible_rows;
        }
    }

    /// Enters search input mode.
    pub const fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    /// Leaves search input mode and clears the buffer.
    pub fn cancel_search(&mut self) {
        self.search_input.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Appends a character to the search buffer.
    pub fn search_push(&mut self, ch: char) {
        self.search_input.push(ch);
    }

    /// Removes the last character from the search buffer.
    pub fn search_pop(&mut self) {
        self.search_input.pop();
    }

    /// Submits the search buffer and leaves input mode.
    ///
    /// Returns the trimmed query, or `None` for a blank buffer, in which
    /// case no request is made and the grid is left untouched.
    pub fn submit_search(&mut self) -> Option<String> {
        self.input_mode = InputMode::Normal;
        let query = self.search_input.trim();
        if query.is_empty() {
            return None;
        }
        Some(String::from(query))
    }
}
