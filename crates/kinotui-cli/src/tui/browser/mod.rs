//! Movie browser TUI.
//!
//! Renders a card grid for category and search listings, and a detail modal
//! fed by two parallel requests (details + videos). Fetches run as spawned
//! tasks and report back over a channel drained by the event loop, so the
//! interface stays responsive while requests are in flight.

/// Browser state container.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use kinotui_api::tmdb::{ListCategory, LocalTmdbApi, SearchMovieParams, TmdbClient, fetch_movie_page};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Position;
use tokio::sync::mpsc;

use self::state::{BrowserState, InputMode, Mode};
use self::ui::LayoutInfo;
use crate::view::{CardView, MovieView};

/// Result of a background fetch, tagged with its request generation.
enum FetchOutcome {
    /// Listing response (category or search).
    Listing {
        /// Generation the request was tagged with.
        generation: u64,
        /// Cards on success, error otherwise.
        result: Result<Vec<CardView>>,
    },
    /// Detail page response.
    Detail {
        /// Generation the request was tagged with.
        generation: u64,
        /// Movie view on success, error otherwise.
        result: Result<MovieView>,
    },
}

/// Spawns background fetch tasks and routes their outcomes into the channel.
struct Fetcher {
    /// Shared API client.
    client: Arc<TmdbClient>,
    /// Response language for all requests.
    language: String,
    /// Sender for fetch outcomes.
    tx: mpsc::UnboundedSender<FetchOutcome>,
}

impl Fetcher {
    /// Spawns a listing fetch for the given mode.
    fn spawn_listing(&self, generation: u64, mode: Mode) {
        let client = Arc::clone(&self.client);
        let language = self.language.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match &mode {
                Mode::Category(category) => client.movie_list(*category, &language).await,
                Mode::Search(query) => {
                    let params = SearchMovieParams::new(query.as_str()).language(&language);
                    client.search_movie(&params).await
                }
            };
            let result = result
                .map(|response| response.results.iter().map(CardView::from_summary).collect());
            let _ = tx.send(FetchOutcome::Listing { generation, result });
        });
    }

    /// Spawns a detail page fetch for the given movie.
    fn spawn_detail(&self, generation: u64, movie_id: u64) {
        let client = Arc::clone(&self.client);
        let language = self.language.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = fetch_movie_page(client.as_ref(), movie_id, &language)
                .await
                .map(|page| MovieView::from_page(&page));
            let _ = tx.send(FetchOutcome::Detail { generation, result });
        });
    }
}

/// Runs the movie browser TUI.
///
/// Must be called from within a tokio runtime; fetches are spawned onto it.
///
/// # Errors
///
/// Returns an error if terminal setup, drawing, or event handling fails.
#[allow(clippy::module_name_repetitions)]
pub fn run_browser(
    client: Arc<TmdbClient>,
    language: String,
    category: ListCategory,
) -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    let fetcher = Fetcher {
        client,
        language,
        tx,
    };

    let mut state = BrowserState::new(category);
    let generation = state.begin_listing(Mode::Category(category));
    fetcher.spawn_listing(generation, Mode::Category(category));

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, &fetcher, rx);

    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop: drain fetch outcomes, draw, then handle input.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState,
    fetcher: &Fetcher,
    mut rx: mpsc::UnboundedReceiver<FetchOutcome>,
) -> Result<()> {
    let mut layout = LayoutInfo::default();

    loop {
        while let Ok(outcome) = rx.try_recv() {
            apply_outcome(state, outcome);
        }

        terminal
            .draw(|frame| {
                layout = ui::draw(frame, state);
            })
            .context("failed to draw TUI")?;

        if event::poll(Duration::from_millis(100)).context("failed to poll events")? {
            match event::read().context("failed to read event")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let exit = match state.input_mode {
                        InputMode::Search => handle_search_input(state, fetcher, key.code),
                        InputMode::Normal => {
                            handle_normal_input(state, fetcher, key.code, key.modifiers, &layout)
                        }
                    };
                    if exit {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handle_mouse(state, fetcher, &mouse, &layout),
                _ => {}
            }
        }
    }
}

/// Applies a fetch outcome to the state; stale generations are discarded.
fn apply_outcome(state: &mut BrowserState, outcome: FetchOutcome) {
    match outcome {
        FetchOutcome::Listing { generation, result } => {
            state.apply_listing(generation, result);
        }
        FetchOutcome::Detail { generation, result } => {
            state.apply_detail(generation, result);
        }
    }
}

/// Handles key input in search mode. Returns `true` to exit the TUI.
fn handle_search_input(state: &mut BrowserState, fetcher: &Fetcher, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc => state.cancel_search(),
        KeyCode::Enter => {
            if let Some(query) = state.submit_search() {
                let mode = Mode::Search(query);
                let generation = state.begin_listing(mode.clone());
                fetcher.spawn_listing(generation, mode);
            }
        }
        KeyCode::Backspace => state.search_pop(),
        KeyCode::Char(ch) => state.search_push(ch),
        _ => {}
    }
    false
}

/// Handles key input in normal mode. Returns `true` to exit the TUI.
fn handle_normal_input(
    state: &mut BrowserState,
    fetcher: &Fetcher,
    key: KeyCode,
    modifiers: KeyModifiers,
    layout: &LayoutInfo,
) -> bool {
    if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if state.modal_open {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => state.close_modal(),
            KeyCode::Char('o') => open_trailer(state),
            _ => {}
        }
        return false;
    }

    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Up | KeyCode::Char('k') => state.move_up(layout.columns),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(layout.columns),
        KeyCode::Left | KeyCode::Char('h') => state.move_left(),
        KeyCode::Right | KeyCode::Char('l') => state.move_right(),
        KeyCode::Enter => open_selected(state, fetcher),
        KeyCode::Char('/') => state.start_search(),
        KeyCode::Tab => switch_category(state, fetcher, next_category(state)),
        KeyCode::Char('1') => switch_category(state, fetcher, ListCategory::Popular),
        KeyCode::Char('2') => switch_category(state, fetcher, ListCategory::TopRated),
        KeyCode::Char('3') => switch_category(state, fetcher, ListCategory::NowPlaying),
        KeyCode::Char('4') => switch_category(state, fetcher, ListCategory::Upcoming),
        _ => {}
    }
    false
}

/// Handles mouse input: card clicks open details, modal clicks close it.
fn handle_mouse(
    state: &mut BrowserState,
    fetcher: &Fetcher,
    mouse: &MouseEvent,
    layout: &LayoutInfo,
) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let position = Position::new(mouse.column, mouse.row);

    if state.modal_open {
        let Some(modal) = layout.modal.as_ref() else {
            state.close_modal();
            return;
        };
        if modal.close.contains(position) || !modal.area.contains(position) {
            state.close_modal();
        }
        return;
    }

    if let Some((index, _)) = layout
        .cards
        .iter()
        .find(|(_, rect)| rect.contains(position))
    {
        state.select(*index);
        open_selected(state, fetcher);
    }
}

/// Starts a detail fetch for the selected card.
fn open_selected(state: &mut BrowserState, fetcher: &Fetcher) {
    let Some(card) = state.current_card() else {
        return;
    };
    let movie_id = card.id;
    let generation = state.begin_detail();
    fetcher.spawn_detail(generation, movie_id);
}

/// Opens the current trailer in the default browser.
fn open_trailer(state: &BrowserState) {
    let Some(trailer) = state
        .movie
        .as_ref()
        .and_then(|movie| movie.trailer.as_ref())
    else {
        return;
    };
    if let Err(error) = open::that(&trailer.watch_url) {
        tracing::warn!(%error, "failed to open trailer URL");
    }
}

/// Returns the category after the active one, wrapping, for Tab cycling.
#[allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]
fn next_category(state: &BrowserState) -> ListCategory {
    let current = state.active_category().unwrap_or(ListCategory::Popular);
    let position = ListCategory::ALL
        .iter()
        .position(|category| *category == current)
        .unwrap_or(0);
    ListCategory::ALL[(position + 1) % ListCategory::ALL.len()]
}

/// Switches to a category listing and spawns its fetch.
fn switch_category(state: &mut BrowserState, fetcher: &Fetcher, category: ListCategory) {
    let mode = Mode::Category(category);
    let generation = state.begin_listing(mode.clone());
    fetcher.spawn_listing(generation, mode);
}
