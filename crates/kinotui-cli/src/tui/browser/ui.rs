//! Movie browser rendering.

use kinotui_api::tmdb::ListCategory;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::state::{BrowserState, InputMode, Mode};
use crate::view::{self, CardView};

/// Card cell width in terminal columns, border included.
const CARD_WIDTH: u16 = 26;

/// Card cell height in terminal rows, border included.
const CARD_HEIGHT: u16 = 8;

/// Layout geometry of the last draw, used for mouse hit testing.
#[derive(Debug, Default)]
pub struct LayoutInfo {
    /// Number of grid columns.
    pub columns: usize,
    /// Number of fully visible grid rows.
    pub visible_rows: usize,
    /// Card index and screen area for each drawn card.
    pub cards: Vec<(usize, Rect)>,
    /// Modal geometry, when the modal is open.
    pub modal: Option<ModalLayout>,
}

/// Modal geometry for mouse hit testing.
#[derive(Debug)]
pub struct ModalLayout {
    /// Whole modal area.
    pub area: Rect,
    /// Close control (the top-right `[x]`).
    pub close: Rect,
}

/// Draws the movie browser. Returns layout geometry for mouse hit testing.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &mut BrowserState) -> LayoutInfo {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // header: category tabs + search box
            Constraint::Min(CARD_HEIGHT),    // card grid
            Constraint::Length(3),           // footer: key hints
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);

    let grid_area = chunks[1];
    let columns = grid_columns(grid_area.width);
    let visible_rows = grid_rows(grid_area.height);
    state.scroll_to_selected(columns, visible_rows);

    let cards = draw_grid(frame, grid_area, state, columns, visible_rows);

    draw_footer(frame, chunks[2], state);

    let modal = if state.modal_open {
        draw_modal(frame, state)
    } else {
        None
    };

    LayoutInfo {
        columns,
        visible_rows,
        cards,
        modal,
    }
}

/// Grid columns that fit in `width`.
fn grid_columns(width: u16) -> usize {
    usize::from((width / CARD_WIDTH).max(1))
}

/// Full grid rows that fit in `height`.
fn grid_rows(height: u16) -> usize {
    usize::from((height / CARD_HEIGHT).max(1))
}

/// Draws the category tabs and the search box.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let mut spans: Vec<Span> = Vec::new();
    for (index, category) in ListCategory::ALL.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        let active = matches!(state.mode(), Mode::Category(c) if *c == category);
        let style = if active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(
            format!("{}:{}", index.wrapping_add(1), category_label(category)),
            style,
        ));
    }
    let tabs = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" kinotui "));
    frame.render_widget(tabs, header_chunks[0]);

    let search_style = if state.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(state.search_input.clone())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, header_chunks[1]);
}

/// Display label for a category tab.
const fn category_label(category: ListCategory) -> &'static str {
    match category {
        ListCategory::Popular => "Popular",
        ListCategory::TopRated => "Top Rated",
        ListCategory::NowPlaying => "Now Playing",
        ListCategory::Upcoming => "Upcoming",
    }
}

/// Block for grid-wide messages, titled after the listing mode.
fn grid_block(state: &BrowserState) -> Block<'static> {
    let title = match state.mode() {
        Mode::Category(category) => format!(" {} ", category_label(*category)),
        Mode::Search(query) => format!(" Search: {query} "),
    };
    Block::default().borders(Borders::ALL).title(title)
}

/// Draws the card grid. Returns the index and area of each drawn card.
#[allow(
    clippy::arithmetic_side_effects,
    clippy::as_conversions,
    clippy::cast_possible_truncation
)]
fn draw_grid(
    frame: &mut Frame,
    area: Rect,
    state: &BrowserState,
    columns: usize,
    visible_rows: usize,
) -> Vec<(usize, Rect)> {
    if let Some(error) = state.error {
        let message = Paragraph::new(error)
            .style(Style::default().fg(Color::Red))
            .block(grid_block(state));
        frame.render_widget(message, area);
        return Vec::new();
    }

    if state.cards.is_empty() {
        let text = if state.loading {
            "Loading movies..."
        } else {
            "No movies found."
        };
        let empty = Paragraph::new(text).block(grid_block(state));
        frame.render_widget(empty, area);
        return Vec::new();
    }

    let first = state.scroll_row * columns;
    let mut drawn = Vec::with_capacity(columns * visible_rows);
    for (index, card) in state
        .cards
        .iter()
        .enumerate()
        .skip(first)
        .take(columns * visible_rows)
    {
        let offset = index - first;
        let row = offset / columns;
        let col = offset % columns;
        let rect = Rect::new(
            area.x + (col as u16) * CARD_WIDTH,
            area.y + (row as u16) * CARD_HEIGHT,
            CARD_WIDTH,
            CARD_HEIGHT,
        )
        .intersection(area);
        if rect.width < 4 || rect.height < 4 {
            continue;
        }
        draw_card(frame, rect, card, index == state.selected);
        drawn.push((index, rect));
    }
    drawn
}

/// Draws one movie card.
fn draw_card(frame: &mut Frame, rect: Rect, card: &CardView, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut lines: Vec<Line> = Vec::with_capacity(5);
    if card.poster == view::PLACEHOLDER_POSTER_URL {
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                "No Poster Available",
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        );
        lines.push(Line::from(""));
    } else {
        let strip = "\u{2592}".repeat(usize::from(rect.width.saturating_sub(2)));
        for _ in 0..3 {
            lines.push(Line::from(Span::styled(
                strip.clone(),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    lines.push(Line::from(Span::styled(
        card.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(vec![
        Span::styled(
            format!("{}%", card.rating_percent),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(format!("  {}", card.year)),
    ]));

    let body = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(body, rect);
}

/// Draws the footer hint line.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let hints = match state.input_mode {
        InputMode::Search => "Type to search | Enter: submit | Esc: cancel",
        InputMode::Normal if state.modal_open => {
            "o: open trailer | Esc/q: close | click [x] or outside to close"
        }
        InputMode::Normal => {
            "1-4/Tab: category  /: search  \u{2190}\u{2191}\u{2192}\u{2193}/hjkl: move  Enter/click: details  q: quit"
        }
    };
    let status = if state.detail_loading {
        "  Loading details..."
    } else if state.loading {
        "  Loading movies..."
    } else {
        ""
    };

    let footer = Paragraph::new(Line::from(vec![
        Span::raw(hints),
        Span::styled(status, Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Draws the detail modal. Returns its geometry for mouse hit testing.
fn draw_modal(frame: &mut Frame, state: &BrowserState) -> Option<ModalLayout> {
    let movie = state.movie.as_ref()?;

    let area = modal_area(frame.area());
    frame.render_widget(Clear, area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled(
                format!("{}%", movie.rating_percent),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" User Score"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Overview", bold)),
        Line::from(movie.overview.clone()),
        Line::from(""),
        Line::from(vec![Span::styled("Genres: ", bold), Span::raw(movie.genres.clone())]),
        Line::from(vec![
            Span::styled("Runtime: ", bold),
            Span::raw(runtime_label(movie.runtime)),
        ]),
        Line::from(Span::styled(movie.poster.clone(), dim)),
    ];
    if let Some(trailer) = &movie.trailer {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Trailer: ", bold),
            Span::raw(trailer.name.clone()),
        ]));
        lines.push(Line::from(Span::styled(trailer.embed_url.clone(), dim)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ({}) ", movie.title, movie.year))
        .title_top(Line::from("[x]").right_aligned())
        .border_style(Style::default().fg(Color::Cyan));
    let body = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(body, area);

    let close = Rect::new(area.right().saturating_sub(4), area.y, 3, 1);
    Some(ModalLayout { area, close })
}

/// Runtime text for the modal.
fn runtime_label(runtime: Option<u32>) -> String {
    runtime.map_or_else(|| String::from("--"), |minutes| format!("{minutes} min"))
}

/// Centers the modal over the screen.
#[allow(clippy::indexing_slicing)]
fn modal_area(area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Percentage(15),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(vertical[1]);
    horizontal[1]
}
