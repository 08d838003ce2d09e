//! View models derived from TMDB responses.
//!
//! Everything here is a pure mapping from API types to display values; the
//! TUI draw code renders these without touching the API types again.

use kinotui_api::tmdb::{MoviePage, TmdbMovieSummary, youtube_embed_url, youtube_watch_url};

/// TMDB image CDN base URL.
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Poster size segment on the image CDN.
const POSTER_SIZE: &str = "w500";

/// Poster URL used when a movie has no poster path.
pub const PLACEHOLDER_POSTER_URL: &str =
    "https://via.placeholder.com/500x750?text=No+Poster+Available";

/// Year shown when the release date is missing or empty.
const UNKNOWN_YEAR: &str = "----";

/// Converts a 0.0-10.0 vote average to a whole percent.
#[allow(clippy::as_conversions, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn rating_percent(vote_average: f64) -> u8 {
    (vote_average * 10.0).round().clamp(0.0, 100.0) as u8
}

/// Extracts the year from a `YYYY-MM-DD` release date.
///
/// Returns `"----"` when the date is missing or empty.
#[must_use]
pub fn release_year(release_date: Option<&str>) -> String {
    release_date
        .map(str::trim)
        .filter(|date| !date.is_empty())
        .and_then(|date| date.split('-').next())
        .map_or_else(|| String::from(UNKNOWN_YEAR), String::from)
}

/// Builds the poster URL, falling back to the placeholder image.
#[must_use]
pub fn poster_url(poster_path: Option<&str>) -> String {
    poster_path.map_or_else(
        || String::from(PLACEHOLDER_POSTER_URL),
        |path| format!("{IMAGE_BASE_URL}/{POSTER_SIZE}{path}"),
    )
}

/// One movie card in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// TMDB movie ID.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// User score as a whole percent.
    pub rating_percent: u8,
    /// Release year, or `"----"` when unknown.
    pub year: String,
    /// Poster URL (CDN or placeholder).
    pub poster: String,
}

impl CardView {
    /// Builds a card from a movie summary.
    #[must_use]
    pub fn from_summary(movie: &TmdbMovieSummary) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            rating_percent: rating_percent(movie.vote_average),
            year: release_year(movie.release_date.as_deref()),
            poster: poster_url(movie.poster_path.as_deref()),
        }
    }
}

/// Trailer presentation for the detail modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailerView {
    /// Video name.
    pub name: String,
    /// YouTube embed URL.
    pub embed_url: String,
    /// YouTube watch URL, for opening in a browser.
    pub watch_url: String,
}

/// Movie presentation for the detail modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieView {
    /// TMDB movie ID.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Release year, or `"----"` when unknown.
    pub year: String,
    /// User score as a whole percent.
    pub rating_percent: u8,
    /// Overview text (empty when TMDB has none).
    pub overview: String,
    /// Genre names joined with `", "`.
    pub genres: String,
    /// Runtime in minutes, when known.
    pub runtime: Option<u32>,
    /// Poster URL (CDN or placeholder).
    pub poster: String,
    /// Selected trailer, if any.
    pub trailer: Option<TrailerView>,
}

impl MovieView {
    /// Builds the modal view from a fetched movie page.
    #[must_use]
    pub fn from_page(page: &MoviePage) -> Self {
        let details = &page.details;
        let genres = details
            .genres
            .iter()
            .map(|genre| genre.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let trailer = page.trailer.as_ref().map(|video| TrailerView {
            name: video.name.clone(),
            embed_url: youtube_embed_url(&video.key),
            watch_url: youtube_watch_url(&video.key),
        });

        Self {
            id: details.id,
            title: details.title.clone(),
            year: release_year(details.release_date.as_deref()),
            rating_percent: rating_percent(details.vote_average),
            overview: details.overview.clone().unwrap_or_default(),
            genres,
            runtime: details.runtime,
            poster: poster_url(details.poster_path.as_deref()),
            trailer,
        }
    }
}
