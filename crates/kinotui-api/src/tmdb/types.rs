//! TMDB API response types and request parameters.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::Deserialize;

// --- Movie Lists ---

/// Curated list endpoints under `movie/{category}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCategory {
    /// `movie/popular` endpoint.
    Popular,
    /// `movie/top_rated` endpoint.
    TopRated,
    /// `movie/now_playing` endpoint.
    NowPlaying,
    /// `movie/upcoming` endpoint.
    Upcoming,
}

impl ListCategory {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [
        Self::Popular,
        Self::TopRated,
        Self::NowPlaying,
        Self::Upcoming,
    ];

    /// URL path segment under `movie/`.
    #[must_use]
    pub const fn as_path(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::NowPlaying => "now_playing",
            Self::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for ListCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

impl FromStr for ListCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(Self::Popular),
            "top_rated" | "top-rated" => Ok(Self::TopRated),
            "now_playing" | "now-playing" => Ok(Self::NowPlaying),
            "upcoming" => Ok(Self::Upcoming),
            other => bail!(
                "unknown category: {other} (expected popular, top_rated, now_playing, or upcoming)"
            ),
        }
    }
}

/// Response from `movie/{category}` and `search/movie` endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieListResponse {
    /// Current page number.
    pub page: u32,
    /// Movie summaries.
    pub results: Vec<TmdbMovieSummary>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

/// A single movie within a list or search response.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Vote average (0.0-10.0).
    pub vote_average: f64,
    /// Release date (YYYY-MM-DD, may be empty or absent).
    #[serde(default)]
    pub release_date: Option<String>,
}

// --- Movie Details ---

/// Response from `movie/{movie_id}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Vote average (0.0-10.0).
    pub vote_average: f64,
    /// Release date (YYYY-MM-DD, may be empty or absent).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Genres.
    pub genres: Vec<TmdbGenre>,
    /// Runtime in minutes (null when unknown).
    pub runtime: Option<u32>,
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

// --- Movie Videos ---

/// Response from `movie/{movie_id}/videos` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideoListResponse {
    /// TMDB movie ID.
    pub id: u64,
    /// Videos attached to the movie.
    pub results: Vec<TmdbVideo>,
}

/// A single video attached to a movie.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    /// Video name.
    pub name: String,
    /// Provider playback key (YouTube video ID).
    pub key: String,
    /// Hosting site (e.g., "YouTube").
    pub site: String,
    /// Video type (e.g., "Trailer", "Teaser", "Clip").
    #[serde(rename = "type")]
    pub video_type: String,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    pub success: bool,
}

// --- Search Parameters ---

/// Parameters for `search/movie` endpoint.
#[derive(Debug, Clone)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Response language (default: "en-US").
    pub language: String,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from("en-US"),
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}
