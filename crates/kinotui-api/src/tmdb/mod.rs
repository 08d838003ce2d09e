//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints and
//! retrieves list, search, detail, and video data.

mod api;
mod client;
mod page;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use page::{MoviePage, fetch_movie_page, select_trailer, youtube_embed_url, youtube_watch_url};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    ListCategory, SearchMovieParams, TmdbErrorResponse, TmdbGenre, TmdbMovieDetails,
    TmdbMovieListResponse, TmdbMovieSummary, TmdbVideo, TmdbVideoListResponse,
};
