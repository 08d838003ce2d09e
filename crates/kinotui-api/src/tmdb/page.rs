//! Movie page assembly: parallel detail and video fetches plus trailer selection.

use anyhow::Result;
use tracing::instrument;

use super::api::LocalTmdbApi;
use super::types::{TmdbMovieDetails, TmdbVideo};

/// YouTube embed URL prefix.
const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed";

/// YouTube watch URL prefix.
const YOUTUBE_WATCH_BASE: &str = "https://www.youtube.com/watch?v=";

/// Aggregated movie page: details joined with the selected trailer.
#[derive(Debug, Clone)]
pub struct MoviePage {
    /// Movie details.
    pub details: TmdbMovieDetails,
    /// Selected trailer, if the movie has any videos.
    pub trailer: Option<TmdbVideo>,
}

/// Fetches movie details and videos concurrently and joins them into a page.
///
/// The page is ready once both requests complete; a failure of either
/// fails the whole page.
///
/// # Errors
///
/// Returns an error if either underlying request fails.
#[instrument(skip_all)]
pub async fn fetch_movie_page(
    api: &(impl LocalTmdbApi + Sync),
    movie_id: u64,
    language: &str,
) -> Result<MoviePage> {
    let (details, videos) = tokio::try_join!(
        api.movie_details(movie_id, language),
        api.movie_videos(movie_id),
    )?;

    let trailer = select_trailer(&videos.results).cloned();
    Ok(MoviePage { details, trailer })
}

/// Selects the video to present as the trailer.
///
/// Prefers the first video typed "Trailer"; falls back to the first video
/// of any type; returns `None` when the list is empty.
#[must_use]
pub fn select_trailer(videos: &[TmdbVideo]) -> Option<&TmdbVideo> {
    videos
        .iter()
        .find(|video| video.video_type == "Trailer")
        .or_else(|| videos.first())
}

/// Builds the YouTube embed URL for a playback key.
#[must_use]
pub fn youtube_embed_url(key: &str) -> String {
    format!("{YOUTUBE_EMBED_BASE}/{key}")
}

/// Builds the YouTube watch URL for a playback key.
#[must_use]
pub fn youtube_watch_url(key: &str) -> String {
    format!("{YOUTUBE_WATCH_BASE}{key}")
}
