//! kinotui - browse TMDB movie listings from the terminal.

/// Application configuration (TOML).
mod config;
/// Terminal UI.
mod tui;
/// View models for cards and the detail modal.
mod view;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use kinotui_api::tmdb::{
    ListCategory, LocalTmdbApi, SearchMovieParams, TmdbClient, TmdbMovieSummary, fetch_movie_page,
};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

use crate::config::{AppConfig, resolve_config_path};
use crate::view::{CardView, MovieView};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse movies in the interactive TUI.
    Browse(BrowseArgs),
    /// Print a curated movie list.
    List(ListArgs),
    /// Search movies by title.
    Search(SearchArgs),
    /// Show details and trailer for one movie.
    Details(DetailsArgs),
}

/// Arguments for the `browse` subcommand.
#[derive(Args)]
struct BrowseArgs {
    /// Starting category (overrides config).
    #[arg(long)]
    category: Option<String>,
}

/// Arguments for the `list` subcommand.
#[derive(Args)]
struct ListArgs {
    /// Category: popular, top_rated, now_playing, or upcoming.
    #[arg(long, default_value = "popular")]
    category: String,

    /// Response language (overrides config).
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `search` subcommand.
#[derive(Args)]
struct SearchArgs {
    /// Search query (e.g. "the matrix").
    #[arg(long, required = true)]
    query: String,

    /// Response language (overrides config).
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `details` subcommand.
#[derive(Args)]
struct DetailsArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,

    /// Response language (overrides config).
    #[arg(long)]
    language: Option<String>,
}

/// Builds a `TmdbClient` from the `TMDB_API_KEY` environment variable.
///
/// # Errors
///
/// Returns an error if `TMDB_API_KEY` is not set or the client fails to
/// build.
fn build_tmdb_client() -> Result<TmdbClient> {
    let api_key =
        std::env::var("TMDB_API_KEY").context("TMDB_API_KEY environment variable is required")?;

    TmdbClient::builder()
        .api_key(api_key)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")
}

/// Loads config, honoring the `--dir` override.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Picks the response language: CLI flag over config.
fn resolve_language(flag: Option<&String>, config: &AppConfig) -> String {
    flag.cloned()
        .unwrap_or_else(|| config.api.language.clone())
}

/// Prints movie rows in tab-separated columns.
fn print_movie_rows(movies: &[TmdbMovieSummary]) {
    tracing::info!("ID\tScore\tYear\tTitle");
    for movie in movies {
        let card = CardView::from_summary(movie);
        tracing::info!(
            "{}\t{}%\t{}\t{}",
            card.id,
            card.rating_percent,
            card.year,
            card.title
        );
    }
    tracing::info!("Total: {} movies", movies.len());
}

/// Runs the `list` subcommand.
///
/// # Errors
///
/// Returns an error if the category is unknown, the client fails to build,
/// or the request fails.
#[instrument(skip_all)]
async fn run_list(args: &ListArgs, dir: Option<&PathBuf>) -> Result<()> {
    let category: ListCategory = args.category.parse()?;
    let config = load_config(dir)?;
    let language = resolve_language(args.language.as_ref(), &config);

    let client = build_tmdb_client()?;
    let response = client
        .movie_list(category, &language)
        .await
        .with_context(|| format!("TMDB movie/{category} request failed"))?;

    print_movie_rows(&response.results);
    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the query is blank, the client fails to build, or
/// the request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        bail!("search query must not be blank");
    }

    let config = load_config(dir)?;
    let language = resolve_language(args.language.as_ref(), &config);

    let client = build_tmdb_client()?;
    let params = SearchMovieParams::new(query).language(&language);
    let response = client
        .search_movie(&params)
        .await
        .context("TMDB search/movie request failed")?;

    tracing::info!("Total results: {}", response.total_results);
    print_movie_rows(&response.results);
    Ok(())
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or either request fails.
#[instrument(skip_all)]
async fn run_details(args: &DetailsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let language = resolve_language(args.language.as_ref(), &config);

    let client = build_tmdb_client()?;
    let page = fetch_movie_page(&client, args.id, &language)
        .await
        .with_context(|| format!("TMDB movie page request failed for ID {}", args.id))?;
    let movie = MovieView::from_page(&page);

    tracing::info!("Title: {} ({})", movie.title, movie.year);
    tracing::info!("User Score: {}%", movie.rating_percent);
    tracing::info!("Genres: {}", movie.genres);
    tracing::info!(
        "Runtime: {}",
        movie
            .runtime
            .map_or_else(|| String::from("--"), |minutes| format!("{minutes} min"))
    );
    tracing::info!("Poster: {}", movie.poster);
    tracing::info!("Overview: {}", movie.overview);
    match &movie.trailer {
        Some(trailer) => {
            tracing::info!("Trailer: {} ({})", trailer.name, trailer.watch_url);
        }
        None => tracing::info!("Trailer: none"),
    }

    Ok(())
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if config loading, client build, or the TUI fails.
#[instrument(skip_all)]
fn run_browse(args: &BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let category: ListCategory = args
        .category
        .as_deref()
        .unwrap_or(&config.ui.default_category)
        .parse()?;

    let client = Arc::new(build_tmdb_client()?);

    tracing::info!(%category, "launching movie browser");
    tui::browser::run_browser(client, config.api.language, category)
        .context("movie browser TUI failed")
}

/// Entry point.
///
/// The TUI event loop blocks its thread, so the multi-thread runtime keeps
/// background fetches running.
#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Browse(args) => run_browse(&args, cli.dir.as_ref()),
        Commands::List(args) => run_list(&args, cli.dir.as_ref()).await,
        Commands::Search(args) => run_search(&args, cli.dir.as_ref()).await,
        Commands::Details(args) => run_details(&args, cli.dir.as_ref()).await,
    }
}
