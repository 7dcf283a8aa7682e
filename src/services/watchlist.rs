use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    api::MovieApi,
    error::{AppError, AppResult},
    models::{genre_id, genre_name, Movie},
    services::catalog::MovieCatalog,
};

/// Genre filter value that disables genre filtering
pub const ALL_GENRES: &str = "all";

/// Trending titles appended to the watchlist seed
const TRENDING_SEED: usize = 2;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    Rating,
    #[default]
    DateAdded,
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortKey::Title),
            "rating" => Ok(SortKey::Rating),
            "date_added" => Ok(SortKey::DateAdded),
            other => Err(AppError::InvalidInput(format!("Unknown sort key: {}", other))),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Title => write!(f, "title"),
            SortKey::Rating => write!(f, "rating"),
            SortKey::DateAdded => write!(f, "date_added"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(AppError::InvalidInput(format!("Unknown sort order: {}", other))),
        }
    }
}

/// Derives the visible watchlist from the full list
///
/// Filters by case-insensitive title substring and by genre name (`"all"`
/// keeps everything, unknown names keep nothing), then sorts stably by
/// `sort_key`. Source records are never modified.
pub fn derive_view(
    movies: &[Movie],
    query: &str,
    genre_filter: &str,
    sort_key: SortKey,
    sort_order: SortOrder,
) -> Vec<Movie> {
    let needle = query.to_lowercase();
    let genre = if genre_filter.trim().eq_ignore_ascii_case(ALL_GENRES) {
        None
    } else {
        // Unknown genre names map to no id at all, so nothing matches
        Some(genre_id(genre_filter))
    };

    let mut view: Vec<Movie> = movies
        .iter()
        .filter(|movie| needle.is_empty() || movie.title.to_lowercase().contains(&needle))
        .filter(|movie| match genre {
            None => true,
            Some(Some(id)) => movie.has_genre(id),
            Some(None) => false,
        })
        .cloned()
        .collect();

    view.sort_by(|a, b| {
        let ordering = compare(a, b, sort_key);
        match sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    view
}

fn compare(a: &Movie, b: &Movie, sort_key: SortKey) -> Ordering {
    match sort_key {
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::Rating => a.vote_average.total_cmp(&b.vote_average),
        SortKey::DateAdded => a.release_date().cmp(&b.release_date()),
    }
}

/// Known genre names present in `movies`, in first-seen order
pub fn unique_genres(movies: &[Movie]) -> Vec<&'static str> {
    let mut genres = Vec::new();
    for name in movies
        .iter()
        .flat_map(|movie| movie.genre_ids.iter())
        .filter_map(|id| genre_name(*id))
    {
        if !genres.contains(&name) {
            genres.push(name);
        }
    }
    genres
}

/// Inputs of the watchlist view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistQuery {
    pub query: String,
    pub genre: String,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl Default for WatchlistQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            genre: ALL_GENRES.to_string(),
            sort_key: SortKey::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl WatchlistQuery {
    pub fn apply(&self, movies: &[Movie]) -> Vec<Movie> {
        derive_view(movies, &self.query, &self.genre, self.sort_key, self.sort_order)
    }
}

/// The user's watchlist and the remote calls that change it
pub struct WatchlistService {
    catalog: MovieCatalog,
    movies: RwLock<Vec<Movie>>,
}

impl WatchlistService {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self {
            catalog: MovieCatalog::new(api),
            movies: RwLock::new(Vec::new()),
        }
    }

    /// Seeds the watchlist from recommendations: personal picks, then the top
    /// trending titles
    pub async fn load(&self) -> Vec<Movie> {
        let recommendations = self.catalog.recommendations().await;
        let movies: Vec<Movie> = recommendations
            .for_you
            .into_iter()
            .chain(recommendations.trending.into_iter().take(TRENDING_SEED))
            .collect();

        tracing::info!(count = movies.len(), "Watchlist loaded");
        *self.movies.write().await = movies.clone();
        movies
    }

    pub async fn movies(&self) -> Vec<Movie> {
        self.movies.read().await.clone()
    }

    pub async fn view(&self, query: &WatchlistQuery) -> Vec<Movie> {
        query.apply(&self.movies.read().await)
    }

    pub async fn genres(&self) -> Vec<&'static str> {
        unique_genres(&self.movies.read().await)
    }

    /// Adds `movie` remotely, then locally; already-listed movies are not duplicated
    pub async fn add(&self, movie: Movie) -> AppResult<()> {
        self.catalog.add_to_watchlist(movie.id).await?;

        let mut movies = self.movies.write().await;
        if !movies.iter().any(|m| m.id == movie.id) {
            tracing::info!(movie_id = movie.id, "Added to watchlist");
            movies.push(movie);
        }
        Ok(())
    }

    /// Removes the movie remotely; the local list changes only on success
    pub async fn remove(&self, movie_id: u64) -> AppResult<()> {
        if let Err(e) = self.catalog.remove_from_watchlist(movie_id).await {
            tracing::error!(error = %e, movie_id = movie_id, "Failed to remove from watchlist");
            return Err(e);
        }

        self.movies.write().await.retain(|m| m.id != movie_id);
        tracing::info!(movie_id = movie_id, "Removed from watchlist");
        Ok(())
    }
}
