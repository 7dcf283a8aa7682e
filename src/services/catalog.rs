use std::sync::Arc;

use crate::{
    api::MovieApi,
    error::{AppError, AppResult},
    models::{Movie, MovieRecommendations},
    services::fallback,
    with_fallback,
};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Movie lookups that degrade to built-in data when the API is down
///
/// Read operations never fail: a failed remote call is logged and answered
/// from [`fallback`]. Writes (ratings, watchlist membership) propagate errors.
pub struct MovieCatalog {
    api: Arc<dyn MovieApi>,
}

impl MovieCatalog {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self { api }
    }

    pub async fn recommendations(&self) -> MovieRecommendations {
        with_fallback!(
            "recommendations",
            self.api.recommendations(),
            fallback::recommendations()
        )
    }

    /// Searches by title; a blank query is rejected before any request is made
    pub async fn search(&self, query: &str) -> AppResult<Vec<Movie>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput(
                "Search query must not be empty".to_string(),
            ));
        }

        let results = with_fallback!("search", self.api.search(query), fallback::search(query));
        tracing::debug!(query = query, count = results.len(), "Movie search complete");
        Ok(results)
    }

    pub async fn details(&self, movie_id: u64) -> Movie {
        with_fallback!(
            "details",
            self.api.details(movie_id),
            fallback::details(movie_id)
        )
    }

    /// Rates a movie on a 1-5 scale
    pub async fn rate(&self, movie_id: u64, rating: u8) -> AppResult<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::InvalidInput(format!(
                "Rating must be between {} and {}, got {}",
                MIN_RATING, MAX_RATING, rating
            )));
        }

        self.api.rate(movie_id, rating).await?;
        tracing::info!(movie_id = movie_id, rating = rating, "Movie rated");
        Ok(())
    }

    pub async fn add_to_watchlist(&self, movie_id: u64) -> AppResult<()> {
        self.api.add_to_watchlist(movie_id).await
    }

    pub async fn remove_from_watchlist(&self, movie_id: u64) -> AppResult<()> {
        self.api.remove_from_watchlist(movie_id).await
    }
}
