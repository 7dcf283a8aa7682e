//! Remote API abstraction
//!
//! Each trait covers one group of REST endpoints. Stores and services depend on
//! the traits rather than on [`ApiClient`] so they can be driven by mocks in
//! tests; `ApiClient` implements all four over HTTP.

use crate::{
    error::{AppResult, AuthResult},
    models::{
        AuthResponse, ComparisonStats, Movie, MovieRecommendations, Notification,
        NotificationPreferences, ViewingStats,
    },
};

pub mod client;

pub use client::ApiClient;

/// `/auth` endpoints
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> AuthResult<AuthResponse>;

    async fn register(&self, name: &str, email: &str, password: &str)
        -> AuthResult<AuthResponse>;

    /// Exchanges a refresh token for a new access token
    async fn refresh(&self, refresh_token: &str) -> AuthResult<String>;

    /// Invalidates `token` server-side
    async fn logout(&self, token: &str) -> AppResult<()>;
}

/// `/notifications` endpoints
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait NotificationApi: Send + Sync {
    async fn list_notifications(&self, limit: u32) -> AppResult<Vec<Notification>>;

    async fn mark_as_read(&self, notification_id: &str) -> AppResult<()>;

    async fn mark_all_as_read(&self) -> AppResult<()>;

    async fn delete_notification(&self, notification_id: &str) -> AppResult<()>;

    async fn get_preferences(&self) -> AppResult<NotificationPreferences>;

    async fn update_preferences(&self, preferences: &NotificationPreferences) -> AppResult<()>;
}

/// `/movies` endpoints
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieApi: Send + Sync {
    async fn recommendations(&self) -> AppResult<MovieRecommendations>;

    async fn search(&self, query: &str) -> AppResult<Vec<Movie>>;

    async fn details(&self, movie_id: u64) -> AppResult<Movie>;

    async fn rate(&self, movie_id: u64, rating: u8) -> AppResult<()>;

    async fn add_to_watchlist(&self, movie_id: u64) -> AppResult<()>;

    async fn remove_from_watchlist(&self, movie_id: u64) -> AppResult<()>;
}

/// `/analytics` endpoints
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AnalyticsApi: Send + Sync {
    async fn viewing_stats(&self) -> AppResult<ViewingStats>;

    async fn comparison(&self) -> AppResult<ComparisonStats>;
}
