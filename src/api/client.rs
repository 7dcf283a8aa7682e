//! HTTP implementation of the remote API traits
//!
//! Every request carries `Authorization: Bearer <token>` when a token is
//! present in durable storage. The token is read per request, so a login or
//! logout through the session store takes effect on the next call.

use std::sync::Arc;

use reqwest::{Client as HttpClient, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    api::{AnalyticsApi, AuthApi, MovieApi, NotificationApi},
    error::{AppError, AppResult, AuthError, AuthResult},
    models::{
        ApiErrorBody, AuthResponse, ComparisonStats, LoginRequest, Movie, MovieRecommendations,
        Notification, NotificationPreferences, RateRequest, RefreshRequest, RefreshResponse,
        RegisterRequest, ViewingStats,
    },
    storage::{DurableStorage, StorageKey},
};

#[derive(Clone)]
pub struct ApiClient {
    http_client: HttpClient,
    base_url: String,
    storage: Arc<dyn DurableStorage>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, storage: Arc<dyn DurableStorage>) -> Self {
        Self::with_http_client(HttpClient::new(), base_url, storage)
    }

    pub fn with_http_client(
        http_client: HttpClient,
        base_url: impl Into<String>,
        storage: Arc<dyn DurableStorage>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
            storage,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer_token(&self) -> Option<String> {
        match self.storage.get(StorageKey::Token) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read token from storage");
                None
            }
        }
    }

    /// Builds a request for `path`, attaching the stored bearer token if any
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http_client.request(method, self.url(path));
        match self.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn ensure_success(response: Response) -> AppResult<Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> AppResult<T> {
        let response = Self::ensure_success(builder.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn send_empty(builder: RequestBuilder) -> AppResult<()> {
        Self::ensure_success(builder.send().await?).await?;
        Ok(())
    }

    /// POSTs an unauthenticated auth request, mapping a rejection to the
    /// server's `message` or `default_message`
    async fn auth_call<B, T>(&self, path: &str, body: &B, default_message: &str) -> AuthResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http_client
            .post(self.url(path))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error: ApiErrorBody = response.json().await.unwrap_or_default();
            let message = error
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| default_message.to_string());

            tracing::warn!(path = %path, status = %status, "Auth request rejected");
            return Err(AuthError::Rejected(message));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> AuthResult<AuthResponse> {
        self.auth_call("/auth/login", &LoginRequest { email, password }, "Login failed")
            .await
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> AuthResult<AuthResponse> {
        self.auth_call(
            "/auth/register",
            &RegisterRequest {
                name,
                email,
                password,
            },
            "Registration failed",
        )
        .await
    }

    async fn refresh(&self, refresh_token: &str) -> AuthResult<String> {
        let response: RefreshResponse = self
            .auth_call(
                "/auth/refresh",
                &RefreshRequest { refresh_token },
                "Token refresh failed",
            )
            .await?;
        Ok(response.token)
    }

    async fn logout(&self, token: &str) -> AppResult<()> {
        let builder = self
            .http_client
            .post(self.url("/auth/logout"))
            .bearer_auth(token);
        Self::send_empty(builder).await
    }
}

#[async_trait::async_trait]
impl NotificationApi for ApiClient {
    async fn list_notifications(&self, limit: u32) -> AppResult<Vec<Notification>> {
        let builder = self
            .request(Method::GET, "/notifications")
            .query(&[("limit", limit)]);
        let notifications: Vec<Notification> = Self::send_json(builder).await?;

        tracing::debug!(count = notifications.len(), "Notifications fetched");
        Ok(notifications)
    }

    async fn mark_as_read(&self, notification_id: &str) -> AppResult<()> {
        let path = format!("/notifications/{}/read", notification_id);
        Self::send_empty(self.request(Method::POST, &path)).await
    }

    async fn mark_all_as_read(&self) -> AppResult<()> {
        Self::send_empty(self.request(Method::POST, "/notifications/read-all")).await
    }

    async fn delete_notification(&self, notification_id: &str) -> AppResult<()> {
        let path = format!("/notifications/{}", notification_id);
        Self::send_empty(self.request(Method::DELETE, &path)).await
    }

    async fn get_preferences(&self) -> AppResult<NotificationPreferences> {
        Self::send_json(self.request(Method::GET, "/notifications/preferences")).await
    }

    async fn update_preferences(&self, preferences: &NotificationPreferences) -> AppResult<()> {
        let builder = self
            .request(Method::PUT, "/notifications/preferences")
            .json(preferences);
        Self::send_empty(builder).await
    }
}

#[async_trait::async_trait]
impl MovieApi for ApiClient {
    async fn recommendations(&self) -> AppResult<MovieRecommendations> {
        Self::send_json(self.request(Method::GET, "/movies/recommendations")).await
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Movie>> {
        let builder = self
            .request(Method::GET, "/movies/search")
            .query(&[("q", query)]);
        let movies: Vec<Movie> = Self::send_json(builder).await?;

        tracing::info!(query = %query, results = movies.len(), "Movie search completed");
        Ok(movies)
    }

    async fn details(&self, movie_id: u64) -> AppResult<Movie> {
        let path = format!("/movies/{}", movie_id);
        Self::send_json(self.request(Method::GET, &path)).await
    }

    async fn rate(&self, movie_id: u64, rating: u8) -> AppResult<()> {
        let path = format!("/movies/{}/rate", movie_id);
        let builder = self
            .request(Method::POST, &path)
            .json(&RateRequest { rating });
        Self::send_empty(builder).await
    }

    async fn add_to_watchlist(&self, movie_id: u64) -> AppResult<()> {
        let path = format!("/movies/{}/watchlist", movie_id);
        Self::send_empty(self.request(Method::POST, &path)).await
    }

    async fn remove_from_watchlist(&self, movie_id: u64) -> AppResult<()> {
        let path = format!("/movies/{}/watchlist", movie_id);
        Self::send_empty(self.request(Method::DELETE, &path)).await
    }
}

#[async_trait::async_trait]
impl AnalyticsApi for ApiClient {
    async fn viewing_stats(&self) -> AppResult<ViewingStats> {
        Self::send_json(self.request(Method::GET, "/analytics/viewing-stats")).await
    }

    async fn comparison(&self) -> AppResult<ComparisonStats> {
        Self::send_json(self.request(Method::GET, "/analytics/comparison")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn client_with_storage(storage: Arc<MemoryStorage>) -> ApiClient {
        ApiClient::new("http://api.test/api/", storage)
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = client_with_storage(Arc::new(MemoryStorage::new()));
        assert_eq!(client.base_url(), "http://api.test/api");
        assert_eq!(client.url("/auth/login"), "http://api.test/api/auth/login");
    }

    #[test]
    fn test_bearer_token_read_from_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let client = client_with_storage(storage.clone());
        assert_eq!(client.bearer_token(), None);

        storage.set(StorageKey::Token, "jwt").unwrap();
        assert_eq!(client.bearer_token().as_deref(), Some("jwt"));

        storage.set(StorageKey::Token, "").unwrap();
        assert_eq!(client.bearer_token(), None);
    }

    #[test]
    fn test_request_attaches_authorization_header() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(StorageKey::Token, "jwt").unwrap();
        let client = client_with_storage(storage);

        let request = client
            .request(Method::GET, "/notifications")
            .build()
            .unwrap();
        assert_eq!(
            request
                .headers()
                .get(reqwest::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer jwt")
        );
    }

    #[test]
    fn test_request_without_token_has_no_authorization_header() {
        let client = client_with_storage(Arc::new(MemoryStorage::new()));
        let request = client
            .request(Method::GET, "/movies/recommendations")
            .build()
            .unwrap();
        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }
}
