use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    api::AuthApi,
    error::{AppResult, AuthResult},
    models::{AuthResponse, Session, SessionState, User},
    storage::{self, DurableStorage, StorageKey},
};

/// Owns the signed-in identity and keeps it in sync with durable storage
///
/// The store starts in [`SessionState::Loading`]; call [`SessionStore::restore`]
/// once at startup to pick up a previously persisted session.
pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    storage: Arc<dyn DurableStorage>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    pub fn new(api: Arc<dyn AuthApi>, storage: Arc<dyn DurableStorage>) -> Self {
        Self {
            api,
            storage,
            state: RwLock::new(SessionState::Loading),
        }
    }

    /// Rebuilds the session from durable storage without touching the network
    pub async fn restore(&self) -> SessionState {
        let restored = match self.read_persisted() {
            Ok(Some(session)) => {
                tracing::info!(user_id = %session.user.id, "Session restored from storage");
                SessionState::Authenticated(session)
            }
            Ok(None) => SessionState::Unauthenticated,
            Err(e) => {
                tracing::warn!(error = %e, "Stored session unreadable, starting signed out");
                SessionState::Unauthenticated
            }
        };

        *self.state.write().await = restored.clone();
        restored
    }

    fn read_persisted(&self) -> AppResult<Option<Session>> {
        let Some(token) = self.storage.get(StorageKey::Token)? else {
            return Ok(None);
        };
        let Some(user) = storage::get_json::<User>(self.storage.as_ref(), StorageKey::User)? else {
            return Ok(None);
        };
        let refresh_token = self.storage.get(StorageKey::RefreshToken)?;

        Ok(Some(Session {
            user,
            token,
            refresh_token,
        }))
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthResult<User> {
        let auth = self.api.login(email, password).await?;
        self.establish(auth).await
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> AuthResult<User> {
        let auth = self.api.register(name, email, password).await?;
        self.establish(auth).await
    }

    /// Persists a successful auth response, then publishes it in memory
    ///
    /// A partial write never leaves a token stored next to another account's
    /// user record: on any storage error every credential key is removed.
    async fn establish(&self, auth: AuthResponse) -> AuthResult<User> {
        if let Err(e) = self.persist(&auth) {
            tracing::error!(error = %e, "Failed to persist session, clearing credentials");
            self.clear().await;
            return Err(e.into());
        }

        let session = Session::from(auth);
        let user = session.user.clone();
        tracing::info!(user_id = %user.id, "Signed in");

        *self.state.write().await = SessionState::Authenticated(session);
        Ok(user)
    }

    fn persist(&self, auth: &AuthResponse) -> AppResult<()> {
        self.storage.set(StorageKey::Token, &auth.token)?;
        storage::set_json(self.storage.as_ref(), StorageKey::User, &auth.user)?;
        match &auth.refresh_token {
            Some(refresh_token) => self.storage.set(StorageKey::RefreshToken, refresh_token),
            None => self.storage.remove(StorageKey::RefreshToken),
        }
    }

    /// Signs out locally; the server-side invalidation is best effort
    pub async fn logout(&self) {
        let token = match self.storage.get(StorageKey::Token) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read token for logout");
                self.state.read().await.session().map(|s| s.token.clone())
            }
        };

        if let Some(token) = token {
            if let Err(e) = self.api.logout(&token).await {
                tracing::error!(error = %e, "Logout request failed");
            }
        }

        self.clear().await;
        tracing::info!("Signed out");
    }

    /// Exchanges the stored refresh token for a new access token
    ///
    /// Returns `None` when no refresh token is stored. Any failure signs the
    /// user out.
    pub async fn refresh(&self) -> Option<String> {
        let refresh_token = match self.storage.get(StorageKey::RefreshToken) {
            Ok(Some(refresh_token)) => refresh_token,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read refresh token");
                return None;
            }
        };

        let token = match self.api.refresh(&refresh_token).await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, clearing session");
                self.clear().await;
                return None;
            }
        };

        if let Err(e) = self.storage.set(StorageKey::Token, &token) {
            tracing::error!(error = %e, "Could not persist refreshed token, clearing session");
            self.clear().await;
            return None;
        }

        {
            let mut state = self.state.write().await;
            if let SessionState::Authenticated(session) = &mut *state {
                session.token = token.clone();
                tracing::debug!("Access token refreshed");
                return Some(token);
            }
        }

        // Not signed in yet in memory (e.g. refresh before restore)
        match self.read_persisted() {
            Ok(Some(session)) => {
                *self.state.write().await = SessionState::Authenticated(session);
                tracing::debug!("Access token refreshed");
                Some(token)
            }
            _ => {
                tracing::warn!("Refreshed token has no stored user, clearing session");
                self.clear().await;
                None
            }
        }
    }

    async fn clear(&self) {
        for key in [StorageKey::Token, StorageKey::RefreshToken, StorageKey::User] {
            if let Err(e) = self.storage.remove(key) {
                tracing::error!(error = %e, key = %key, "Failed to clear stored credential");
            }
        }
        *self.state.write().await = SessionState::Unauthenticated;
    }

    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user().cloned()
    }

    pub async fn is_authenticated(&self) -> bool {
        matches!(*self.state.read().await, SessionState::Authenticated(_))
    }

    pub async fn is_loading(&self) -> bool {
        matches!(*self.state.read().await, SessionState::Loading)
    }
}
