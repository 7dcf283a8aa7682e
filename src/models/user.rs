use serde::{Deserialize, Serialize};

/// Authenticated account as returned by the auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Body returned by `/auth/login` and `/auth/register`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// Error body the API attaches to rejected auth requests
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Credentials and identity held while signed in
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: User,
    pub token: String,
    pub refresh_token: Option<String>,
}

impl From<AuthResponse> for Session {
    fn from(auth: AuthResponse) -> Self {
        Session {
            user: auth.user,
            token: auth.token,
            refresh_token: auth.refresh_token,
        }
    }
}

/// Lifecycle of the session store
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Durable storage has not been read yet
    Loading,
    Unauthenticated,
    Authenticated(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.session().map(|s| &s.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_deserialize_camel_case() {
        let json = r#"{
            "user": {"id": "u1", "email": "ada@example.com", "name": "Ada"},
            "token": "jwt",
            "refreshToken": "refresh"
        }"#;

        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(auth.user.name, "Ada");
        assert_eq!(auth.token, "jwt");
        assert_eq!(auth.refresh_token.as_deref(), Some("refresh"));
    }

    #[test]
    fn test_auth_response_without_refresh_token() {
        let json = r#"{"user": {"id": "u1", "email": "a@b.c", "name": "A"}, "token": "jwt"}"#;
        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(auth.refresh_token, None);
    }

    #[test]
    fn test_refresh_request_serialization() {
        let body = serde_json::to_string(&RefreshRequest {
            refresh_token: "r1",
        })
        .unwrap();
        assert_eq!(body, r#"{"refreshToken":"r1"}"#);
    }

    #[test]
    fn test_session_state_accessors() {
        let user = User {
            id: "u1".to_string(),
            email: "a@b.c".to_string(),
            name: "A".to_string(),
        };
        let state = SessionState::Authenticated(Session {
            user: user.clone(),
            token: "t".to_string(),
            refresh_token: None,
        });

        assert_eq!(state.user(), Some(&user));
        assert_eq!(SessionState::Loading.user(), None);
        assert_eq!(SessionState::Unauthenticated.session(), None);
    }
}
