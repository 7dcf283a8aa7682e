/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Errors surfaced by login, registration and token refresh
#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    /// The server refused the request; carries its message or a default
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Transport(#[from] AppError),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Transport(AppError::HttpClient(err))
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
