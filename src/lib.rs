//! Client-side state for the CineAI movie service: session handling,
//! notifications with background polling, and watchlist views over the
//! service's REST API.

#[macro_use]
mod macros;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult, AuthError, AuthResult};
