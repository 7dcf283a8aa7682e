use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cineai_client::{
    api::ApiClient,
    models::SessionState,
    services::{NotificationSettings, NotificationStore, SessionStore},
    storage::{DurableStorage, FileStorage},
    Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cineai_client=info,cineai=info")),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(api_url = %config.api_url, storage = %config.storage_path.display(), "Starting CineAI client");

    let storage: Arc<dyn DurableStorage> = Arc::new(FileStorage::new(config.storage_path.clone()));
    let client = Arc::new(ApiClient::new(config.api_url.clone(), Arc::clone(&storage)));

    let session = SessionStore::new(client.clone(), Arc::clone(&storage));
    match session.restore().await {
        SessionState::Authenticated(session) => {
            tracing::info!(user = %session.user.email, "Restored session")
        }
        _ => {
            tracing::info!("No stored session; notifications require signing in");
            return Ok(());
        }
    }

    let notifications = Arc::new(NotificationStore::new(
        client,
        NotificationSettings::from(&config),
    ));
    notifications.start().await;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    tracing::info!("Shutting down");
    notifications.shutdown().await;
    Ok(())
}
