//! cao-engine server
//!
//! Serves wage lookups and timeline assembly over HTTP and reloads the wage
//! table from disk on a fixed interval.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use cao_engine::api::{AppState, create_router};
use cao_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/cao_vvt";
const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting cao-engine v{}", env!("CARGO_PKG_VERSION"));

    let config_dir = PathBuf::from(
        std::env::var("CAO_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string()),
    );
    let addr = std::env::var("CAO_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading wage table from {}", config_dir.display()))?;
    info!(
        agreement = %config.table().metadata().code,
        version = %config.table().metadata().version,
        rates = config.table().rate_count(),
        "Loaded wage table"
    );

    let state = AppState::new(config, config_dir);
    spawn_refresh(state.clone());

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("cao-engine listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Reloads the wage table every `refresh_interval_secs`. A failed reload
/// keeps the current snapshot.
fn spawn_refresh(state: AppState) {
    let period = Duration::from_secs(state.settings().refresh_interval_secs.max(1));

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;

            let store = state.store().clone();
            let dir = state.config_dir().to_path_buf();
            match tokio::task::spawn_blocking(move || store.reload(&dir)).await {
                Ok(Ok(generation)) => info!(generation, "Wage table refreshed"),
                Ok(Err(err)) => warn!(
                    error = %err,
                    "Wage table refresh failed; keeping current snapshot"
                ),
                Err(err) => warn!(error = %err, "Wage table refresh task panicked"),
            }
        }
    });
}
