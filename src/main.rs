//! Draftpad backend server.
//!
//! Holds the repository-write token and proxies document reads and
//! conditional writes to the GitHub Contents API.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use draftpad::config::Config;
use draftpad::github::GitHubClient;
use draftpad::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting draftpad backend");
    tracing::info!(
        "Repository: {}/{} ({})",
        config.owner,
        config.repo,
        config.branch
    );
    tracing::info!("Manifest path: {}", config.manifest_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if the token is not configured
    if config.github_token.is_none() {
        tracing::warn!("No GitHub token configured (DRAFTPAD_GITHUB_TOKEN). API calls will fail!");
    }

    // Create application state
    let state = AppState {
        github: GitHubClient::new(config.api_base.clone()),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
