//! Draftpad backend and client library for GitHub-backed document editing.
//!
//! The backend is a stateless proxy over the GitHub Contents API: it holds
//! the repository-write token server-side and gates every call on the
//! identity header injected by the hosting platform's edge. The `client`
//! modules carry the other half of the system, manifest caching and the
//! load-edit-save sync controller the terminal front-end drives.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod editor;
pub mod errors;
pub mod github;
pub mod models;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use github::GitHubClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub github: GitHubClient,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes, gated on the platform identity header
    let api_routes = Router::new()
        .route("/getConfig", get(api::get_config))
        .route("/getFile", get(api::get_file))
        .route("/saveFile", post(api::save_file))
        .layer(middleware::from_fn(auth::principal_auth_layer));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
