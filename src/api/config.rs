//! Repository config endpoint.
//!
//! Resolves the document manifest stored in the repository itself, so the
//! list of editable documents is versioned alongside the documents.

use axum::extract::State;
use axum::{Extension, Json};

use super::{github_token, require_repository, ApiResult};
use crate::auth::Principal;
use crate::errors::AppError;
use crate::github::FileRef;
use crate::models::{Manifest, RepoConfig};
use crate::AppState;

/// GET /api/getConfig - Fetch and parse the document manifest.
pub async fn get_config(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<RepoConfig> {
    tracing::info!(user = %principal.user_details, "getConfig invoked");

    let config = &state.config;
    let token = github_token(config)?;
    require_repository(config)?;

    let file = FileRef {
        owner: &config.owner,
        repo: &config.repo,
        path: &config.manifest_path,
        branch: &config.branch,
    };

    let snapshot = state
        .github
        .get_file(token, &file)
        .await
        .map_err(|err| AppError::Remote(format!("Failed to fetch config from GitHub: {}", err)))?;

    // A manifest that fetched but does not parse is a deployment problem,
    // not a transport one; it gets its own message and a 500.
    let manifest: Manifest = serde_json::from_str(&snapshot.content)
        .map_err(|_| AppError::ManifestParse("Invalid config file: not valid JSON".to_string()))?;

    Ok(Json(RepoConfig {
        owner: config.owner.clone(),
        repo: config.repo.clone(),
        branch: config.branch.clone(),
        documents: manifest.documents,
    }))
}
