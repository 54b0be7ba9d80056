//! File endpoints: read and conditionally write repository documents.

use axum::extract::{Query, State};
use axum::{Extension, Json};

use super::{github_token, require_repository, ApiResult};
use crate::auth::Principal;
use crate::errors::AppError;
use crate::github::FileRef;
use crate::models::{FileSnapshot, GetFileQuery, SaveFileRequest, SaveFileResponse};
use crate::AppState;

/// GET /api/getFile?path= - Fetch a document at the configured branch.
pub async fn get_file(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<GetFileQuery>,
) -> ApiResult<FileSnapshot> {
    tracing::info!(user = %principal.user_details, "getFile invoked");

    let config = &state.config;
    let token = github_token(config)?;
    require_repository(config)?;

    let path = query
        .path
        .filter(|path| !path.is_empty())
        .ok_or_else(|| AppError::Validation("Missing required parameter: path".to_string()))?;

    let file = FileRef {
        owner: &config.owner,
        repo: &config.repo,
        path: &path,
        branch: &config.branch,
    };

    let snapshot = state
        .github
        .get_file(token, &file)
        .await
        .map_err(|err| AppError::Remote(format!("Failed to fetch file from GitHub: {}", err)))?;

    Ok(Json(snapshot))
}

/// POST /api/saveFile - Conditional write keyed on the previously read sha.
pub async fn save_file(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<SaveFileRequest>,
) -> ApiResult<SaveFileResponse> {
    tracing::info!(user = %principal.user_details, path = %request.path, "saveFile invoked");

    let config = &state.config;
    let token = github_token(config)?;
    require_repository(config)?;

    let mut missing = Vec::new();
    if request.path.is_empty() {
        missing.push("path");
    }
    if request.content.is_empty() {
        missing.push("content");
    }
    if request.sha.is_empty() {
        missing.push("sha");
    }
    if request.message.is_empty() {
        missing.push("message");
    }
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let file = FileRef {
        owner: &config.owner,
        repo: &config.repo,
        path: &request.path,
        branch: &config.branch,
    };

    let sha = state
        .github
        .put_file(token, &file, &request.content, &request.sha, &request.message)
        .await
        .map_err(|err| AppError::Remote(format!("Failed to save file to GitHub: {}", err)))?;

    Ok(Json(SaveFileResponse { sha }))
}
