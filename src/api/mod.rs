//! REST API module.
//!
//! Request handlers composing the principal gate, the server configuration
//! and the GitHub adapter. Each handler follows the same pipeline: resolve
//! the server-side credential, validate request parameters, delegate to the
//! adapter, translate failures into status codes.

mod config;
mod files;

pub use config::*;
pub use files::*;

use crate::config::Config;
use crate::errors::AppError;

/// Response type for all handlers: a JSON payload or a mapped error.
pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Resolve the server-side GitHub token, or the configuration error the
/// API reports when it is unset.
pub(crate) fn github_token(config: &Config) -> Result<&str, AppError> {
    config.github_token.as_deref().ok_or_else(|| {
        tracing::error!("DRAFTPAD_GITHUB_TOKEN is not configured");
        AppError::Config("Server configuration error: GitHub token not configured".to_string())
    })
}

/// Check that the repository coordinates are configured.
pub(crate) fn require_repository(config: &Config) -> Result<(), AppError> {
    if config.owner.is_empty() || config.repo.is_empty() {
        tracing::error!("DRAFTPAD_GITHUB_OWNER or DRAFTPAD_GITHUB_REPO is not configured");
        return Err(AppError::Config(
            "Server configuration error: GitHub repository not configured".to_string(),
        ));
    }
    Ok(())
}
