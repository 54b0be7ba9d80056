//! File fetch and save wire types.

use serde::{Deserialize, Serialize};

/// A decoded file together with its revision tag (the remote blob sha).
///
/// The sha is the optimistic-concurrency token: a later write must present
/// the sha it read, and the remote store rejects the write when the tag no
/// longer matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSnapshot {
    pub content: String,
    pub sha: String,
}

/// Query parameters for `getFile`.
#[derive(Debug, Deserialize)]
pub struct GetFileQuery {
    #[serde(default)]
    pub path: Option<String>,
}

/// Request body for `saveFile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFileRequest {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub content: String,
    /// Revision tag read with the content being replaced
    #[serde(default)]
    pub sha: String,
    /// Commit message for the write
    #[serde(default)]
    pub message: String,
}

/// Response body for `saveFile`: the new revision tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFileResponse {
    pub sha: String,
}
