//! GitHub Contents API adapter.
//!
//! A thin proxy over the remote content endpoints: one request per
//! operation, no local caching, retries or backoff. Writes are conditional
//! on the blob sha the caller previously read; the remote store rejects a
//! write whose sha no longer matches the file's current state.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::{header, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::models::FileSnapshot;

/// Default API base for github.com deployments.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User agent sent with every upstream request.
const USER_AGENT: &str = concat!("draftpad/", env!("CARGO_PKG_VERSION"));

const ACCEPT_CONTENTS: &str = "application/vnd.github.v3+json";

/// Error from the remote content store.
#[derive(Debug)]
pub enum RemoteError {
    /// Transport-level failure (connect, timeout, body read)
    Http(reqwest::Error),
    /// The remote answered with a non-2xx status
    Status { status: StatusCode, body: String },
    /// A 2xx response body did not match the documented shape
    InvalidResponse(String),
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteError::Http(err) => write!(f, "GitHub request failed: {}", err),
            RemoteError::Status { status, body } => {
                write!(f, "GitHub API error: {} - {}", status, body)
            }
            RemoteError::InvalidResponse(msg) => {
                write!(f, "GitHub returned an invalid response: {}", msg)
            }
        }
    }
}

impl std::error::Error for RemoteError {}

impl From<reqwest::Error> for RemoteError {
    fn from(value: reqwest::Error) -> Self {
        RemoteError::Http(value)
    }
}

/// Location of a file within a repository branch.
#[derive(Debug, Clone, Copy)]
pub struct FileRef<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub path: &'a str,
    pub branch: &'a str,
}

#[derive(Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
}

#[derive(Deserialize)]
struct PutResponse {
    content: PutContent,
}

#[derive(Deserialize)]
struct PutContent {
    sha: String,
}

/// Client for the GitHub Contents API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
}

impl GitHubClient {
    /// Create a client against `api_base` (the real API, or a GitHub
    /// Enterprise / test endpoint).
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
        }
    }

    /// Fetch the file at `file` and decode its base64 payload.
    pub async fn get_file(&self, token: &str, file: &FileRef<'_>) -> Result<FileSnapshot, RemoteError> {
        let response = self
            .http
            .get(self.contents_url(file))
            .query(&[("ref", file.branch)])
            .bearer_auth(token)
            .header(header::ACCEPT, ACCEPT_CONTENTS)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let response = check_status(response).await?;
        let data: ContentsResponse = response.json().await.map_err(RemoteError::Http)?;

        let content = decode_content(&data.content)?;

        Ok(FileSnapshot {
            content,
            sha: data.sha,
        })
    }

    /// Write `content` to `file`, conditional on `sha` still being the
    /// file's current revision tag. Returns the new blob sha.
    pub async fn put_file(
        &self,
        token: &str,
        file: &FileRef<'_>,
        content: &str,
        sha: &str,
        message: &str,
    ) -> Result<String, RemoteError> {
        let encoded = BASE64_STANDARD.encode(content.as_bytes());

        let response = self
            .http
            .put(self.contents_url(file))
            .bearer_auth(token)
            .header(header::ACCEPT, ACCEPT_CONTENTS)
            .header(header::USER_AGENT, USER_AGENT)
            .json(&json!({
                "message": message,
                "content": encoded,
                "sha": sha,
                "branch": file.branch,
            }))
            .send()
            .await?;

        let response = check_status(response).await?;
        let data: PutResponse = response.json().await.map_err(RemoteError::Http)?;

        Ok(data.content.sha)
    }

    fn contents_url(&self, file: &FileRef<'_>) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base.trim_end_matches('/'),
            file.owner,
            file.repo,
            file.path
        )
    }
}

/// Map non-2xx responses to `RemoteError::Status` with the body text attached.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(RemoteError::Status { status, body })
}

/// Decode a contents payload. GitHub chunks the base64 with newlines, so
/// whitespace is stripped before decoding.
fn decode_content(raw: &str) -> Result<String, RemoteError> {
    let compact: String = raw.split_whitespace().collect();

    let bytes = BASE64_STANDARD
        .decode(compact.as_bytes())
        .map_err(|err| RemoteError::InvalidResponse(format!("content is not base64: {}", err)))?;

    String::from_utf8(bytes)
        .map_err(|err| RemoteError::InvalidResponse(format!("content is not UTF-8: {}", err)))
}
