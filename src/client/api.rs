//! HTTP client for the backend API and the platform session endpoint.
//!
//! The backend never accepts a credential from the client; authentication
//! rides on the platform session, forwarded with every call.

use reqwest::{header, StatusCode};
use serde::Deserialize;

use crate::auth::Principal;
use crate::errors::ErrorBody;
use crate::models::{FileSnapshot, RepoConfig, SaveFileRequest, SaveFileResponse};

/// Error from a backend API call.
#[derive(Debug)]
pub enum ApiError {
    /// Transport-level failure
    Http(reqwest::Error),
    /// The server answered with a non-2xx status; `message` is the server's
    /// error body when it sent one
    Api { status: StatusCode, message: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Http(err) => write!(f, "request failed: {}", err),
            ApiError::Api { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        ApiError::Http(value)
    }
}

/// Envelope the platform session endpoint returns.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionInfo {
    client_principal: Option<Principal>,
}

/// Client for the backend API, rooted at the deployed site's base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url`. `session_cookie` is the platform
    /// session cookie header value, forwarded with every request when set.
    pub fn new(base_url: impl Into<String>, session_cookie: Option<&str>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();

        if let Some(cookie) = session_cookie {
            let mut headers = header::HeaderMap::new();
            let mut value = header::HeaderValue::from_str(cookie)
                .map_err(|_| ApiError::Api {
                    status: StatusCode::BAD_REQUEST,
                    message: "session cookie is not a valid header value".to_string(),
                })?;
            value.set_sensitive(true);
            headers.insert(header::COOKIE, value);
            builder = builder.default_headers(headers);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into(),
        })
    }

    /// Build a client over an existing `reqwest::Client`, keeping whatever
    /// default headers it carries.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Query the platform session endpoint. `None` means signed out.
    pub async fn session(&self) -> Result<Option<Principal>, ApiError> {
        let response = self.http.get(self.url("/.auth/me")).send().await?;
        let response = check_response(response).await?;

        let info: SessionInfo = response.json().await.map_err(ApiError::Http)?;
        Ok(info.client_principal)
    }

    /// GET /api/getConfig
    pub async fn get_config(&self) -> Result<RepoConfig, ApiError> {
        let response = self.http.get(self.url("/api/getConfig")).send().await?;
        let response = check_response(response).await?;

        response.json().await.map_err(ApiError::Http)
    }

    /// GET /api/getFile?path=
    pub async fn get_file(&self, path: &str) -> Result<FileSnapshot, ApiError> {
        let response = self
            .http
            .get(self.url("/api/getFile"))
            .query(&[("path", path)])
            .send()
            .await?;
        let response = check_response(response).await?;

        response.json().await.map_err(ApiError::Http)
    }

    /// POST /api/saveFile - returns the new revision tag.
    pub async fn save_file(&self, request: &SaveFileRequest) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/api/saveFile"))
            .json(request)
            .send()
            .await?;
        let response = check_response(response).await?;

        let body: SaveFileResponse = response.json().await.map_err(ApiError::Http)?;
        Ok(body.sha)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Surface the server's `{ "error": ... }` message on failures, falling
/// back to a generic status line when the body carries none.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .map(|body| body.error)
        .filter(|error| !error.is_empty())
        .unwrap_or_else(|| format!("API error: {}", status));

    Err(ApiError::Api { status, message })
}
