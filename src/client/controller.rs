//! Load-edit-save controller for a single document session.
//!
//! Holds the working copy, the pristine copy for dirty checking and the
//! revision tag the next save must carry. Failures never clobber the edited
//! content: they land in the error overlay and the prior state stays put.
//! There is no retry anywhere: every failed operation waits for the user
//! to trigger it again.

use crate::client::api::{ApiClient, ApiError};
use crate::client::cache::CacheStore;
use crate::editor;
use crate::models::{RepoConfig, SaveFileRequest};

/// Main controller states. The error overlay is orthogonal to these and
/// lives in `last_error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoDocument,
    Loading,
    Loaded,
    Saving,
}

/// Outcome of a document selection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The document loaded and the session now tracks it
    Loaded,
    /// Unsaved changes exist and the caller did not allow discarding them
    Declined,
    /// The load failed; the session reverted to no selection
    Failed,
}

/// Outcome of a save attempt that did not hit the network-error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The write landed and the session now tracks the new revision tag
    Saved,
    /// Nothing to save: content matches the original
    Clean,
    /// No document is loaded
    NotLoaded,
}

pub struct SyncController {
    api: ApiClient,
    cache: CacheStore,
    state: SessionState,
    selected_path: Option<String>,
    content: String,
    original: String,
    sha: String,
    last_error: Option<String>,
}

impl SyncController {
    pub fn new(api: ApiClient, cache: CacheStore) -> Self {
        Self {
            api,
            cache,
            state: SessionState::NoDocument,
            selected_path: None,
            content: String::new(),
            original: String::new(),
            sha: String::new(),
            last_error: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selected_path(&self) -> Option<&str> {
        self.selected_path.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// The revision tag the next save will carry.
    pub fn sha(&self) -> &str {
        &self.sha
    }

    /// Unsaved changes exist iff the working copy differs from the original.
    pub fn is_dirty(&self) -> bool {
        self.content != self.original
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Pop the error overlay for display.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Resolve the repository config, cache first. A network fetch
    /// refreshes the cache.
    pub async fn config(&mut self) -> Result<RepoConfig, ApiError> {
        if let Some(cached) = self.cache.cached_config() {
            return Ok(cached);
        }

        let config = self.api.get_config().await?;
        self.cache.set_cached_config(&config);
        Ok(config)
    }

    /// Drop the cached manifest and refetch.
    pub async fn refresh_config(&mut self) -> Result<RepoConfig, ApiError> {
        self.cache.clear_config();
        self.config().await
    }

    /// The previously opened path, provided the manifest still lists it.
    pub fn restore_last_opened(&self, config: &RepoConfig) -> Option<String> {
        let last = self.cache.last_opened()?;
        config
            .documents
            .iter()
            .any(|document| document.path == last)
            .then_some(last)
    }

    /// Switch the session to `path` and load it.
    ///
    /// Unsaved changes block the switch unless `discard_changes` is set; a
    /// declined switch leaves the whole session untouched. A failed load
    /// reverts to no selection with the error surfaced.
    pub async fn select_document(&mut self, path: &str, discard_changes: bool) -> SelectOutcome {
        if self.is_dirty() && !discard_changes {
            return SelectOutcome::Declined;
        }

        self.reset();
        self.state = SessionState::Loading;
        self.selected_path = Some(path.to_string());

        match self.api.get_file(path).await {
            Ok(snapshot) => {
                self.content = snapshot.content.clone();
                self.original = snapshot.content;
                self.sha = snapshot.sha;
                self.state = SessionState::Loaded;
                self.cache.set_last_opened(path);
                SelectOutcome::Loaded
            }
            Err(err) => {
                self.reset();
                self.last_error = Some(err.to_string());
                SelectOutcome::Failed
            }
        }
    }

    /// Replace the working copy. Dirtiness is derived, not stored.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    /// Save the working copy with the held revision tag.
    ///
    /// On success the original and the tag catch up to the saved content.
    /// On failure content and original are left exactly as they were; the
    /// error is surfaced and also returned.
    pub async fn save(&mut self, message: &str) -> Result<SaveOutcome, ApiError> {
        let Some(path) = self.selected_path.clone() else {
            return Ok(SaveOutcome::NotLoaded);
        };
        if self.state != SessionState::Loaded {
            return Ok(SaveOutcome::NotLoaded);
        }
        if !self.is_dirty() {
            return Ok(SaveOutcome::Clean);
        }

        self.state = SessionState::Saving;

        let request = SaveFileRequest {
            path,
            content: self.content.clone(),
            sha: self.sha.clone(),
            message: message.to_string(),
        };

        match self.api.save_file(&request).await {
            Ok(new_sha) => {
                self.original = self.content.clone();
                self.sha = new_sha;
                self.state = SessionState::Loaded;
                Ok(SaveOutcome::Saved)
            }
            Err(err) => {
                self.state = SessionState::Loaded;
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Replace the first literal occurrence of `search` in the working copy.
    pub fn replace_once(&mut self, search: &str, replacement: &str) {
        self.content = editor::replace_once(&self.content, search, replacement);
    }

    /// Replace every literal occurrence of `search` in the working copy.
    pub fn replace_all(&mut self, search: &str, replacement: &str) {
        self.content = editor::replace_all(&self.content, search, replacement);
    }

    fn reset(&mut self) {
        self.state = SessionState::NoDocument;
        self.selected_path = None;
        self.content.clear();
        self.original.clear();
        self.sha.clear();
    }
}
