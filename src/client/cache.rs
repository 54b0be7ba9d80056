//! On-disk cache for the manifest and the last-opened document.
//!
//! Two values with distinct policies: the manifest expires after a day of
//! wall-clock time, the last-opened path lives until overwritten. Storage
//! failures are invisible to callers: reads degrade to a miss and writes
//! are best-effort.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::RepoConfig;

const CONFIG_FILE: &str = "config.json";
const LAST_DOCUMENT_FILE: &str = "last-document";

/// Cached manifests go stale after this many hours.
const CONFIG_TTL_HOURS: i64 = 24;

/// Manifest cache entry with its fetch time.
#[derive(Debug, Serialize, Deserialize)]
struct CachedConfig {
    fetched_at: DateTime<Utc>,
    config: RepoConfig,
}

/// File-backed cache rooted at a directory.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The cached manifest, unless missing, unreadable or older than the
    /// TTL. An expired entry is cleared on the way out.
    pub fn cached_config(&self) -> Option<RepoConfig> {
        let raw = fs::read_to_string(self.dir.join(CONFIG_FILE)).ok()?;
        let entry: CachedConfig = serde_json::from_str(&raw).ok()?;

        if Utc::now() - entry.fetched_at > Duration::hours(CONFIG_TTL_HOURS) {
            self.clear_config();
            return None;
        }

        Some(entry.config)
    }

    /// Store a freshly fetched manifest with the current time.
    pub fn set_cached_config(&self, config: &RepoConfig) {
        let entry = CachedConfig {
            fetched_at: Utc::now(),
            config: config.clone(),
        };

        if let Ok(raw) = serde_json::to_string(&entry) {
            let _ = fs::create_dir_all(&self.dir);
            let _ = fs::write(self.dir.join(CONFIG_FILE), raw);
        }
    }

    /// Drop the cached manifest.
    pub fn clear_config(&self) {
        let _ = fs::remove_file(self.dir.join(CONFIG_FILE));
    }

    /// Path of the last opened document. No expiry.
    pub fn last_opened(&self) -> Option<String> {
        fs::read_to_string(self.dir.join(LAST_DOCUMENT_FILE))
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|path| !path.is_empty())
    }

    /// Record the last opened document, overwriting any prior value.
    pub fn set_last_opened(&self, path: &str) {
        let _ = fs::create_dir_all(&self.dir);
        let _ = fs::write(self.dir.join(LAST_DOCUMENT_FILE), path);
    }

    /// Forget the last opened document.
    pub fn clear_last_opened(&self) {
        let _ = fs::remove_file(self.dir.join(LAST_DOCUMENT_FILE));
    }
}
