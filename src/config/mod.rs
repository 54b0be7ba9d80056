//! Configuration module for the draftpad backend.
//!
//! All configuration is loaded from environment variables with sensible
//! defaults. The GitHub token and repository coordinates are server-side
//! only and never reach clients.

use std::env;
use std::net::SocketAddr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Repository-write token for the GitHub API (required in production)
    pub github_token: Option<String>,
    /// Owner of the repository holding the documents
    pub owner: String,
    /// Name of the repository holding the documents
    pub repo: String,
    /// Branch all reads and writes target
    pub branch: String,
    /// Repository-relative path of the document manifest
    pub manifest_path: String,
    /// Base URL of the GitHub API
    pub api_base: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let github_token = env::var("DRAFTPAD_GITHUB_TOKEN").ok();

        let owner = env::var("DRAFTPAD_GITHUB_OWNER").unwrap_or_default();
        let repo = env::var("DRAFTPAD_GITHUB_REPO").unwrap_or_default();

        let branch = env::var("DRAFTPAD_GITHUB_BRANCH").unwrap_or_else(|_| "main".to_string());

        let manifest_path = env::var("DRAFTPAD_MANIFEST_PATH")
            .unwrap_or_else(|_| "documents/manifest.json".to_string());

        let api_base = env::var("DRAFTPAD_GITHUB_API_BASE")
            .unwrap_or_else(|_| crate::github::DEFAULT_API_BASE.to_string());

        let bind_addr = env::var("DRAFTPAD_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid DRAFTPAD_BIND_ADDR format");

        let log_level = env::var("DRAFTPAD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            github_token,
            owner,
            repo,
            branch,
            manifest_path,
            api_base,
            bind_addr,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("DRAFTPAD_GITHUB_TOKEN");
        env::remove_var("DRAFTPAD_GITHUB_OWNER");
        env::remove_var("DRAFTPAD_GITHUB_REPO");
        env::remove_var("DRAFTPAD_GITHUB_BRANCH");
        env::remove_var("DRAFTPAD_MANIFEST_PATH");
        env::remove_var("DRAFTPAD_GITHUB_API_BASE");
        env::remove_var("DRAFTPAD_BIND_ADDR");
        env::remove_var("DRAFTPAD_LOG_LEVEL");

        let config = Config::from_env();

        assert!(config.github_token.is_none());
        assert!(config.owner.is_empty());
        assert!(config.repo.is_empty());
        assert_eq!(config.branch, "main");
        assert_eq!(config.manifest_path, "documents/manifest.json");
        assert_eq!(config.api_base, "https://api.github.com");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
    }
}
