//! Client configuration.
//!
//! The API base URL is taken from `BUZZIN_API_URL` at compile time when set,
//! otherwise the local development server. The same variable at runtime wins
//! over both.

use std::path::PathBuf;

use buzzin_shared::constants::DEFAULT_API_URL;

use crate::error::Result;
use crate::storage::LocalStorage;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, including the `/api` prefix.
    /// Env: `BUZZIN_API_URL`
    pub api_url: String,

    /// Local storage file. `None` uses the platform data directory.
    /// Env: `BUZZIN_STORAGE_PATH`
    pub storage_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: option_env!("BUZZIN_API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
            storage_path: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("BUZZIN_API_URL").filter(|u| !u.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }

        if let Some(path) = lookup("BUZZIN_STORAGE_PATH").filter(|p| !p.trim().is_empty()) {
            config.storage_path = Some(PathBuf::from(path));
        }

        config
    }

    pub fn open_storage(&self) -> Result<LocalStorage> {
        match &self.storage_path {
            Some(path) => LocalStorage::open(path),
            None => LocalStorage::open_default(),
        }
    }
}
