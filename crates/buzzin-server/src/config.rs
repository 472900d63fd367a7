//! Server configuration loaded from environment variables.
//!
//! All settings have defaults so the server can start with zero configuration
//! for local development.

use std::net::SocketAddr;
use std::path::Path;

use buzzin_shared::constants::DEFAULT_HTTP_PORT;
use buzzin_store::{Database, StoreError};

/// Store location that opens a private in-memory database.
pub const IN_MEMORY_STORE: &str = ":memory:";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite file holding the link records, or `:memory:`.
    /// Env: `DATABASE_PATH`
    /// Default: `buzzin.db` in the platform data directory
    pub database_path: Option<String>,

    /// Socket address for the HTTP API server.
    /// Env: `HTTP_ADDR`, with `PORT` overriding just the port.
    /// Default: `0.0.0.0:5000`
    pub http_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("DATABASE_PATH").filter(|p| !p.trim().is_empty()) {
            config.database_path = Some(path);
        }

        if let Some(addr) = lookup("HTTP_ADDR") {
            match addr.parse::<SocketAddr>() {
                Ok(parsed) => config.http_addr = parsed,
                Err(_) => tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default"),
            }
        }

        if let Some(port) = lookup("PORT") {
            match port.parse::<u16>() {
                Ok(parsed) => config.http_addr.set_port(parsed),
                Err(_) => tracing::warn!(value = %port, "Invalid PORT, using default"),
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }

    /// Open the configured store, running migrations.
    pub fn open_store(&self) -> Result<Database, StoreError> {
        match self.database_path.as_deref() {
            None => Database::new(),
            Some(IN_MEMORY_STORE) => Database::open_in_memory(),
            Some(path) => Database::open_at(Path::new(path)),
        }
    }
}
