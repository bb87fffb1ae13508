//! Configuration management for the ride-request server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! The binary calls `dotenvy::dotenv()` first, so a local `.env` file works too.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Tracing filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "ride_request=info,tower_http=debug";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Entity store configuration
    pub storage: StorageConfig,
    /// Prefix for hypermedia links, e.g. `https://rides.example.com`.
    /// Empty means links are relative paths.
    pub public_base_url: String,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Tracing filter directives (`RUST_LOG`)
    pub log_level: String,
    /// Seconds to wait for in-flight requests after a shutdown signal
    pub shutdown_timeout: u64,
}

/// Which entity store backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// In-process maps; data is lost on restart.
    #[default]
    Memory,
    /// `PostgreSQL` via `DATABASE_URL`.
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(format!("Unknown storage backend: {other}")),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

/// Entity store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Selected backend
    pub backend: StorageBackend,
    /// `PostgreSQL` connection URL (required for the postgres backend)
    pub database_url: Option<String>,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// `STORAGE_BACKEND` value that was not recognized, if any. The backend
    /// falls back to memory in that case.
    pub unrecognized_backend: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Falls back to defaults for any variable that is unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// An unknown `STORAGE_BACKEND` falls back to the in-memory store and is
    /// kept in [`StorageConfig::unrecognized_backend`] so the caller can warn
    /// once logging is up.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let (backend, unrecognized_backend) = match lookup("STORAGE_BACKEND") {
            None => (StorageBackend::default(), None),
            Some(raw) => match raw.parse() {
                Ok(backend) => (backend, None),
                Err(_) => (StorageBackend::Memory, Some(raw)),
            },
        };

        Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: lookup("PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8080),
                log_level: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
                shutdown_timeout: lookup("SHUTDOWN_TIMEOUT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            },
            storage: StorageConfig {
                backend,
                database_url: lookup("DATABASE_URL"),
                max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
                unrecognized_backend,
            },
            public_base_url: lookup("PUBLIC_BASE_URL").unwrap_or_default(),
        }
    }

    /// Address the HTTP listener binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
