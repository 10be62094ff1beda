//! Service configuration
//!
//! Resolution order, last wins:
//! 1. built-in defaults
//! 2. JSON config file (`--config`)
//! 3. environment (`MONGODB_URI`, `PORT`), process variables over `.env`
//! 4. command-line flags

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::store::StoreConfig;

use super::errors::{CliError, CliResult};

/// Environment variable overriding `store.uri`
pub const ENV_MONGODB_URI: &str = "MONGODB_URI";
/// Environment variable overriding `http.port`
pub const ENV_PORT: &str = "PORT";
/// Dotenv file read from the working directory
pub const DOTENV_FILE: &str = ".env";

/// Path the health endpoint is mounted on
const HEALTH_PATH: &str = "/health";

/// Read `KEY=value` pairs from a dotenv file. An absent file yields no pairs.
pub fn read_dotenv(path: &Path) -> CliResult<HashMap<String, String>> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => return Ok(HashMap::new()),
        Err(e) => {
            return Err(CliError::config_error(format!(
                "Failed to read {:?}: {}",
                path, e
            )))
        }
    };

    iter.map(|item| {
        item.map_err(|e| CliError::config_error(format!("Invalid entry in {:?}: {}", path, e)))
    })
    .collect()
}

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration from file, or defaults when no path is given.
    /// Not yet validated; overrides still apply.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {:?}: {}", path, e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup(ENV_MONGODB_URI).filter(|v| !v.is_empty()) {
            self.store.uri = uri;
        }

        if let Some(port) = lookup(ENV_PORT).filter(|v| !v.is_empty()) {
            self.http.port = port.trim().parse().map_err(|_| {
                CliError::config_error(format!("{} is not a valid port: '{}'", ENV_PORT, port))
            })?;
        }

        Ok(())
    }

    /// Load, apply the environment and the port flag, then validate.
    /// Process variables take precedence over `.env` entries.
    pub fn resolve(path: Option<&Path>, port: Option<u16>) -> CliResult<Self> {
        let mut config = Self::load(path)?;
        let dotenv = read_dotenv(Path::new(DOTENV_FILE))?;
        config.apply_env(|key| std::env::var(key).ok().or_else(|| dotenv.get(key).cloned()))?;
        if let Some(port) = port {
            config.http.port = port;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        let root = &self.http.resource_root;
        let trimmed = root.trim_end_matches('/');
        if !root.starts_with('/') || trimmed.is_empty() {
            return Err(CliError::config_error(format!(
                "http.resource_root must be a non-root path starting with '/': '{}'",
                root
            )));
        }

        // Path parameters and wildcards cannot be nested under
        if root.contains(':') || root.contains('*') {
            return Err(CliError::config_error(format!(
                "http.resource_root must not contain ':' or '*': '{}'",
                root
            )));
        }

        if trimmed == HEALTH_PATH {
            return Err(CliError::config_error(format!(
                "http.resource_root conflicts with the health endpoint: '{}'",
                root
            )));
        }

        if self.store.uri.trim().is_empty() {
            return Err(CliError::config_error("store.uri must not be empty"));
        }

        if self.store.database.trim().is_empty() {
            return Err(CliError::config_error("store.database must not be empty"));
        }

        if self.store.collection.trim().is_empty() {
            return Err(CliError::config_error("store.collection must not be empty"));
        }

        Ok(())
    }
}
