//! Document store configuration

use serde::{Deserialize, Serialize};

/// MongoDB connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Connection string (default: "mongodb://localhost:27017")
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Database name (default: "plantCare_db")
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection holding plant records (default: "plants")
    #[serde(default = "default_collection")]
    pub collection: String,

    /// How long to wait for a reachable server (default: 10)
    #[serde(default = "default_server_selection_timeout_secs")]
    pub server_selection_timeout_secs: u64,

    /// Application name reported to the server
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Declare Stable API v1 in strict mode with deprecation errors
    /// (default: true)
    #[serde(default = "default_stable_api")]
    pub stable_api: bool,
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "plantCare_db".to_string()
}

fn default_collection() -> String {
    "plants".to_string()
}

fn default_server_selection_timeout_secs() -> u64 {
    10
}

fn default_app_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_stable_api() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: default_database(),
            collection: default_collection(),
            server_selection_timeout_secs: default_server_selection_timeout_secs(),
            app_name: default_app_name(),
            stable_api: default_stable_api(),
        }
    }
}

impl StoreConfig {
    /// Connection string with any password replaced, for logging
    pub fn redacted_uri(&self) -> String {
        let Some((scheme, rest)) = self.uri.split_once("://") else {
            return self.uri.clone();
        };
        match rest.split_once('@') {
            Some((credentials, host)) => {
                let user = credentials.split(':').next().unwrap_or_default();
                format!("{}://{}:***@{}", scheme, user, host)
            }
            None => self.uri.clone(),
        }
    }
}
