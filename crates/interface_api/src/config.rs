//! API configuration

use serde::Deserialize;

use infra_db::{ReferencePolicy, DEFAULT_DATABASE_URL};

/// Backing store for the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Process-local tables, lost on shutdown
    Memory,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL, used by the postgres backend
    pub database_url: String,
    /// Log level
    pub log_level: String,
    pub store: StoreBackend,
    /// Reject pokemon whose owner or category does not exist
    pub strict_references: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            log_level: "info".to_string(),
            store: StoreBackend::default(),
            strict_references: false,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn reference_policy(&self) -> ReferencePolicy {
        ReferencePolicy::from_strict(self.strict_references)
    }
}
