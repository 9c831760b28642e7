//! Hub configuration file support.
//!
//! Settings are read from `insight-hub.toml`. Every section is optional, and
//! a handful of environment variables override the file:
//!
//! | Variable               | Overrides         |
//! |------------------------|-------------------|
//! | `INSIGHT_HUB_SOURCE`   | `source.type`     |
//! | `INSIGHT_HUB_DATA_DIR` | `source.data_dir` |
//! | `HOST`                 | `server.host`     |
//! | `PORT`                 | `server.port`     |
//!
//! ```toml
//! [source]
//! type = "json"
//! data_dir = "data"
//!
//! [[locations]]
//! id = "kwality"
//! name = "Kwality House"
//! full_name = "Kwality House, Kemps Corner"
//! aliases = ["kwality", "kemps"]
//!
//! [trends]
//! significance_pct = 5.0
//! moderate_pct = 10.0
//! strong_pct = 20.0
//!
//! [timing]
//! debounce_ms = 300
//! throttle_ms = 300
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::services::TrendThresholds;
use crate::source::SourceType;
use crate::transformations::{LocationBucket, LocationCatalog};

pub const CONFIG_FILE_NAME: &str = "insight-hub.toml";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No insight-hub.toml found in standard locations")]
    NotFound,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete hub configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    pub source: SourceSettings,
    /// Location buckets; empty means the built-in studio catalog.
    pub locations: Vec<LocationBucket>,
    pub trends: TrendThresholds,
    pub timing: TimingSettings,
    pub server: ServerSettings,
}

/// Record source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    #[serde(rename = "type")]
    pub source_type: String,
    pub data_dir: PathBuf,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            source_type: "local".to_string(),
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Input rate limiting settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    pub debounce_ms: u64,
    pub throttle_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            throttle_ms: 300,
        }
    }
}

impl TimingSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

/// HTTP server bind settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl HubConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: HubConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `insight-hub.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Default-location config with environment overrides, falling back to
    /// the built-in defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match Self::from_default_location() {
            Ok(config) => config,
            Err(ConfigError::NotFound) => Self::default(),
            Err(e) => return Err(e),
        };
        config.with_env_overrides()
    }

    /// Apply `INSIGHT_HUB_SOURCE`, `INSIGHT_HUB_DATA_DIR`, `HOST` and `PORT`.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(source_type) = std::env::var("INSIGHT_HUB_SOURCE") {
            self.source.source_type = source_type;
        }
        if let Ok(data_dir) = std::env::var("INSIGHT_HUB_DATA_DIR") {
            self.source.data_dir = PathBuf::from(data_dir);
        }
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT must be a port number, got '{}'", port)))?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.source_type()?;
        self.trends.validate().map_err(ConfigError::Invalid)?;
        for bucket in &self.locations {
            if bucket.id.trim().is_empty() {
                return Err(ConfigError::Invalid("location id must not be empty".to_string()));
            }
            if bucket.aliases.iter().all(|a| a.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "location '{}' needs at least one alias",
                    bucket.id
                )));
            }
        }
        Ok(())
    }

    pub fn source_type(&self) -> Result<SourceType, ConfigError> {
        self.source.source_type.parse().map_err(ConfigError::Invalid)
    }

    /// The configured location catalog, or the built-in one.
    pub fn catalog(&self) -> LocationCatalog {
        if self.locations.is_empty() {
            LocationCatalog::default()
        } else {
            LocationCatalog::new(self.locations.clone())
        }
    }
}
