//! Record source factory.
//!
//! Creates record source instances based on runtime configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "json-source")]
use super::json_file::JsonFileSource;
use super::local::LocalSource;
use super::{RecordSource, SourceError, SourceResult};
use crate::config::HubConfig;

/// Record source type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// In-memory collections
    Local,
    /// JSON exports in a data directory
    Json,
}

impl FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            "json" | "file" => Ok(Self::Json),
            _ => Err(format!("Unknown source type: {}", s)),
        }
    }
}

impl SourceType {
    /// Read `INSIGHT_HUB_SOURCE`, defaulting to [`SourceType::Local`].
    pub fn from_env() -> Self {
        std::env::var("INSIGHT_HUB_SOURCE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Self::Local)
    }
}

/// Factory for creating record source instances.
pub struct SourceFactory;

impl SourceFactory {
    /// Create a record source of the given type.
    ///
    /// `data_dir` is required for [`SourceType::Json`].
    pub fn create(source_type: SourceType, data_dir: Option<&Path>) -> SourceResult<Arc<dyn RecordSource>> {
        match source_type {
            SourceType::Local => Ok(Self::create_local()),
            SourceType::Json => {
                let data_dir = data_dir.ok_or_else(|| {
                    SourceError::configuration("JSON source requires a data directory")
                })?;
                Self::create_json(data_dir)
            }
        }
    }

    pub fn create_local() -> Arc<dyn RecordSource> {
        Arc::new(LocalSource::new())
    }

    #[cfg(feature = "json-source")]
    pub fn create_json(data_dir: &Path) -> SourceResult<Arc<dyn RecordSource>> {
        Ok(Arc::new(JsonFileSource::new(data_dir)))
    }

    #[cfg(not(feature = "json-source"))]
    pub fn create_json(_data_dir: &Path) -> SourceResult<Arc<dyn RecordSource>> {
        Err(SourceError::configuration("JSON source feature not enabled"))
    }

    /// Create a record source from hub configuration.
    pub fn from_config(config: &HubConfig) -> SourceResult<Arc<dyn RecordSource>> {
        let source_type = config
            .source_type()
            .map_err(|e| SourceError::configuration(e.to_string()).with_operation("from_config"))?;
        Self::create(source_type, Some(config.source.data_dir.as_path()))
    }
}
