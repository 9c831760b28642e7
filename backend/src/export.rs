//! Export of filtered record collections.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

/// Error type for exports
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Invalid export file name '{0}'")]
    InvalidName(String),

    #[error("Failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for exported records.
pub trait Exporter {
    /// Write `records` under `file_name` and return where they went.
    fn export<T: Serialize>(&self, records: &[T], file_name: &str) -> Result<PathBuf, ExportError>;
}

/// Writes a pretty-printed JSON array to `<dir>/<file_name>.json`.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    dir: PathBuf,
}

impl JsonExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn target(&self, file_name: &str) -> Result<PathBuf, ExportError> {
        let name = file_name.trim();
        let stem = name.strip_suffix(".json").unwrap_or(name);
        let invalid = stem.is_empty()
            || stem == "."
            || stem == ".."
            || stem.contains(['/', '\\']);
        if invalid {
            return Err(ExportError::InvalidName(file_name.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", stem)))
    }
}

impl Exporter for JsonExporter {
    fn export<T: Serialize>(&self, records: &[T], file_name: &str) -> Result<PathBuf, ExportError> {
        let path = self.target(file_name)?;
        let body = serde_json::to_vec_pretty(records)?;

        fs::create_dir_all(&self.dir).map_err(|source| ExportError::Write {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(&path, body).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

        debug!("Exported {} records to {}", records.len(), path.display());
        Ok(path)
    }
}
