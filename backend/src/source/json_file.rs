//! Record source reading JSON exports from a directory.
//!
//! The directory holds one array per record kind, with the spreadsheet's
//! camelCase column names:
//!
//! ```text
//! data/
//!   late_cancellations.json
//!   sales.json
//!   clients.json
//! ```

use async_trait::async_trait;
use log::warn;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use super::error::{ErrorContext, SourceError, SourceResult};
use super::RecordSource;
use crate::models::{ClientRecord, LateCancellation, SaleRecord};

pub const LATE_CANCELLATIONS_FILE: &str = "late_cancellations.json";
pub const SALES_FILE: &str = "sales.json";
pub const CLIENTS_FILE: &str = "clients.json";

/// Record source backed by JSON files. Files are re-read on every fetch.
///
/// A file that is not a JSON array fails the fetch. Array entries that do not
/// deserialize into a record are skipped.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    data_dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    async fn read_records<T: DeserializeOwned>(&self, file: &str, entity: &str) -> SourceResult<Vec<T>> {
        let path = self.data_dir.join(file);
        let context = || {
            ErrorContext::new("read_records")
                .with_entity(entity)
                .with_details(path.display().to_string())
        };

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| SourceError::io_with_context(format!("Failed to read {}: {}", file, e), context()))?;

        let rows: Vec<serde_json::Value> = serde_json::from_str(&content)
            .map_err(|e| SourceError::parse_with_context(format!("Failed to parse {}: {}", file, e), context()))?;

        let total = rows.len();
        let records: Vec<T> = rows
            .into_iter()
            .filter_map(|row| serde_json::from_value(row).ok())
            .collect();
        if records.len() < total {
            warn!(
                "Skipped {} malformed rows of {} in {}",
                total - records.len(),
                total,
                file
            );
        }
        Ok(records)
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn late_cancellations(&self) -> SourceResult<Vec<LateCancellation>> {
        self.read_records(LATE_CANCELLATIONS_FILE, "late_cancellations").await
    }

    async fn sales(&self) -> SourceResult<Vec<SaleRecord>> {
        self.read_records(SALES_FILE, "sales").await
    }

    async fn clients(&self) -> SourceResult<Vec<ClientRecord>> {
        self.read_records(CLIENTS_FILE, "clients").await
    }

    async fn health_check(&self) -> SourceResult<bool> {
        Ok(tokio::fs::metadata(&self.data_dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_spreadsheet_export() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SALES_FILE),
            r#"[{"memberId": 101, "paymentValue": "₹1,200", "calculatedLocation": "Kwality House"}]"#,
        )
        .unwrap();

        let source = JsonFileSource::new(dir.path());
        let sales = source.sales().await.unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].payment_value, Some(1200.0));
        assert!(source.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileSource::new(dir.path()).clients().await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert_eq!(err.context().entity.as_deref(), Some("clients"));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(LATE_CANCELLATIONS_FILE), "{not json").unwrap();
        let err = JsonFileSource::new(dir.path())
            .late_cancellations()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_malformed_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(LATE_CANCELLATIONS_FILE),
            r#"[null, {"memberId": "M1", "location": "Supreme HQ"}, 42, "row", {"memberId": "M2"}]"#,
        )
        .unwrap();

        let records = JsonFileSource::new(dir.path())
            .late_cancellations()
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].location.as_deref(), Some("Supreme HQ"));
    }

    #[tokio::test]
    async fn test_missing_directory_is_unhealthy() {
        let source = JsonFileSource::new("/definitely/not/here");
        assert!(!source.health_check().await.unwrap());
    }
}
