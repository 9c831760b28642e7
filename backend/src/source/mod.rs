//! Record sources.
//!
//! A [`RecordSource`] supplies the already-parsed record collections the
//! dashboard works on. Fetching is the only asynchronous boundary of the
//! crate: [`load_snapshot`] turns one fetch into a [`SourceSnapshot`], and a
//! failed fetch becomes the empty, not-loading state rather than an error.
//!
//! # Implementations
//!
//! - [`LocalSource`]: in-memory collections, used for tests and demos
//! - [`JsonFileSource`]: JSON arrays exported from the studio spreadsheets

pub mod error;
pub mod factory;
#[cfg(feature = "json-source")]
pub mod json_file;
pub mod local;

use std::future::Future;

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::models::{ClientRecord, LateCancellation, SaleRecord};

pub use error::{ErrorContext, SourceError, SourceResult};
pub use factory::{SourceFactory, SourceType};
#[cfg(feature = "json-source")]
pub use json_file::JsonFileSource;
pub use local::LocalSource;

/// Supplier of record collections.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared by the HTTP server.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn late_cancellations(&self) -> SourceResult<Vec<LateCancellation>>;

    async fn sales(&self) -> SourceResult<Vec<SaleRecord>>;

    async fn clients(&self) -> SourceResult<Vec<ClientRecord>>;

    /// Whether the backing store is currently reachable.
    async fn health_check(&self) -> SourceResult<bool>;
}

/// The state of one record collection as seen by a page.
///
/// `data` is `None` until a fetch completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSnapshot<T> {
    pub data: Option<Vec<T>>,
    pub loading: bool,
}

impl<T> Default for SourceSnapshot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> SourceSnapshot<T> {
    /// A fetch is in flight.
    pub fn loading() -> Self {
        Self {
            data: None,
            loading: true,
        }
    }

    /// Nothing to show, nothing pending.
    pub fn empty() -> Self {
        Self {
            data: None,
            loading: false,
        }
    }

    pub fn ready(data: Vec<T>) -> Self {
        Self {
            data: Some(data),
            loading: false,
        }
    }

    /// The loaded records; an absent collection reads as empty.
    pub fn records(&self) -> &[T] {
        self.data.as_deref().unwrap_or(&[])
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

impl<T> From<Vec<T>> for SourceSnapshot<T> {
    fn from(data: Vec<T>) -> Self {
        Self::ready(data)
    }
}

/// Await one fetch and turn its outcome into a snapshot.
///
/// A failure is logged and yields [`SourceSnapshot::empty`]; retrying is left
/// to the source.
pub async fn load_snapshot<T, F>(kind: &str, fetch: F) -> SourceSnapshot<T>
where
    F: Future<Output = SourceResult<Vec<T>>>,
{
    match fetch.await {
        Ok(records) => {
            debug!("Loaded {} {} records", records.len(), kind);
            SourceSnapshot::ready(records)
        }
        Err(e) => {
            warn!("Failed to load {} records: {}", kind, e);
            SourceSnapshot::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_data_reads_as_empty() {
        let snapshot: SourceSnapshot<SaleRecord> = SourceSnapshot::loading();
        assert!(snapshot.is_loading());
        assert!(snapshot.records().is_empty());

        let empty: SourceSnapshot<SaleRecord> = SourceSnapshot::default();
        assert!(!empty.is_loading());
        assert!(empty.records().is_empty());
    }

    #[tokio::test]
    async fn test_load_snapshot_success() {
        let snapshot = load_snapshot("sales", async { Ok(vec![SaleRecord::default()]) }).await;
        assert!(!snapshot.loading);
        assert_eq!(snapshot.records().len(), 1);
    }

    #[tokio::test]
    async fn test_load_snapshot_failure_is_empty_state() {
        let snapshot: SourceSnapshot<SaleRecord> =
            load_snapshot("sales", async { Err(SourceError::unavailable("offline")) }).await;
        assert_eq!(snapshot, SourceSnapshot::empty());
    }
}
