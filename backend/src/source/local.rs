//! In-memory record source.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use super::error::{ErrorContext, SourceError, SourceResult};
use super::RecordSource;
use crate::models::{ClientRecord, LateCancellation, SaleRecord};

#[derive(Debug, Default)]
struct LocalData {
    late_cancellations: Vec<LateCancellation>,
    sales: Vec<SaleRecord>,
    clients: Vec<ClientRecord>,
}

/// Record source backed by in-memory collections.
///
/// Clones share the same data. Marking the source unhealthy makes every
/// fetch fail, which is how callers exercise the failure path.
#[derive(Debug, Clone)]
pub struct LocalSource {
    data: Arc<RwLock<LocalData>>,
    healthy: Arc<RwLock<bool>>,
}

impl Default for LocalSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalSource {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
            healthy: Arc::new(RwLock::new(true)),
        }
    }

    pub fn with_late_cancellations(self, records: Vec<LateCancellation>) -> Self {
        self.set_late_cancellations(records);
        self
    }

    pub fn with_sales(self, records: Vec<SaleRecord>) -> Self {
        self.set_sales(records);
        self
    }

    pub fn with_clients(self, records: Vec<ClientRecord>) -> Self {
        self.set_clients(records);
        self
    }

    pub fn set_late_cancellations(&self, records: Vec<LateCancellation>) {
        self.data.write().late_cancellations = records;
    }

    pub fn set_sales(&self, records: Vec<SaleRecord>) {
        self.data.write().sales = records;
    }

    pub fn set_clients(&self, records: Vec<ClientRecord>) {
        self.data.write().clients = records;
    }

    pub fn set_healthy(&self, healthy: bool) {
        *self.healthy.write() = healthy;
    }

    fn ensure_healthy(&self, operation: &str, entity: &str) -> SourceResult<()> {
        if *self.healthy.read() {
            Ok(())
        } else {
            Err(SourceError::unavailable_with_context(
                "Local source is marked unhealthy",
                ErrorContext::new(operation).with_entity(entity),
            ))
        }
    }
}

#[async_trait]
impl RecordSource for LocalSource {
    async fn late_cancellations(&self) -> SourceResult<Vec<LateCancellation>> {
        self.ensure_healthy("fetch_late_cancellations", "late_cancellations")?;
        Ok(self.data.read().late_cancellations.clone())
    }

    async fn sales(&self) -> SourceResult<Vec<SaleRecord>> {
        self.ensure_healthy("fetch_sales", "sales")?;
        Ok(self.data.read().sales.clone())
    }

    async fn clients(&self) -> SourceResult<Vec<ClientRecord>> {
        self.ensure_healthy("fetch_clients", "clients")?;
        Ok(self.data.read().clients.clone())
    }

    async fn health_check(&self) -> SourceResult<bool> {
        Ok(*self.healthy.read())
    }
}
