//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::AnalyticsContext;
use crate::source::RecordSource;
use crate::view::{system_clock, Clock};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record source every request reads from
    pub source: Arc<dyn RecordSource>,
    /// Location catalog and trend thresholds
    pub context: Arc<AnalyticsContext>,
    /// "Now" for relative timeframes
    pub clock: Clock,
}

impl AppState {
    /// Create a new application state reading the wall clock.
    pub fn new(source: Arc<dyn RecordSource>, context: AnalyticsContext) -> Self {
        Self::with_clock(source, context, system_clock())
    }

    pub fn with_clock(source: Arc<dyn RecordSource>, context: AnalyticsContext, clock: Clock) -> Self {
        Self {
            source,
            context: Arc::new(context),
            clock,
        }
    }
}
