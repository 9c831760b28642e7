//! Public API surface for the analytics core.
//!
//! This file consolidates the DTO types returned by the services and the HTTP
//! API, together with the record and criteria types they are built from.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::client_conversion::ClientConversionData;
pub use crate::routes::client_conversion::ClientConversionMetrics;
pub use crate::routes::landing::FilterOptions;
pub use crate::routes::landing::LocationInfo;
pub use crate::routes::landing::PageInfo;
pub use crate::routes::late_cancellations::CancellationRankings;
pub use crate::routes::late_cancellations::CancellationSummary;
pub use crate::routes::late_cancellations::LateCancellationsData;
pub use crate::routes::late_cancellations::MemberCancellations;
pub use crate::routes::late_cancellations::ValueCount;
pub use crate::routes::sales::ProductSales;
pub use crate::routes::sales::SalesData;
pub use crate::routes::sales::SalesMetrics;

pub use crate::models::{
    ClientRecord, LateCancellation, MemberId, Metric, MetricComparison, MetricKey, MetricUnit,
    SaleRecord, TrendLevel,
};
pub use crate::presentation::{CardStyle, MetricCard};
pub use crate::transformations::{
    DateRange, DateWindow, FilterCriteria, LocationBucket, PeriodPair, Selection, TimeSlot,
    Timeframe,
};
pub use crate::view::{AnalysisTab, Page, ViewState, ViewUpdate};

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
