//! Record filtering.
//!
//! This module narrows record collections according to the dashboard's
//! filter selectors. Every function is pure: the input slice is never
//! modified and the same criteria over the same records always yield the
//! same result.
//!
//! # Modules
//!
//! - [`criteria`]: selector types and the "all" sentinel
//! - [`locations`]: studio buckets matched by alias substrings
//! - [`filtering`]: the staged filter pipeline
//! - [`periods`]: current/previous windows for comparative metrics
//!
//! # Example
//!
//! ```no_run
//! use insight_hub::models::LateCancellation;
//! use insight_hub::transformations::{apply_filters, FilterCriteria, LocationCatalog, Selection};
//!
//! # fn example(records: Vec<LateCancellation>) {
//! let criteria = FilterCriteria {
//!     location: Selection::only("kwality"),
//!     ..Default::default()
//! };
//! let now = chrono::Local::now().naive_local();
//! let kwality = apply_filters(&records, &criteria, &LocationCatalog::default(), now);
//! # }
//! ```

pub mod criteria;
pub mod filtering;
pub mod locations;
pub mod periods;

pub use criteria::{DateRange, FilterCriteria, Selection, TimeSlot, Timeframe, ALL};
pub use filtering::{
    apply_filters, custom_range_floor, filter_by_category, filter_by_location,
    filter_by_time_slot, filter_by_timeframe, Category, FilterPipeline,
};
pub use locations::{LocationBucket, LocationCatalog};
pub use periods::{comparison_windows, DateWindow, PeriodPair};
