//! # Insight Hub
//!
//! Analytics core for a multi-studio fitness business dashboard.
//!
//! The crate takes record collections exported from the studio spreadsheets
//! (late cancellations, sales, client conversions), narrows them with a
//! composable filter pipeline, and derives the metric cards each dashboard
//! page shows. Per-page view state, debounced inputs and an optional REST API
//! sit on top.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Record types, metric values and date parsing
//! - [`transformations`]: Filter criteria, location catalog and the filter pipeline
//! - [`services`]: Aggregators computing metrics from filtered collections
//! - [`source`]: Record sources and load snapshots
//! - [`view`]: Per-page view state, tabs and page controllers
//! - [`timing`]: Debounced inputs and throttling
//! - [`presentation`]: Card metadata and display formatting
//! - [`export`]: Writing filtered collections to disk
//! - [`config`]: TOML configuration with environment overrides
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`routes`]: Route-specific data types
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Pipeline
//!
//! Every view recomputes from the complete collection:
//!
//! ```text
//! records → location → trainer → class → product → time slot → timeframe → metrics
//! ```
//!
//! A stage whose selector is "all" passes its input through unchanged.

pub mod api;
pub mod config;
pub mod export;
pub mod models;
pub mod presentation;

pub mod routes;

pub mod services;
pub mod source;
pub mod timing;
pub mod transformations;
pub mod view;

#[cfg(feature = "http-server")]
pub mod http;
