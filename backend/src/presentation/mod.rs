//! Card metadata and display formatting.

pub mod cards;
pub mod format;

pub use cards::{card_style, metric_cards, CardStyle, MetricCard};
pub use format::{
    format_currency, format_date, format_days, format_metric_value, format_number,
    format_percent, format_short_date, format_time, or_not_available, NOT_AVAILABLE,
};
