//! Rate limiting for view-state updates.
//!
//! Neither utility touches the filter pipeline; they only decide when a
//! selector change is committed to a [`ViewState`](crate::view::ViewState).

pub mod debounce;
pub mod throttle;

pub use debounce::{DebouncedInput, Debouncer};
pub use throttle::Throttle;
