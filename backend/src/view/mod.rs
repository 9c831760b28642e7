//! Tab and filter state.
//!
//! Each page owns a [`ViewState`]. A [`PageController`] binds that state to a
//! record collection and recomputes the filtered records and metric cards on
//! every change; a [`Workspace`] keeps the states of all pages apart.

pub mod navigation;
pub mod page;
pub mod state;

pub use navigation::{Page, Workspace};
pub use page::{fixed_clock, system_clock, Clock, PageController};
pub use state::{AnalysisTab, FilterField, ViewState, ViewUpdate};
