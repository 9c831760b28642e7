pub mod macros;
pub mod metric;
pub mod records;
pub mod time;

pub use metric::*;
pub use records::*;
pub use time::*;
