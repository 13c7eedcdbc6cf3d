//! The visible window in data coordinates.
//!
//! - `viewport`: pan / zoom / fit and the cell <-> coordinate mapping
//! - `ticks`: "nice" axis tick spacing and labels

pub mod ticks;
pub mod viewport;

pub use ticks::*;
pub use viewport::*;
