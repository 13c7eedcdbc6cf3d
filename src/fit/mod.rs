//! Curve fitting.
//!
//! - polynomial least-squares regression (degrees 1..=10)
//! - linear and natural cubic interpolating splines
//! - the registry that maps identifiers like `spline+3` onto them

pub mod registry;
pub mod regression;
pub mod spline;

pub use registry::{CATALOG, fit, lookup};
pub use regression::*;
pub use spline::*;
