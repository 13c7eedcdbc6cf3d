//! Terminal plotting.
//!
//! - `sample`: turn a curve into drawable polylines
//! - `ascii`: fixed-size text plots for `sketchfit fit` / `sketchfit plot`

pub mod ascii;
pub mod sample;

pub use ascii::*;
pub use sample::*;
