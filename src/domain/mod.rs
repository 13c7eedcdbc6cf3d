//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - data points (`Point`) and their stats
//! - fit identifiers (`Family`, `RegressionDegree`, `FitId`)
//! - fit outputs and export schemas (`FitQuality`, `CurveFile`, etc.)

pub mod types;

pub use types::*;
