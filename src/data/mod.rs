//! Sample data for trying the tool without a points file.

pub mod sample;

pub use sample::*;
