//! Fitted curve representations.
//!
//! Models are plain data (coefficients and breakpoints) so they can be
//! evaluated, inspected by the renderer, and exported as JSON.

pub mod model;
pub mod piecewise;
pub mod polynomial;

pub use model::*;
pub use piecewise::{CubicPiece, LinearPiece, Piecewise, Segment};
pub use polynomial::Polynomial;
