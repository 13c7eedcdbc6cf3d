//! Mathematical utilities: monomial basis and dense linear solves.

pub mod basis;
pub mod linalg;

pub use basis::*;
pub use linalg::*;
