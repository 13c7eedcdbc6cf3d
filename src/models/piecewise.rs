//! Piecewise function composer.
//!
//! Given breakpoints `x₀ ≤ x₁ ≤ … ≤ xₙ` and one local function per interval
//! `[xᵢ, xᵢ₊₁)`, [`Piecewise::evaluate`] dispatches to the piece whose interval
//! contains `x`.
//!
//! Outside `[x₀, xₙ)` the composed function returns `0.0`. There is no
//! extrapolation, and `x == xₙ` is outside too. Renderers clip splines to the
//! data range anyway, so the zero never reaches the screen in practice.
//!
//! Repeated breakpoints are allowed. The interval between two equal
//! breakpoints is empty, so its piece is never selected by `evaluate`; it is
//! still reachable through [`Piecewise::segment`].

use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// A local function on one interval.
pub trait Segment {
    fn eval(&self, x: f64) -> f64;
}

impl<F: Fn(f64) -> f64> Segment for F {
    #[inline]
    fn eval(&self, x: f64) -> f64 {
        self(x)
    }
}

/// Line `a + b·x` (global coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearPiece {
    pub a: f64,
    pub b: f64,
}

impl Segment for LinearPiece {
    #[inline]
    fn eval(&self, x: f64) -> f64 {
        self.a + self.b * x
    }
}

/// Cubic `a + b·t + c·t² + d·t³` with `t = x - x0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicPiece {
    pub x0: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Segment for CubicPiece {
    #[inline]
    fn eval(&self, x: f64) -> f64 {
        let t = x - self.x0;
        self.a + t * (self.b + t * (self.c + t * self.d))
    }
}

/// Breakpoints plus one piece per interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piecewise<S> {
    breakpoints: Vec<f64>,
    pieces: Vec<S>,
}

impl<S: Segment> Piecewise<S> {
    /// Compose a piecewise function.
    ///
    /// # Errors
    /// - [`FitError::PieceCountMismatch`] unless `pieces.len() + 1 == breakpoints.len()`.
    /// - [`FitError::UnsortedBreakpoints`] if the breakpoints decrease anywhere
    ///   (or contain `NaN`).
    pub fn new(breakpoints: Vec<f64>, pieces: Vec<S>) -> Result<Self, FitError> {
        if pieces.len() + 1 != breakpoints.len() {
            return Err(FitError::PieceCountMismatch {
                breakpoints: breakpoints.len(),
                pieces: pieces.len(),
            });
        }
        for w in breakpoints.windows(2) {
            if !(w[0] <= w[1]) {
                return Err(FitError::UnsortedBreakpoints {
                    prev: w[0],
                    next: w[1],
                });
            }
        }
        Ok(Self { breakpoints, pieces })
    }

    /// Index of the interval `[xᵢ, xᵢ₊₁)` containing `x`, if any.
    pub fn locate(&self, x: f64) -> Option<usize> {
        let n = self.breakpoints.len();
        if n < 2 {
            return None;
        }
        // Number of breakpoints <= x; the last of them starts the interval.
        let upper = self.breakpoints.partition_point(|&b| b <= x);
        if upper == 0 || upper >= n {
            return None;
        }
        Some(upper - 1)
    }

    /// Evaluate the composed function; `0.0` outside `[x₀, xₙ)`.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.locate(x)
            .and_then(|i| self.pieces.get(i))
            .map_or(0.0, |piece| piece.eval(x))
    }

    /// `true` when `x` falls in some interval.
    pub fn covers(&self, x: f64) -> bool {
        self.locate(x).is_some()
    }

    /// `[x₀, xₙ]`.
    pub fn domain(&self) -> Option<(f64, f64)> {
        match (self.breakpoints.first(), self.breakpoints.last()) {
            (Some(&lo), Some(&hi)) => Some((lo, hi)),
            _ => None,
        }
    }

    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    pub fn pieces(&self) -> &[S] {
        &self.pieces
    }

    pub fn segment(&self, i: usize) -> Option<&S> {
        self.pieces.get(i)
    }
}
