//! Fitted curve: the single shape every algorithm produces.
//!
//! Callers never need to know which algorithm built a [`Curve`]:
//! - `evaluate(x)` gives the value
//! - `family()` / `clip_domain()` tell a renderer whether to draw across the
//!   whole window or only over the data

use serde::{Deserialize, Serialize};

use crate::domain::Family;
use crate::models::piecewise::{CubicPiece, LinearPiece, Piecewise};
use crate::models::polynomial::Polynomial;

/// Something that maps reals to reals.
pub trait FittedFunction {
    fn evaluate(&self, x: f64) -> f64;

    #[inline]
    fn evaluate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}

/// A fitted curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Curve {
    Polynomial(Polynomial),
    PiecewiseLinear(Piecewise<LinearPiece>),
    PiecewiseCubic(Piecewise<CubicPiece>),
}

impl Curve {
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            Curve::Polynomial(p) => p.evaluate(x),
            Curve::PiecewiseLinear(p) => p.evaluate(x),
            Curve::PiecewiseCubic(p) => p.evaluate(x),
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Curve::Polynomial(_) => Family::Regression,
            Curve::PiecewiseLinear(_) | Curve::PiecewiseCubic(_) => Family::Spline,
        }
    }

    /// Range a renderer should clip drawing to. `None` means "extrapolate freely".
    pub fn clip_domain(&self) -> Option<(f64, f64)> {
        match self {
            Curve::Polynomial(_) => None,
            Curve::PiecewiseLinear(p) => p.domain(),
            Curve::PiecewiseCubic(p) => p.domain(),
        }
    }

    /// `true` when `x` is inside the interval set the curve is defined on.
    pub fn covers(&self, x: f64) -> bool {
        match self {
            Curve::Polynomial(_) => x.is_finite(),
            Curve::PiecewiseLinear(p) => p.covers(x),
            Curve::PiecewiseCubic(p) => p.covers(x),
        }
    }

    /// Number of free parameters, used by information criteria.
    pub fn parameter_count(&self) -> usize {
        match self {
            Curve::Polynomial(p) => p.coefficients().len(),
            Curve::PiecewiseLinear(p) => 2 * p.pieces().len(),
            Curve::PiecewiseCubic(p) => 4 * p.pieces().len(),
        }
    }
}

impl FittedFunction for Curve {
    fn evaluate(&self, x: f64) -> f64 {
        Curve::evaluate(self, x)
    }
}
