//! Least-squares polynomial regression.
//!
//! For `n` points and degree `d` we build the `n × (d+1)` design matrix `D`
//! (row `i` is `[tᵢ^d, …, tᵢ, 1]`) and solve the normal equations
//!
//! ```text
//! (Dᵀ D) c = Dᵀ y
//! ```
//!
//! with `Dᵀy` computed as the row product `yᵀ D`. The solution `c` is stored
//! highest power first, matching [`crate::math::horner`].
//!
//! `tᵢ = (xᵢ - mid) / half` maps the x-range onto `[-1, 1]`. Raw powers of
//! offset data (x around 10, degree 10) make `DᵀD` span dozens of orders of
//! magnitude and the solve loses every digit; in `t` the entries stay O(n).
//!
//! Data that cannot determine a degree-`d` polynomial (too few points, or too
//! few distinct x-values) is reported as an error the registry turns into
//! "no curve".

use nalgebra::{DMatrix, DVector};

use crate::domain::Point;
use crate::error::FitError;
use crate::fit::registry::absent_if_recoverable;
use crate::math::{fill_design_row, multiply, solve, transpose, vector_multiply};
use crate::models::{Curve, Polynomial};

/// Fit a degree-`degree` polynomial, keeping the failure reason.
///
/// # Errors
/// - [`FitError::InvalidDegree`] for `degree == 0`.
/// - [`FitError::TooFewPoints`] when `points.len() <= degree`.
/// - [`FitError::SingularMatrix`] when fewer than `degree + 1` distinct
///   x-values exist, the normal matrix has no usable pivot, or the solve
///   produces non-finite coefficients.
pub fn try_fit_regression(points: &[Point], degree: usize) -> Result<Polynomial, FitError> {
    if degree == 0 {
        return Err(FitError::InvalidDegree { got: degree });
    }
    let n = points.len();
    let cols = degree + 1;
    if n <= degree {
        return Err(FitError::TooFewPoints { got: n, need: cols });
    }

    // Rank of D is bounded by the number of distinct abscissae.
    let distinct = distinct_x_count(points);
    if distinct <= degree {
        return Err(FitError::SingularMatrix { column: distinct });
    }

    let (shift, scale) = normalization(points);

    let mut design = DMatrix::<f64>::zeros(n, cols);
    let mut row = vec![0.0; cols];
    for (i, p) in points.iter().enumerate() {
        fill_design_row((p.x - shift) / scale, &mut row);
        for (j, &v) in row.iter().enumerate() {
            design[(i, j)] = v;
        }
    }
    let y = DVector::from_iterator(n, points.iter().map(|p| p.y));

    let normal = multiply(&transpose(&design), &design)?;
    let rhs = vector_multiply(&y, &design)?;
    let coeffs = solve(&normal, &rhs)?;

    if let Some(column) = coeffs.iter().position(|c| !c.is_finite()) {
        return Err(FitError::SingularMatrix { column });
    }

    Ok(Polynomial::scaled(coeffs.iter().copied().collect(), shift, scale))
}

/// Fit a degree-`degree` polynomial; `Ok(None)` when the data cannot support it.
pub fn fit_regression(points: &[Point], degree: usize) -> Result<Option<Curve>, FitError> {
    let result = try_fit_regression(points, degree).map(Curve::Polynomial);
    absent_if_recoverable(result, || format!("regression of degree {degree}"), points.len())
}

/// Midpoint and half-width of the x-range.
///
/// Only called with at least two distinct x-values, so the half-width is
/// positive unless the range overflows.
fn normalization(points: &[Point]) -> (f64, f64) {
    let (lo, hi) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
    let shift = lo / 2.0 + hi / 2.0;
    let scale = hi / 2.0 - lo / 2.0;
    if scale.is_finite() && scale > 0.0 {
        (shift, scale)
    } else {
        (0.0, 1.0)
    }
}

fn distinct_x_count(points: &[Point]) -> usize {
    let mut xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    xs.len()
}
