//! Interpolating splines: piecewise linear and natural cubic.
//!
//! Both sort the points by x first (stable, so tied x-values keep their input
//! order) and hand one piece per consecutive pair to [`Piecewise`].
//!
//! Natural cubic spline, for knots `x₀ < … < x_N` with values `aᵢ = yᵢ`:
//!
//! ```text
//! hᵢ = xᵢ₊₁ - xᵢ
//! αᵢ = 3/hᵢ (aᵢ₊₁ - aᵢ) - 3/hᵢ₋₁ (aᵢ - aᵢ₋₁)           i = 1..N-1
//! tridiagonal sweep for cᵢ with c₀ = c_N = 0           (natural boundary)
//! bᵢ = (aᵢ₊₁ - aᵢ)/hᵢ - hᵢ (cᵢ₊₁ + 2cᵢ)/3
//! dᵢ = (cᵢ₊₁ - cᵢ) / (3hᵢ)
//! Sᵢ(x) = aᵢ + bᵢ t + cᵢ t² + dᵢ t³,  t = x - xᵢ
//! ```

use crate::domain::Point;
use crate::error::FitError;
use crate::fit::registry::absent_if_recoverable;
use crate::models::{CubicPiece, Curve, LinearPiece, Piecewise};

fn sorted_by_x(points: &[Point]) -> Result<Vec<Point>, FitError> {
    if points.len() < 2 {
        return Err(FitError::degenerate(format!(
            "need at least 2 points, got {}",
            points.len()
        )));
    }
    if let Some(p) = points.iter().find(|p| !p.x.is_finite()) {
        return Err(FitError::degenerate(format!("non-finite x value {}", p.x)));
    }
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));
    Ok(sorted)
}

/// Piecewise linear interpolant through the points.
///
/// Two points sharing an x-value produce a segment with `a = x`, `b = NaN`.
/// That interval is empty, so [`Piecewise::evaluate`] never selects it, but
/// evaluating the segment directly yields `NaN`.
pub fn try_fit_linear_spline(points: &[Point]) -> Result<Piecewise<LinearPiece>, FitError> {
    let sorted = sorted_by_x(points)?;

    let pieces = sorted
        .windows(2)
        .map(|w| {
            let (p, q) = (w[0], w[1]);
            if p.x == q.x {
                LinearPiece { a: p.x, b: f64::NAN }
            } else {
                let b = (q.y - p.y) / (q.x - p.x);
                LinearPiece { a: p.y - b * p.x, b }
            }
        })
        .collect();

    Piecewise::new(sorted.iter().map(|p| p.x).collect(), pieces)
}

/// Natural cubic spline through the points.
///
/// # Errors
/// [`FitError::DegenerateSpline`] for fewer than 2 points, repeated x-values,
/// or coefficients that do not come out finite.
pub fn try_fit_cubic_spline(points: &[Point]) -> Result<Piecewise<CubicPiece>, FitError> {
    let sorted = sorted_by_x(points)?;
    let x: Vec<f64> = sorted.iter().map(|p| p.x).collect();
    let a: Vec<f64> = sorted.iter().map(|p| p.y).collect();
    let n = x.len() - 1;

    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    if let Some(i) = h.iter().position(|&hi| hi == 0.0) {
        return Err(FitError::degenerate(format!(
            "repeated x value {} at knots {} and {}",
            x[i],
            i,
            i + 1
        )));
    }

    let mut alpha = vec![0.0; n];
    for i in 1..n {
        alpha[i] = 3.0 / h[i] * (a[i + 1] - a[i]) - 3.0 / h[i - 1] * (a[i] - a[i - 1]);
    }

    // Forward sweep. l[0] = 1, u[0] = 0, z[0] = 0 pin c[0] to zero.
    let mut l = vec![1.0; n + 1];
    let mut u = vec![0.0; n + 1];
    let mut z = vec![0.0; n + 1];
    for i in 1..n {
        l[i] = 2.0 * (x[i + 1] - x[i - 1]) - h[i - 1] * u[i - 1];
        u[i] = h[i] / l[i];
        z[i] = (alpha[i] - h[i - 1] * z[i - 1]) / l[i];
    }

    let mut c = vec![0.0; n + 1];
    let mut pieces = vec![
        CubicPiece {
            x0: 0.0,
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
        };
        n
    ];
    for j in (0..n).rev() {
        c[j] = z[j] - u[j] * c[j + 1];
        let b = (a[j + 1] - a[j]) / h[j] - h[j] * (c[j + 1] + 2.0 * c[j]) / 3.0;
        let d = (c[j + 1] - c[j]) / (3.0 * h[j]);
        pieces[j] = CubicPiece {
            x0: x[j],
            a: a[j],
            b,
            c: c[j],
            d,
        };
    }

    if let Some(i) = pieces
        .iter()
        .position(|p| ![p.a, p.b, p.c, p.d].iter().all(|v| v.is_finite()))
    {
        return Err(FitError::degenerate(format!(
            "non-finite coefficients on interval {i}"
        )));
    }

    Piecewise::new(x, pieces)
}

/// Linear spline as a [`Curve`]; `Ok(None)` for fewer than 2 points.
pub fn fit_linear_spline(points: &[Point]) -> Result<Option<Curve>, FitError> {
    let result = try_fit_linear_spline(points).map(Curve::PiecewiseLinear);
    absent_if_recoverable(result, || "linear spline".to_string(), points.len())
}

/// Natural cubic spline as a [`Curve`]; `Ok(None)` when the points are degenerate.
pub fn fit_cubic_spline(points: &[Point]) -> Result<Option<Curve>, FitError> {
    let result = try_fit_cubic_spline(points).map(Curve::PiecewiseCubic);
    absent_if_recoverable(result, || "cubic spline".to_string(), points.len())
}
