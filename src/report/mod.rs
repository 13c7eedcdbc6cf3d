//! Reporting utilities: residuals, fit quality, comparisons, and formatted
//! terminal output.

pub mod compare;
pub mod format;

pub use compare::*;
pub use format::*;

use crate::domain::{FitQuality, Point, PointResidual};
use crate::models::Curve;

/// Fitted values and residuals for the points the curve covers.
///
/// Points outside a spline's domain (including its right-most knot) and points
/// where the curve is not finite are left out.
pub fn compute_residuals(points: &[Point], curve: &Curve) -> Vec<PointResidual> {
    points
        .iter()
        .filter(|p| curve.covers(p.x))
        .filter_map(|&point| {
            let y_fit = curve.evaluate(point.x);
            y_fit.is_finite().then(|| PointResidual {
                point,
                y_fit,
                residual: point.y - y_fit,
            })
        })
        .collect()
}

/// SSE / RMSE / max |residual| over the scored points.
pub fn compute_quality(n_points: usize, residuals: &[PointResidual]) -> FitQuality {
    let n_scored = residuals.len();
    let sse: f64 = residuals.iter().map(|r| r.residual * r.residual).sum();
    let rmse = if n_scored == 0 {
        0.0
    } else {
        (sse / n_scored as f64).sqrt()
    };
    let max_abs = residuals.iter().map(|r| r.residual.abs()).fold(0.0, f64::max);

    FitQuality {
        n_points,
        n_scored,
        sse,
        rmse,
        max_abs,
    }
}

/// BIC = n·ln(SSE/n) + k·ln(n).
///
/// An exact fit would give `ln(0)`; the mean squared error is floored at
/// `1e-300` so the score stays finite and still ranks exact fits first.
pub fn bic(n: usize, sse: f64, k: usize) -> f64 {
    let n_f = n as f64;
    let mse = (sse / n_f).max(1e-300);
    n_f * mse.ln() + (k as f64) * n_f.ln()
}
