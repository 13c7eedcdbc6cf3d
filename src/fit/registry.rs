//! Algorithm registry: identifier → fitting routine.
//!
//! The set of algorithms is closed ([`CATALOG`]), and dispatch is an
//! exhaustive `match` on [`FitId`]. Identifiers outside the catalog are
//! rejected at parse time, never rounded to a neighbour.

use crate::domain::{FitId, Point};
use crate::error::FitError;
use crate::fit::regression::try_fit_regression;
use crate::fit::spline::{try_fit_cubic_spline, try_fit_linear_spline};
use crate::models::Curve;

/// Every algorithm a user can pick, in picker order.
pub const CATALOG: &[FitId] = &FitId::ALL;

/// Parse a textual identifier such as `regression+3` or `spline+1`.
pub fn lookup(id: &str) -> Result<FitId, FitError> {
    id.parse()
}

/// Look up `id` and fit it to `points`.
pub fn fit(id: &str, points: &[Point]) -> Result<Option<Curve>, FitError> {
    lookup(id)?.fit(points)
}

impl FitId {
    /// Fit this algorithm, keeping the reason when no curve results.
    pub fn try_fit(self, points: &[Point]) -> Result<Curve, FitError> {
        match self {
            FitId::Regression(degree) => {
                try_fit_regression(points, degree.get()).map(Curve::Polynomial)
            }
            FitId::LinearSpline => try_fit_linear_spline(points).map(Curve::PiecewiseLinear),
            FitId::CubicSpline => try_fit_cubic_spline(points).map(Curve::PiecewiseCubic),
        }
    }

    /// Fit this algorithm. `Ok(None)` means the points cannot support it.
    pub fn fit(self, points: &[Point]) -> Result<Option<Curve>, FitError> {
        absent_if_recoverable(self.try_fit(points), || self.to_string(), points.len())
    }
}

/// Turn data-driven failures into absence, logging why.
pub(crate) fn absent_if_recoverable<T>(
    result: Result<T, FitError>,
    what: impl FnOnce() -> String,
    n_points: usize,
) -> Result<Option<T>, FitError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_recoverable() => {
            log::debug!("{}: no curve for {n_points} points: {err}", what());
            Ok(None)
        }
        Err(err) => {
            log::warn!("{}: {err}", what());
            Err(err)
        }
    }
}
