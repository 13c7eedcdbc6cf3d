//! Shared "fit pipeline" logic used by the CLI front-end.
//!
//! load points -> fit the requested algorithm -> residuals -> quality
//!
//! The TUI refits in-memory canvases through [`fit_points`] without touching
//! the filesystem.

use crate::domain::{FitConfig, FitId, FitQuality, Point, PointResidual};
use crate::error::AppError;
use crate::io::{IngestedPoints, load_points};
use crate::models::Curve;
use crate::report::{compute_quality, compute_residuals};

/// A fitted curve with its per-point diagnostics.
#[derive(Debug, Clone)]
pub struct FitOutcome {
    pub fit_id: FitId,
    pub curve: Curve,
    pub residuals: Vec<PointResidual>,
    pub quality: FitQuality,
}

/// All computed outputs of a single `sketchfit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedPoints,
    pub outcome: FitOutcome,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let ingest = load_points(&config.points_path)?;
    if !ingest.row_errors.is_empty() {
        log::warn!(
            "{}: skipped {} of {} rows",
            config.points_path.display(),
            ingest.row_errors.len(),
            ingest.rows_read
        );
    }

    let outcome = fit_points(config.fit_id, &ingest.points)?;
    Ok(RunOutput { ingest, outcome })
}

/// Fit one algorithm to `points`.
///
/// An absent fit is an error here (exit code 3) carrying the reason, since
/// the CLI has nothing to report without a curve.
pub fn fit_points(fit_id: FitId, points: &[Point]) -> Result<FitOutcome, AppError> {
    let curve = fit_id.try_fit(points).map_err(|err| {
        if err.is_recoverable() {
            AppError::new(
                3,
                format!("{} produced no curve for {} point(s): {err}", fit_id.display_name(), points.len()),
            )
        } else {
            AppError::from(err)
        }
    })?;

    let residuals = compute_residuals(points, &curve);
    let quality = compute_quality(points.len(), &residuals);

    Ok(FitOutcome {
        fit_id,
        curve,
        residuals,
        quality,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fit_is_a_no_data_error() {
        let err = fit_points(FitId::CubicSpline, &[Point::new(3.0, 3.0)]).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("Cubic spline"));
    }

    #[test]
    fn outcome_scores_covered_points() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 2.0), Point::new(2.0, 1.0)];
        let out = fit_points(FitId::LinearSpline, &points).unwrap();
        // The last knot is outside the half-open domain.
        assert_eq!(out.quality.n_points, 3);
        assert_eq!(out.quality.n_scored, 2);
        assert_eq!(out.quality.sse, 0.0);
    }
}
