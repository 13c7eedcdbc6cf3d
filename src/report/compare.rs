//! Fit every catalogued algorithm and rank the regressions by BIC.
//!
//! - SSE / RMSE for every curve that could be built
//! - BIC = n·ln(SSE/n) + k·ln(n) for regression rows
//! - skipped algorithms keep the reason they produced no curve
//!
//! BIC is only reported when there are more scored points than parameters;
//! an interpolating polynomial would otherwise always look best.

use rayon::prelude::*;

use crate::domain::{Family, FitId, FitQuality, Point};
use crate::fit::CATALOG;
use crate::models::Curve;
use crate::report::{bic, compute_quality, compute_residuals};

/// One fitted algorithm.
#[derive(Debug, Clone)]
pub struct ComparisonRow {
    pub fit_id: FitId,
    pub curve: Curve,
    pub quality: FitQuality,
    pub parameter_count: usize,
    pub bic: Option<f64>,
}

/// Output of [`compare_all`].
#[derive(Debug, Clone)]
pub struct Comparison {
    pub n_points: usize,
    /// Rows in catalog order.
    pub rows: Vec<ComparisonRow>,
    /// Algorithms that produced no curve, and why.
    pub skipped: Vec<(FitId, String)>,
}

impl Comparison {
    /// Regression row with the lowest BIC.
    pub fn best_regression(&self) -> Option<&ComparisonRow> {
        self.rows
            .iter()
            .filter(|r| r.fit_id.family() == Family::Regression)
            .filter_map(|r| r.bic.map(|b| (r, b)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(r, _)| r)
    }
}

/// Fit every catalog entry (in parallel) and score it.
pub fn compare_all(points: &[Point]) -> Comparison {
    let outcomes: Vec<(FitId, Result<Curve, String>)> = CATALOG
        .par_iter()
        .map(|&id| (id, id.try_fit(points).map_err(|e| e.to_string())))
        .collect();

    let mut rows = Vec::new();
    let mut skipped = Vec::new();
    for (fit_id, outcome) in outcomes {
        match outcome {
            Ok(curve) => rows.push(score(fit_id, curve, points)),
            Err(reason) => {
                log::debug!("compare: {fit_id} skipped: {reason}");
                skipped.push((fit_id, reason));
            }
        }
    }

    Comparison {
        n_points: points.len(),
        rows,
        skipped,
    }
}

fn score(fit_id: FitId, curve: Curve, points: &[Point]) -> ComparisonRow {
    let quality = compute_quality(points.len(), &compute_residuals(points, &curve));
    let k = curve.parameter_count();
    let scored_bic = (fit_id.family() == Family::Regression && quality.n_scored > k)
        .then(|| bic(quality.n_scored, quality.sse, k));
    ComparisonRow {
        fit_id,
        curve,
        quality,
        parameter_count: k,
        bic: scored_bic,
    }
}
