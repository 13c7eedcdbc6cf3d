//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the fitting code stays clean and testable
//! - output changes are localized

use crate::domain::{FitId, FitQuality, Point, PointResidual, compute_stats};
use crate::models::{CubicPiece, Curve, LinearPiece, Piecewise, Polynomial};
use crate::report::Comparison;

/// Segments listed in a summary before the rest is elided.
const MAX_LISTED_SEGMENTS: usize = 12;

/// Format the fit summary (data ranges + quality + model parameters).
pub fn format_fit_summary(points: &[Point], fit_id: FitId, curve: &Curve, quality: &FitQuality) -> String {
    let mut out = String::new();

    out.push_str("=== sketchfit ===\n");
    out.push_str(&format!("Algorithm: {} ({fit_id})\n", fit_id.display_name()));
    if let Some(stats) = compute_stats(points) {
        out.push_str(&format!(
            "Points: n={} | x=[{:.4}, {:.4}] | y=[{:.4}, {:.4}]\n",
            stats.n_points, stats.x_min, stats.x_max, stats.y_min, stats.y_max
        ));
    }
    out.push_str(&format!(
        "Fit: scored={}/{} SSE={:.6} RMSE={:.6} max|r|={:.6}\n",
        quality.n_scored, quality.n_points, quality.sse, quality.rmse, quality.max_abs
    ));
    if let Some((lo, hi)) = curve.clip_domain() {
        out.push_str(&format!("Domain: [{lo:.4}, {hi:.4})\n"));
    }

    out.push_str("\nModel:\n");
    match curve {
        Curve::Polynomial(p) => out.push_str(&format_polynomial(p)),
        Curve::PiecewiseLinear(g) => out.push_str(&format_linear_segments(g)),
        Curve::PiecewiseCubic(g) => out.push_str(&format_cubic_segments(g)),
    }
    out.push('\n');

    out
}

fn format_polynomial(p: &Polynomial) -> String {
    let mut out = String::new();
    let var = if p.is_unscaled() {
        "x"
    } else {
        out.push_str(&format!("  t = (x - {:.6}) / {:.6}\n", p.shift(), p.scale()));
        "t"
    };
    for (power, c) in p.terms() {
        let term = match power {
            0 => "1".to_string(),
            1 => var.to_string(),
            _ => format!("{var}^{power}"),
        };
        out.push_str(&format!("  {term:<5} {c:>16.8}\n"));
    }
    out
}

fn format_linear_segments(g: &Piecewise<LinearPiece>) -> String {
    format_segments(g.breakpoints(), g.pieces(), |p| {
        format!("{:.6} + {:.6}·x", p.a, p.b)
    })
}

fn format_cubic_segments(g: &Piecewise<CubicPiece>) -> String {
    format_segments(g.breakpoints(), g.pieces(), |p| {
        format!("a={:.6} b={:.6} c={:.6} d={:.6}", p.a, p.b, p.c, p.d)
    })
}

fn format_segments<S>(breakpoints: &[f64], pieces: &[S], describe: impl Fn(&S) -> String) -> String {
    let mut out = String::new();
    for (i, piece) in pieces.iter().enumerate().take(MAX_LISTED_SEGMENTS) {
        out.push_str(&format!(
            "  [{:.4}, {:.4})  {}\n",
            breakpoints[i],
            breakpoints[i + 1],
            describe(piece)
        ));
    }
    if pieces.len() > MAX_LISTED_SEGMENTS {
        out.push_str(&format!("  ... {} more segments\n", pieces.len() - MAX_LISTED_SEGMENTS));
    }
    out
}

/// Format the comparison table; `*` marks the regression with the lowest BIC.
pub fn format_comparison(cmp: &Comparison) -> String {
    let mut out = String::new();
    let best = cmp.best_regression().map(|r| r.fit_id);

    out.push_str(&format!("Compared {} algorithms on n={} points:\n", cmp.rows.len() + cmp.skipped.len(), cmp.n_points));
    out.push_str(
        format!(
            "  {:<14} {:<20} {:>3} {:>6} {:>14} {:>14} {:>12}\n",
            "id", "name", "k", "scored", "SSE", "RMSE", "BIC"
        )
        .trim_end(),
    );
    out.push('\n');
    for row in &cmp.rows {
        let mark = if Some(row.fit_id) == best { "*" } else { " " };
        let bic = row.bic.map(|b| format!("{b:.3}")).unwrap_or_else(|| "-".to_string());
        out.push_str(
            format!(
                "{mark} {:<14} {:<20} {:>3} {:>6} {:>14.6} {:>14.6} {:>12}\n",
                row.fit_id.to_string(),
                row.fit_id.display_name(),
                row.parameter_count,
                row.quality.n_scored,
                row.quality.sse,
                row.quality.rmse,
                bic,
            )
            .trim_end(),
        );
        out.push('\n');
    }
    for (id, reason) in &cmp.skipped {
        out.push_str(&format!("  (skipped {id}) {reason}\n"));
    }

    out
}

/// Format the largest residuals, by absolute value.
pub fn format_residuals(residuals: &[PointResidual], top_n: usize) -> String {
    let mut sorted = residuals.to_vec();
    sorted.sort_by(|a, b| b.residual.abs().total_cmp(&a.residual.abs()));

    let mut out = String::new();
    out.push_str(&format!("{:>12} {:>12} {:>12} {:>12}\n", "x", "y", "y_fit", "residual"));
    out.push_str(&format!("{:-<12} {:-<12} {:-<12} {:-<12}\n", "", "", "", ""));
    for r in sorted.iter().take(top_n) {
        out.push_str(&format!(
            "{:>12.4} {:>12.4} {:>12.4} {:>12.4}\n",
            r.point.x, r.point.y, r.y_fit, r.residual
        ));
    }
    out
}
