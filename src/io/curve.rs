//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a fitted curve:
//! - the fit identifier and the serialized model (coefficients or segments)
//! - fit quality on the points it was built from
//! - a precomputed grid for quick plotting
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{CurveFile, CurveGrid, FitId, Point, compute_stats};
use crate::error::AppError;
use crate::io::export::create_parent_dir;
use crate::models::Curve;
use crate::report::{compute_quality, compute_residuals};

/// Build the curve file contents for a fit.
pub fn build_curve_file(fit_id: FitId, curve: &Curve, points: &[Point], grid_n: usize) -> CurveFile {
    let quality = compute_quality(points.len(), &compute_residuals(points, curve));
    let (x0, x1) = compute_stats(points)
        .map(|s| (s.x_min, s.x_max))
        .unwrap_or((-5.0, 5.0));

    CurveFile {
        tool: "sketchfit".to_string(),
        fit_id,
        model: curve.clone(),
        fit_quality: quality,
        grid: build_grid(curve, x0, x1, grid_n),
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(
    path: &Path,
    fit_id: FitId,
    curve: &Curve,
    points: &[Point],
    grid_n: usize,
) -> Result<(), AppError> {
    create_parent_dir(path)?;
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    let contents = build_curve_file(fit_id, curve, points, grid_n);
    serde_json::to_writer_pretty(file, &contents)
        .map_err(|e| AppError::new(4, format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}

/// Evenly spaced samples over `[x0, x1]`, keeping only x-values the curve covers.
///
/// A spline is undefined at its right-most knot, so its grid stops one step short.
fn build_grid(curve: &Curve, x0: f64, x1: f64, n: usize) -> CurveGrid {
    let n = n.max(2);
    let (x0, x1) = if x1 > x0 { (x0, x1) } else { (x0 - 1.0, x1 + 1.0) };

    let mut grid = CurveGrid {
        x: Vec::with_capacity(n),
        y: Vec::with_capacity(n),
    };
    for i in 0..n {
        let x = x0 + (x1 - x0) * (i as f64 / (n as f64 - 1.0));
        let y = curve.evaluate(x);
        if curve.covers(x) && y.is_finite() {
            grid.x.push(x);
            grid.y.push(y);
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_file_round_trips_through_disk() {
        let points = vec![Point::new(0.0, 1.0), Point::new(1.0, 3.0), Point::new(3.0, 2.0)];
        let curve = FitId::CubicSpline.fit(&points).unwrap().unwrap();
        let path = std::env::temp_dir()
            .join(format!("sketchfit-curve-{}", std::process::id()))
            .join("curve.json");

        write_curve_json(&path, FitId::CubicSpline, &curve, &points, 31).unwrap();
        let back = read_curve_json(&path).unwrap();

        assert_eq!(back.tool, "sketchfit");
        assert_eq!(back.fit_id, FitId::CubicSpline);
        assert_eq!(back.model, curve);
        assert_eq!(back.fit_quality.n_scored, 2);
        // The right-most knot is not covered by the spline.
        assert_eq!(back.grid.x.len(), 30);
        assert_eq!(back.grid.x[0], 0.0);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn regression_grid_covers_the_closed_range() {
        let points = vec![Point::new(-1.0, 1.0), Point::new(1.0, 1.0), Point::new(0.0, 0.0)];
        let id: FitId = "regression+2".parse().unwrap();
        let curve = id.fit(&points).unwrap().unwrap();
        let file = build_curve_file(id, &curve, &points, 5);
        assert_eq!(file.grid.x, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        approx::assert_abs_diff_eq!(file.grid.y[1], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn missing_curve_file_is_a_usage_error() {
        let err = read_curve_json(Path::new("definitely/not/here.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
