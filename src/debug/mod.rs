//! Debug bundle writer for inspecting a canvas and every algorithm's fit.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::{FitId, Point, compute_stats};
use crate::error::AppError;
use crate::models::Curve;
use crate::report::compare_all;

/// Rows in the curve grid section.
const GRID_ROWS: usize = 11;

/// Write `sketchfit_debug_<timestamp>.md` under `dir` and return its path.
pub fn write_debug_bundle(dir: &Path, points: &[Point], active: FitId) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("sketchfit_debug_{ts}.md"));

    let mut file = File::create(&path)
        .map_err(|e| AppError::new(4, format!("Failed to create debug file: {e}")))?;
    write_debug_report(&mut file, points, active)?;

    log::debug!("wrote debug bundle {}", path.display());
    Ok(path)
}

/// Write the bundle body as markdown.
pub fn write_debug_report<W: Write>(out: &mut W, points: &[Point], active: FitId) -> Result<(), AppError> {
    let io_err = |e: std::io::Error| AppError::new(4, format!("Failed to write debug: {e}"));

    writeln!(out, "# sketchfit debug bundle").map_err(io_err)?;
    writeln!(out, "- generated: {}", Local::now().to_rfc3339()).map_err(io_err)?;
    writeln!(out, "- active: {} ({})", active, active.display_name()).map_err(io_err)?;
    writeln!(out, "- points: {}", points.len()).map_err(io_err)?;
    if let Some(s) = compute_stats(points) {
        writeln!(
            out,
            "- range: x=[{:.6}, {:.6}] y=[{:.6}, {:.6}]",
            s.x_min, s.x_max, s.y_min, s.y_max
        )
        .map_err(io_err)?;
    }

    writeln!(out, "\n## Points").map_err(io_err)?;
    writeln!(out, "| # | x | y |").map_err(io_err)?;
    writeln!(out, "| - | - | - |").map_err(io_err)?;
    for (i, p) in points.iter().enumerate() {
        writeln!(out, "| {} | {:.6} | {:.6} |", i + 1, p.x, p.y).map_err(io_err)?;
    }

    let cmp = compare_all(points);

    writeln!(out, "\n## Fits").map_err(io_err)?;
    writeln!(out, "| id | name | k | scored | sse | rmse | bic | parameters |").map_err(io_err)?;
    writeln!(out, "| - | - | - | - | - | - | - | - |").map_err(io_err)?;
    for row in &cmp.rows {
        writeln!(
            out,
            "| {} | {} | {} | {} | {:.6} | {:.6} | {} | {} |",
            row.fit_id,
            row.fit_id.display_name(),
            row.parameter_count,
            row.quality.n_scored,
            row.quality.sse,
            row.quality.rmse,
            fmt_opt(row.bic),
            fmt_params(&row.curve)
        )
        .map_err(io_err)?;
    }
    for (id, reason) in &cmp.skipped {
        writeln!(out, "- skipped {id}: {reason}").map_err(io_err)?;
    }

    let Some(stats) = compute_stats(points) else {
        return Ok(());
    };

    writeln!(out, "\n## Curve grid").map_err(io_err)?;
    let header: Vec<String> = cmp.rows.iter().map(|r| r.fit_id.to_string()).collect();
    writeln!(out, "| x | {} |", header.join(" | ")).map_err(io_err)?;
    writeln!(out, "|{}", " - |".repeat(header.len() + 1)).map_err(io_err)?;

    for i in 0..GRID_ROWS {
        let u = i as f64 / (GRID_ROWS as f64 - 1.0);
        let x = stats.x_min + u * (stats.x_max - stats.x_min);
        let cells: Vec<String> = cmp
            .rows
            .iter()
            .map(|r| fmt_opt(r.curve.covers(x).then(|| r.curve.evaluate(x))))
            .collect();
        writeln!(out, "| {x:.4} | {} |", cells.join(" | ")).map_err(io_err)?;
    }

    Ok(())
}

fn fmt_params(curve: &Curve) -> String {
    match curve {
        Curve::Polynomial(p) if p.is_unscaled() => fmt_vec(p.coefficients()),
        Curve::Polynomial(p) => format!(
            "{} in t = (x - {:.6}) / {:.6}",
            fmt_vec(p.coefficients()),
            p.shift(),
            p.scale()
        ),
        Curve::PiecewiseLinear(g) => format!("{} linear segments", g.pieces().len()),
        Curve::PiecewiseCubic(g) => format!("{} cubic segments", g.pieces().len()),
    }
}

fn fmt_vec(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.3}"),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_covers_points_fits_and_grid() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)];
        let mut buf = Vec::new();
        write_debug_report(&mut buf, &points, FitId::CubicSpline).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("# sketchfit debug bundle\n"));
        assert!(text.contains("- active: spline+3 (Cubic spline)"));
        assert!(text.contains("| 3 | 2.000000 | 0.000000 |"));
        assert!(text.contains("| regression+2 | Quadratic regression | 3 | 3 |"));
        assert!(text.contains("- skipped regression+3: too few points"));
        assert!(text.contains("| x | regression+1 | regression+2 | spline+1 | spline+3 |"));
        // The splines are undefined at the last knot.
        let last = text.lines().last().unwrap();
        assert!(last.starts_with("| 2.0000 |"));
        assert!(last.ends_with("| - | - |"));
    }

    #[test]
    fn empty_canvas_still_writes_a_report() {
        let mut buf = Vec::new();
        write_debug_report(&mut buf, &[], FitId::LinearSpline).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("- points: 0"));
        assert!(text.contains("- skipped spline+1:"));
        assert!(!text.contains("## Curve grid"));
    }

    #[test]
    fn bundle_file_is_timestamped() {
        let dir = std::env::temp_dir().join(format!("sketchfit-debug-{}", std::process::id()));
        let path = write_debug_bundle(&dir, &[Point::new(1.0, 1.0)], FitId::LinearSpline).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("sketchfit_debug_") && name.ends_with(".md"));
        let _ = std::fs::remove_file(&path);
    }
}
