//! Exports: the canvas points (CSV or JSON) and per-point residuals (CSV).
//!
//! Both are meant to be easy to consume in spreadsheets or downstream scripts,
//! and the points file can be loaded back with `--points`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{FitId, Point, PointResidual};
use crate::error::AppError;
use crate::io::ingest::{PointFormat, format_of};

/// Write points in the format named by the file extension (`.csv` or `.json`).
pub fn write_points(path: &Path, points: &[Point]) -> Result<(), AppError> {
    match format_of(path) {
        Some(PointFormat::Csv) => write_points_csv(path, points),
        Some(PointFormat::Json) => write_points_json(path, points),
        None => Err(AppError::new(
            2,
            format!("Unsupported point file '{}': expected .csv or .json", path.display()),
        )),
    }
}

/// Write points as an `x,y` CSV.
pub fn write_points_csv(path: &Path, points: &[Point]) -> Result<(), AppError> {
    create_parent_dir(path)?;
    // Header written by hand so an empty canvas still saves a loadable file.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| AppError::new(4, format!("Failed to create points CSV '{}': {e}", path.display())))?;
    writer
        .write_record(["x", "y"])
        .map_err(|e| AppError::new(4, format!("Failed to write points CSV header: {e}")))?;
    for p in points {
        writer
            .serialize(p)
            .map_err(|e| AppError::new(4, format!("Failed to write points CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to write points CSV: {e}")))?;
    Ok(())
}

/// Write points as a JSON array of `{ "x": .., "y": .. }` objects.
pub fn write_points_json(path: &Path, points: &[Point]) -> Result<(), AppError> {
    create_parent_dir(path)?;
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create points JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, points)
        .map_err(|e| AppError::new(4, format!("Failed to write points JSON: {e}")))?;
    Ok(())
}

/// Write per-point results to a CSV file.
pub fn write_residuals_csv(path: &Path, residuals: &[PointResidual], fit_id: FitId) -> Result<(), AppError> {
    create_parent_dir(path)?;
    let mut file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "fit_id,x,y,y_fit,residual")
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV header: {e}")))?;

    for r in residuals {
        writeln!(
            file,
            "{},{},{},{:.10},{:.10}",
            fit_id, r.point.x, r.point.y, r.y_fit, r.residual,
        )
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

pub(crate) fn create_parent_dir(path: &Path) -> Result<(), AppError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
            .map_err(|e| AppError::new(4, format!("Failed to create directory '{}': {e}", dir.display()))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::load_points;

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("sketchfit-export-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn saved_points_load_back() {
        let path = scratch("canvas.csv");
        let points = vec![Point::new(-1.0, 0.5), Point::new(2.25, -3.0)];
        write_points_csv(&path, &points).unwrap();

        let data = load_points(&path).unwrap();
        assert_eq!(data.points, points);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn empty_canvas_saves_a_header_only_file() {
        for name in ["empty.csv", "empty.json"] {
            let path = scratch(name);
            write_points(&path, &[]).unwrap();
            assert!(std::fs::metadata(&path).unwrap().len() > 0, "{name}");

            let err = load_points(&path).unwrap_err();
            assert_eq!(err.exit_code(), 3, "{name}");
            let _ = std::fs::remove_file(&path);
        }
        let text = {
            let path = scratch("header.csv");
            write_points_csv(&path, &[]).unwrap();
            let text = std::fs::read_to_string(&path).unwrap();
            let _ = std::fs::remove_file(&path);
            text
        };
        assert_eq!(text, "x,y\n");
    }

    #[test]
    fn json_points_load_back_and_unknown_extensions_fail() {
        let path = scratch("canvas.json");
        let points = vec![Point::new(0.0, 1.0), Point::new(3.0, 4.5)];
        write_points(&path, &points).unwrap();
        assert_eq!(load_points(&path).unwrap().points, points);
        let _ = std::fs::remove_file(&path);

        let err = write_points(&scratch("canvas.txt"), &points).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn residual_export_has_one_row_per_point() {
        let path = scratch("residuals.csv");
        let residuals = vec![PointResidual {
            point: Point::new(1.0, 2.0),
            y_fit: 1.5,
            residual: 0.5,
        }];
        write_residuals_csv(&path, &residuals, FitId::CubicSpline).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "fit_id,x,y,y_fit,residual");
        assert_eq!(lines[1], "spline+3,1,2,1.5000000000,0.5000000000");
        let _ = std::fs::remove_file(&path);
    }
}
