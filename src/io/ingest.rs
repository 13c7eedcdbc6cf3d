//! Point file ingest and validation.
//!
//! Two formats are accepted:
//! - CSV with `x` and `y` columns (any order, case-insensitive, extra columns
//!   ignored)
//! - JSON: an array of `{ "x": .., "y": .. }` objects
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **No fitting logic here**

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{Point, PointStats, compute_stats};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based line for CSV, 1-based array position for JSON.
    pub line: usize,
    pub message: String,
}

/// Ingest output: usable points + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedPoints {
    pub points: Vec<Point>,
    pub stats: PointStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PointFormat {
    Csv,
    Json,
}

pub(crate) fn format_of(path: &Path) -> Option<PointFormat> {
    let ext = path.extension()?.to_str()?;
    if ext.eq_ignore_ascii_case("csv") {
        Some(PointFormat::Csv)
    } else if ext.eq_ignore_ascii_case("json") {
        Some(PointFormat::Json)
    } else {
        None
    }
}

/// `true` for file names `load_points` knows how to read.
pub fn is_point_file(path: &Path) -> bool {
    format_of(path).is_some()
}

/// Load points from a `.csv` or `.json` file.
pub fn load_points(path: &Path) -> Result<IngestedPoints, AppError> {
    let format = format_of(path).ok_or_else(|| {
        AppError::new(
            2,
            format!("Unsupported point file '{}': expected .csv or .json", path.display()),
        )
    })?;
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open '{}': {e}", path.display())))?;

    match format {
        PointFormat::Csv => read_points_csv(file),
        PointFormat::Json => read_points_json(file),
    }
}

/// Read points from CSV with an `x` and a `y` column.
pub fn read_points_csv<R: Read>(reader: R) -> Result<IngestedPoints, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);
    for name in ["x", "y"] {
        if !header_map.contains_key(name) {
            return Err(AppError::new(2, format!("Missing required column: `{name}`")));
        }
    }

    let mut points = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header, lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let parsed = result
            .map_err(|e| format!("CSV parse error: {e}"))
            .and_then(|record| parse_row(&record, &header_map));
        match parsed {
            Ok(point) => points.push(point),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    finish(points, row_errors, rows_read)
}

/// Read points from a JSON array of `{ "x", "y" }` objects.
pub fn read_points_json<R: Read>(reader: R) -> Result<IngestedPoints, AppError> {
    let rows: Vec<serde_json::Value> = serde_json::from_reader(reader)
        .map_err(|e| AppError::new(2, format!("Invalid point JSON (expected an array of {{x, y}}): {e}")))?;

    let mut points = Vec::new();
    let mut row_errors = Vec::new();
    let rows_read = rows.len();

    for (idx, value) in rows.into_iter().enumerate() {
        let parsed = serde_json::from_value::<Point>(value)
            .map_err(|e| format!("Invalid point: {e}"))
            .and_then(check_finite);
        match parsed {
            Ok(point) => points.push(point),
            Err(message) => row_errors.push(RowError { line: idx + 1, message }),
        }
    }

    finish(points, row_errors, rows_read)
}

fn finish(points: Vec<Point>, row_errors: Vec<RowError>, rows_read: usize) -> Result<IngestedPoints, AppError> {
    let stats = compute_stats(&points)
        .ok_or_else(|| AppError::new(3, "No valid points found in the input file."))?;
    Ok(IngestedPoints {
        rows_used: points.len(),
        points,
        stats,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often put a BOM in front of the first header.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<Point, String> {
    let x = parse_f64(get_required(record, header_map, "x")?, "x")?;
    let y = parse_f64(get_required(record, header_map, "y")?, "y")?;
    check_finite(Point::new(x, y))
}

fn check_finite(p: Point) -> Result<Point, String> {
    if p.x.is_finite() && p.y.is_finite() {
        Ok(p)
    } else {
        Err(format!("Non-finite coordinate ({}, {}).", p.x, p.y))
    }
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn parse_f64(s: &str, name: &str) -> Result<f64, String> {
    s.parse::<f64>()
        .map_err(|_| format!("Invalid `{name}` value '{s}'."))
}
