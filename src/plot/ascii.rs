//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - data points: `o`
//! - fitted curve: `-` line

use crate::domain::{CurveFile, Point, compute_stats};
use crate::models::Curve;
use crate::plot::sample_curve;

/// Render points and (optionally) a fitted curve over the data's x-range.
pub fn render_ascii_plot(points: &[Point], curve: Option<&Curve>, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = compute_stats(points)
        .map(|s| widen_if_flat(s.x_min, s.x_max))
        .unwrap_or((-5.0, 5.0));
    let runs = curve
        .map(|c| sample_curve(c, (x_min, x_max), width))
        .unwrap_or_default();

    render_plot(points, &runs, x_min, x_max, width, height)
}

/// Render a plot from a saved curve JSON file (curve grid only).
pub fn render_ascii_plot_from_curve_file(curve: &CurveFile, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let run: Vec<(f64, f64)> = curve
        .grid
        .x
        .iter()
        .zip(curve.grid.y.iter())
        .map(|(&x, &y)| (x, y))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    let (x_min, x_max) = x_range(&run).unwrap_or((-5.0, 5.0));

    render_plot(&[], &[run], x_min, x_max, width, height)
}

fn render_plot(
    points: &[Point],
    runs: &[Vec<(f64, f64)>],
    x_min: f64,
    x_max: f64,
    width: usize,
    height: usize,
) -> String {
    // Determine y-range from points and curve samples.
    let (y_min, y_max) = y_range(points, runs).unwrap_or((-1.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curve first (so points can overlay).
    for run in runs {
        draw_curve(&mut grid, run, x_min, x_max, y_min, y_max);
    }

    for p in points {
        let x = map_x(p.x, x_min, x_max, width);
        let y = map_y(p.y, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn widen_if_flat(min: f64, max: f64) -> (f64, f64) {
    if max > min { (min, max) } else { (min - 1.0, max + 1.0) }
}

fn x_range(samples: &[(f64, f64)]) -> Option<(f64, f64)> {
    let min_x = samples.iter().map(|s| s.0).fold(f64::INFINITY, f64::min);
    let max_x = samples.iter().map(|s| s.0).fold(f64::NEG_INFINITY, f64::max);
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(points: &[Point], runs: &[Vec<(f64, f64)>]) -> Option<(f64, f64)> {
    let ys = points
        .iter()
        .map(|p| p.y)
        .chain(runs.iter().flatten().map(|&(_, y)| y));

    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for y in ys {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        None
    } else if max_y > min_y {
        Some((min_y, max_y))
    } else {
        Some(widen_if_flat(min_y, max_y))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // Row 0 is the top.
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    let height = grid.len();
    let Some(width) = grid.first().map(Vec::len) else {
        return;
    };

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
