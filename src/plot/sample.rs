//! Curve sampling for renderers.
//!
//! Regression curves are sampled across the whole window. Splines are only
//! sampled strictly inside their data domain, so nothing is drawn to the left
//! of the first point or to the right of the last one. A non-finite value ends
//! the current run, which keeps a renderer from joining across it.

use crate::models::Curve;

/// Sample `curve` at `columns` evenly spaced x-values over `x_range`.
///
/// Returns one polyline per run of drawable samples.
pub fn sample_curve(curve: &Curve, x_range: (f64, f64), columns: usize) -> Vec<Vec<(f64, f64)>> {
    let (x0, x1) = x_range;
    let n = columns.max(2);
    let clip = curve.clip_domain();

    let mut runs = Vec::new();
    let mut current = Vec::new();
    for i in 0..n {
        let x = x0 + (x1 - x0) * (i as f64 / (n as f64 - 1.0));
        let inside = clip.is_none_or(|(lo, hi)| x > lo && x < hi);
        let y = curve.evaluate(x);

        if inside && y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitId, Point};
    use crate::models::Polynomial;

    #[test]
    fn regression_spans_the_window() {
        let curve = Curve::Polynomial(Polynomial::new(vec![2.0, 1.0]));
        let runs = sample_curve(&curve, (-10.0, 10.0), 21);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 21);
        assert_eq!(runs[0][0], (-10.0, -19.0));
        assert_eq!(runs[0][20], (10.0, 21.0));
    }

    #[test]
    fn spline_stays_strictly_inside_its_domain() {
        let points = [Point::new(-2.0, 1.0), Point::new(0.0, 3.0), Point::new(2.0, 0.0)];
        let curve = FitId::CubicSpline.fit(&points).unwrap().unwrap();

        let runs = sample_curve(&curve, (-5.0, 5.0), 101);
        assert_eq!(runs.len(), 1);
        let run = &runs[0];
        assert!(run.iter().all(|&(x, _)| x > -2.0 && x < 2.0));
        // Samples at exactly x = ±2 are dropped.
        assert_eq!(run.len(), 39);
    }

    #[test]
    fn non_finite_values_split_runs() {
        // 1e200 * x^2 overflows near both ends of the window.
        let curve = Curve::Polynomial(Polynomial::new(vec![1e200, 0.0, 0.0]));
        let runs = sample_curve(&curve, (-1e100, 1e100), 5);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 1);
        assert_eq!(runs[0][0], (0.0, 0.0));
    }
}
