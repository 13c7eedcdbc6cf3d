//! Axis ticks.
//!
//! The step is the largest of `1·10ᵏ`, `2·10ᵏ`, `5·10ᵏ` that still fits at
//! least `min_ticks` ticks across the span. Labels are formatted from the
//! exponent `k`, so all labels on an axis share one format.

/// Upper bound on ticks produced by [`tick_values`].
const MAX_TICK_COUNT: usize = 1000;

/// Nice tick step for `span`, with its power-of-ten exponent.
///
/// Returns `None` for a non-positive or non-finite span.
pub fn tick_step(span: f64, min_ticks: usize) -> Option<(f64, i32)> {
    let max_gap = span / min_ticks.max(1) as f64;
    if !(max_gap.is_finite() && max_gap > 0.0) {
        return None;
    }
    let exp = max_gap.log10().floor() as i32;
    let base = 10f64.powi(exp);
    let mult = max_gap / base;

    let step = if mult >= 5.0 {
        5.0 * base
    } else if mult >= 2.0 {
        2.0 * base
    } else {
        base
    };
    Some((step, exp))
}

/// Multiples of `step` inside `[lo, hi]`.
pub fn tick_values(range: [f64; 2], step: f64) -> Vec<f64> {
    let [lo, hi] = range;
    if !(step.is_finite() && step > 0.0 && lo.is_finite() && hi.is_finite()) || hi < lo {
        return Vec::new();
    }
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .take(MAX_TICK_COUNT)
        .map(|i| i as f64 * step)
        .collect()
}

/// Label for a tick value; `None` for the origin (it is not labelled).
pub fn tick_label(value: f64, exp: i32) -> Option<String> {
    let decimals = exp.unsigned_abs() as usize;
    let rounded: f64 = format!("{value:.decimals$}").parse().unwrap_or(value);
    if rounded == 0.0 {
        return None;
    }

    let label = if !(-2..=3).contains(&exp) {
        format!("{value:.1e}")
    } else if exp == -2 {
        format!("{value:.2}")
    } else if exp == -1 {
        format!("{value:.1}")
    } else {
        format!("{}", value.trunc() as i64)
    };
    Some(label)
}
