//! Synthetic point generation: a polynomial plus Gaussian noise.
//!
//! x-values are drawn uniformly from `[x_min, x_max]`, then
//! `y = p(x) + ε` with `ε ~ N(0, noise²)`. A fixed seed gives the same points
//! on every run.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::Point;
use crate::error::AppError;
use crate::math::horner;

/// Settings for [`generate_sample`].
#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    pub count: usize,
    pub seed: u64,
    /// Polynomial coefficients, highest power first.
    pub coeffs: Vec<f64>,
    /// Standard deviation of the additive noise.
    pub noise: f64,
    pub x_min: f64,
    pub x_max: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            count: 20,
            seed: 42,
            coeffs: vec![0.25, 0.0, -2.0, 1.0],
            noise: 0.5,
            x_min: -4.0,
            x_max: 4.0,
        }
    }
}

/// Generate `config.count` points, sorted by x.
pub fn generate_sample(config: &SampleConfig) -> Result<Vec<Point>, AppError> {
    if config.count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(AppError::new(2, "Invalid x range for sample generation (need x_min < x_max)."));
    }
    if config.coeffs.is_empty() || !config.coeffs.iter().all(|c| c.is_finite()) {
        return Err(AppError::new(2, "Sample coefficients must be finite and non-empty."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, "Sample noise must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let mut points: Vec<Point> = (0..config.count)
        .map(|_| {
            let x = rng.gen_range(config.x_min..=config.x_max);
            let y = horner(&config.coeffs, x) + normal.sample(&mut rng);
            Point::new(x, y)
        })
        .collect();
    points.sort_by(|a, b| a.x.total_cmp(&b.x));

    log::debug!(
        "generated {} sample points (seed {}, noise {})",
        points.len(),
        config.seed,
        config.noise
    );
    Ok(points)
}
