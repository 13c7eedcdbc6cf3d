//! Polynomial produced by least-squares regression.
//!
//! Regression fits in the normalized variable `t = (x - shift) / scale`, which
//! keeps the normal equations well conditioned when the data sits far from
//! the origin. A polynomial built with [`Polynomial::new`] uses the identity
//! mapping (`shift = 0`, `scale = 1`), so `t = x`.

use serde::{Deserialize, Serialize};

use crate::math::horner;

/// Polynomial in `t = (x - shift) / scale` with coefficients stored highest power first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    coeffs: Vec<f64>,
    #[serde(default)]
    shift: f64,
    #[serde(default = "unit_scale")]
    scale: f64,
}

fn unit_scale() -> f64 {
    1.0
}

impl Polynomial {
    pub fn new(coeffs: Vec<f64>) -> Self {
        Self::scaled(coeffs, 0.0, 1.0)
    }

    /// Polynomial in `t = (x - shift) / scale`. `scale` must be non-zero.
    pub fn scaled(coeffs: Vec<f64>, shift: f64, scale: f64) -> Self {
        Self { coeffs, shift, scale }
    }

    /// Coefficients in `t`, highest power first (the last one is the constant term).
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// True when `t = x`.
    pub fn is_unscaled(&self) -> bool {
        self.shift == 0.0 && self.scale == 1.0
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        horner(&self.coeffs, (x - self.shift) / self.scale)
    }

    /// Pairs of `(power, coefficient)` in `t`, highest power first.
    pub fn terms(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        let degree = self.degree();
        self.coeffs.iter().enumerate().map(move |(i, &c)| (degree - i, c))
    }

    /// Coefficients in `x` itself, highest power first.
    ///
    /// Expanding loses precision when `shift` is large compared to `scale`;
    /// [`Polynomial::evaluate`] never goes through this form.
    pub fn monomial_coefficients(&self) -> Vec<f64> {
        // Horner over polynomials: acc = acc * (x/scale - shift/scale) + c.
        let a = 1.0 / self.scale;
        let b = -self.shift / self.scale;
        let mut acc: Vec<f64> = Vec::with_capacity(self.coeffs.len());
        for &c in &self.coeffs {
            let mut next = vec![0.0; acc.len() + 1];
            for (i, &v) in acc.iter().enumerate() {
                next[i] += v * a;
                next[i + 1] += v * b;
            }
            if let Some(last) = next.last_mut() {
                *last += c;
            }
            acc = next;
        }
        acc
    }
}
