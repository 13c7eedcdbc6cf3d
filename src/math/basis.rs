//! Monomial basis used by polynomial regression.
//!
//! Coefficients are stored **highest power first**:
//!
//! ```text
//! p(x) = c[0]·x^d + c[1]·x^(d-1) + … + c[d-1]·x + c[d]
//! ```
//!
//! so a design row for degree `d` is `[x^d, x^(d-1), …, x, 1]`.

/// Fill a design row highest power first; the degree is `out.len() - 1`.
pub fn fill_design_row(x: f64, out: &mut [f64]) {
    // Walk from the constant term upwards so each power is one multiply.
    let mut power = 1.0;
    for slot in out.iter_mut().rev() {
        *slot = power;
        power *= x;
    }
}

/// Evaluate a highest-power-first polynomial with Horner's scheme.
pub fn horner(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_row_is_highest_power_first() {
        let mut row = [0.0; 4];
        fill_design_row(2.0, &mut row);
        assert_eq!(row, [8.0, 4.0, 2.0, 1.0]);
    }

    #[test]
    fn design_row_degree_one() {
        let mut row = [0.0; 2];
        fill_design_row(-3.0, &mut row);
        assert_eq!(row, [-3.0, 1.0]);

        let mut constant = [7.0];
        fill_design_row(5.0, &mut constant);
        assert_eq!(constant, [1.0]);
        fill_design_row(5.0, &mut []);
    }

    #[test]
    fn horner_matches_power_sum() {
        // 2x^2 - 3x + 1
        let coeffs = [2.0, -3.0, 1.0];
        for &x in &[-2.0, 0.0, 0.5, 3.0] {
            let direct = 2.0 * x * x - 3.0 * x + 1.0;
            assert!((horner(&coeffs, x) - direct).abs() < 1e-12);
        }
        assert_eq!(horner(&[], 4.0), 0.0);
    }
}
