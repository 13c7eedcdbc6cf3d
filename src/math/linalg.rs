//! Dense linear algebra for the regression normal equations.
//!
//! The systems solved here are tiny (at most 11x11 for a degree-10 fit).
//! [`solve`] factors with nalgebra's partially pivoted LU (`P A = L U`) and
//! inspects the diagonal of `U` first, so a singular system is *reported*
//! rather than turned into infinities.

use nalgebra::{DMatrix, DVector};

use crate::error::FitError;

/// Transpose of a dense matrix.
pub fn transpose(m: &DMatrix<f64>) -> DMatrix<f64> {
    m.transpose()
}

/// Matrix product `a * b`.
pub fn multiply(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>, FitError> {
    if a.ncols() != b.nrows() {
        return Err(FitError::DimensionMismatch {
            left_rows: a.nrows(),
            left_cols: a.ncols(),
            right_rows: b.nrows(),
            right_cols: b.ncols(),
        });
    }
    Ok(a * b)
}

/// Row-vector product `vᵀ * m`, returned as a column vector.
pub fn vector_multiply(v: &DVector<f64>, m: &DMatrix<f64>) -> Result<DVector<f64>, FitError> {
    if v.len() != m.nrows() {
        return Err(FitError::DimensionMismatch {
            left_rows: 1,
            left_cols: v.len(),
            right_rows: m.nrows(),
            right_cols: m.ncols(),
        });
    }
    Ok(m.tr_mul(v))
}

/// Solve the square system `a x = b`.
///
/// # Errors
/// - [`FitError::DimensionMismatch`] if `a` is not square or `b` has the wrong length.
/// - [`FitError::SingularMatrix`] if the factorization has a pivot that is zero,
///   non-finite, or negligible relative to the largest entry of `a`.
pub fn solve(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>, FitError> {
    let n = a.nrows();
    if a.ncols() != n || b.len() != n {
        return Err(FitError::DimensionMismatch {
            left_rows: a.nrows(),
            left_cols: a.ncols(),
            right_rows: b.len(),
            right_cols: 1,
        });
    }

    let lu = a.clone().lu();

    let scale = a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let tol = scale * f64::EPSILON * f64::EPSILON;
    if let Some(column) = lu
        .u()
        .diagonal()
        .iter()
        .position(|p| !p.is_finite() || p.abs() <= tol || *p == 0.0)
    {
        return Err(FitError::SingularMatrix { column });
    }

    lu.solve(b).ok_or(FitError::SingularMatrix { column: n.saturating_sub(1) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn transpose_swaps_shape() {
        let m = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let t = transpose(&m);
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t[(2, 1)], 6.0);
        assert_eq!(t[(0, 1)], 4.0);
    }

    #[test]
    fn multiply_matches_hand_product() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = DMatrix::from_row_slice(2, 1, &[5.0, 6.0]);
        let p = multiply(&a, &b).unwrap();
        assert_eq!(p[(0, 0)], 17.0);
        assert_eq!(p[(1, 0)], 39.0);
    }

    #[test]
    fn multiply_rejects_incompatible_shapes() {
        let a = DMatrix::<f64>::zeros(2, 3);
        let b = DMatrix::<f64>::zeros(2, 2);
        let err = multiply(&a, &b).unwrap_err();
        assert_eq!(
            err,
            FitError::DimensionMismatch {
                left_rows: 2,
                left_cols: 3,
                right_rows: 2,
                right_cols: 2
            }
        );
    }

    #[test]
    fn vector_multiply_is_row_times_matrix() {
        let v = DVector::from_row_slice(&[1.0, 2.0]);
        let m = DMatrix::from_row_slice(2, 3, &[1.0, 0.0, 2.0, 0.0, 1.0, 3.0]);
        let r = vector_multiply(&v, &m).unwrap();
        assert_eq!(r.as_slice(), &[1.0, 2.0, 8.0]);

        let bad = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            vector_multiply(&bad, &m),
            Err(FitError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn solve_needs_pivoting() {
        // Zero in the (0, 0) slot: fails without a row swap.
        let a = DMatrix::from_row_slice(3, 3, &[0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 0.0]);
        let b = DVector::from_row_slice(&[5.0, 6.0, 4.0]);
        let x = solve(&a, &b).unwrap();
        let back = &a * &x;
        for i in 0..3 {
            assert_abs_diff_eq!(back[i], b[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn solve_reports_singular_matrix() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let b = DVector::from_row_slice(&[1.0, 2.0]);
        assert_eq!(solve(&a, &b), Err(FitError::SingularMatrix { column: 1 }));

        let zero = DMatrix::<f64>::zeros(2, 2);
        assert_eq!(solve(&zero, &b), Err(FitError::SingularMatrix { column: 0 }));
    }

    #[test]
    fn solve_tolerance_follows_entry_magnitude() {
        let a = DMatrix::from_row_slice(2, 2, &[4.0e12, 1.0e12, 1.0e12, 3.0e12]);
        let b = DVector::from_row_slice(&[1.0e12, 2.0e12]);
        let x = solve(&a, &b).unwrap();
        assert_abs_diff_eq!(x[0], 1.0 / 11.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 7.0 / 11.0, epsilon = 1e-12);

        let tiny = DMatrix::from_row_slice(2, 2, &[1.0e-20, 0.0, 0.0, 1.0e-20]);
        assert!(solve(&tiny, &b).is_ok());
    }

    #[test]
    fn solve_rejects_non_square_systems() {
        let a = DMatrix::<f64>::zeros(2, 3);
        let b = DVector::from_row_slice(&[1.0, 2.0]);
        assert!(matches!(solve(&a, &b), Err(FitError::DimensionMismatch { .. })));

        let sq = DMatrix::<f64>::identity(2, 2);
        let short = DVector::from_row_slice(&[1.0]);
        assert!(matches!(solve(&sq, &short), Err(FitError::DimensionMismatch { .. })));
    }

    #[test]
    fn solve_is_deterministic() {
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_row_slice(&[1.0, 2.0]);
        let x1 = solve(&a, &b).unwrap();
        let x2 = solve(&a, &b).unwrap();
        assert_eq!(x1, x2);
    }
}
