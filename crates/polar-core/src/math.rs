//! Mathematical type definitions and matrix conditioning utilities.

use nalgebra::{DMatrix, DVector, Matrix4, RowVector4, Vector4};

/// Scalar type used throughout the library (currently `f64`).
pub type Real = f64;

/// 4×4 Mueller matrix with [`Real`] entries.
pub type Mueller = Matrix4<Real>;
/// 4-component Stokes vector `[S0, S1, S2, S3]` with [`Real`] components.
pub type Stokes = Vector4<Real>;
/// Analyzer projection vector (top row of an analyzer Mueller matrix).
pub type AnalyzerRow = RowVector4<Real>;

/// `n` evenly spaced values over `[start, end]`, endpoints included.
///
/// The usual way to lay out polarimeter rotation angles. For `n < 2`
/// returns `start` repeated `n` times.
pub fn linspace(start: Real, end: Real, n: usize) -> Vec<Real> {
    if n < 2 {
        return vec![start; n];
    }
    let step = (end - start) / (n - 1) as Real;
    (0..n).map(|i| start + step * i as Real).collect()
}

/// Induced infinity norm of a dense matrix (maximum absolute row sum).
pub fn inf_norm(m: &DMatrix<Real>) -> Real {
    (0..m.nrows())
        .map(|r| m.row(r).iter().map(|v| v.abs()).sum::<Real>())
        .fold(0.0, Real::max)
}

/// Condition number of `m` under the infinity norm: `‖m‖∞ · ‖m⁺‖∞`,
/// with `m⁺` the Moore–Penrose pseudo-inverse.
///
/// Works for rectangular matrices; for a data-reduction matrix a large
/// value means the inversion amplifies measurement noise and the
/// recovered Mueller matrix should not be trusted.
///
/// Returns `None` if the SVD-based pseudo-inverse cannot be computed.
pub fn condition_number(m: &DMatrix<Real>) -> Option<Real> {
    let pinv = m.clone().svd(true, true).pseudo_inverse(0.0).ok()?;
    Some(inf_norm(m) * inf_norm(&pinv))
}

/// Reshape a 16-vector into a 4×4 Mueller matrix, row-major.
///
/// The data-reduction system solves for `vec(M)` with rows flattened
/// first, so element `v[4r + c]` lands at `M[(r, c)]`.
///
/// # Panics
///
/// Panics if `v` does not have exactly 16 elements.
pub fn mueller_from_vec16(v: &DVector<Real>) -> Mueller {
    assert_eq!(v.len(), 16, "expected 16 elements for 4x4 matrix reshape");
    let mut m = Mueller::zeros();
    for r in 0..4 {
        for c in 0..4 {
            m[(r, c)] = v[4 * r + c];
        }
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_endpoints() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(2.0, 3.0, 0).is_empty());
    }

    #[test]
    fn inf_norm_is_max_row_sum() {
        let m = DMatrix::from_row_slice(2, 3, &[1.0, -2.0, 3.0, -4.0, 0.5, 1.0]);
        assert!((inf_norm(&m) - 6.0).abs() < 1e-15);
    }

    #[test]
    fn condition_number_of_identity_is_one() {
        let eye = DMatrix::<Real>::identity(4, 4);
        let cond = condition_number(&eye).unwrap();
        assert!((cond - 1.0).abs() < 1e-12, "cond={cond}");
    }

    #[test]
    fn condition_number_is_scale_invariant() {
        let m = DMatrix::from_row_slice(3, 3, &[2.0, 1.0, 0.0, 0.5, 3.0, 1.0, 0.0, 1.0, 4.0]);
        let cond = condition_number(&m).unwrap();
        let cond_scaled = condition_number(&(m * 7.5)).unwrap();
        assert!(
            (cond - cond_scaled).abs() < 1e-9 * cond,
            "cond={cond}, scaled={cond_scaled}"
        );
    }

    #[test]
    fn reshape_is_row_major() {
        let v = DVector::from_iterator(16, (0..16).map(|i| i as Real));
        let m = mueller_from_vec16(&v);
        assert_eq!(m[(0, 0)], 0.0);
        assert_eq!(m[(0, 3)], 3.0);
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(m[(3, 3)], 15.0);
    }
}
