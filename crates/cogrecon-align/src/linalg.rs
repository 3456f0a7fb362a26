/// Estimate the numerical rank of a matrix from its singular values.
///
/// Uses the default tolerance `max(d) * max(rows, cols) * f64::EPSILON` and counts the
/// singular values strictly above it.
///
/// # Arguments
///
/// * `singular_values` - The singular values of the matrix.
/// * `rows` - The number of rows of the matrix.
/// * `cols` - The number of columns of the matrix.
///
/// # Returns
///
/// The number of singular values above the tolerance.
///
/// Example:
///
/// ```
/// use cogrecon_align::linalg::numerical_rank;
///
/// assert_eq!(numerical_rank(&[3.0, 1.0, 0.0], 3, 3), 2);
/// ```
pub fn numerical_rank(singular_values: &[f64], rows: usize, cols: usize) -> usize {
    let max_sv = singular_values.iter().fold(0.0f64, |acc, &s| acc.max(s));
    let tol = max_sv * rows.max(cols) as f64 * f64::EPSILON;
    singular_values.iter().filter(|&&s| s > tol).count()
}

/// Convert a D x D faer matrix to a row-major array.
///
/// PRECONDITION: `mat` is D x D.
pub fn faer_mat_to_array<const D: usize>(mat: faer::MatRef<'_, f64>) -> [[f64; D]; D] {
    assert_eq!((mat.nrows(), mat.ncols()), (D, D));
    let mut out = [[0.0; D]; D];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = mat.read(i, j);
        }
    }
    out
}

/// Multiply a matrix by a vector, `y = a * x`.
///
/// PRECONDITION: `a.ncols() == x.len()`.
pub fn matvec(a: faer::MatRef<'_, f64>, x: &[f64]) -> Vec<f64> {
    assert_eq!(a.ncols(), x.len());
    let y = a * faer::col::from_slice(x);
    (0..y.nrows()).map(|i| y.read(i)).collect()
}

/// Check that a square matrix is orthonormal within `eps`.
pub fn is_orthonormal(mat: faer::MatRef<'_, f64>, eps: f64) -> bool {
    if mat.nrows() != mat.ncols() {
        return false;
    }
    let gram = mat.transpose() * mat;
    for i in 0..gram.nrows() {
        for j in 0..gram.ncols() {
            let expected = if i == j { 1.0 } else { 0.0 };
            if (gram.read(i, j) - expected).abs() > eps {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_numerical_rank() {
        assert_eq!(numerical_rank(&[2.0, 1.0], 2, 2), 2);
        assert_eq!(numerical_rank(&[2.0, 1e-20], 2, 2), 1);
        assert_eq!(numerical_rank(&[0.0, 0.0, 0.0], 3, 3), 0);
        assert_eq!(numerical_rank(&[5.0], 1, 1), 1);
    }

    #[test]
    fn test_numerical_rank_singular_matrix() {
        // a single non zero row
        let a = faer::mat![[1.0, 2.0, 3.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]];
        let svd = a.svd();
        let s = svd.s_diagonal();
        let d = (0..s.nrows()).map(|i| s.read(i)).collect::<Vec<_>>();
        assert_eq!(numerical_rank(&d, 3, 3), 1);
    }

    #[test]
    fn test_faer_mat_to_array() {
        let mat = faer::mat![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let array = faer_mat_to_array::<3>(mat.as_ref());
        assert_eq!(array, [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
    }

    #[test]
    fn test_matvec() {
        let a = faer::mat![[0.0, -1.0], [1.0, 0.0]];
        let y = matvec(a.as_ref(), &[1.0, 2.0]);
        assert_relative_eq!(y[0], -2.0);
        assert_relative_eq!(y[1], 1.0);
    }

    #[test]
    fn test_is_orthonormal() {
        let r = faer::mat![[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(is_orthonormal(r.as_ref(), 1e-12));
        let a = faer::mat![[2.0, 0.0], [0.0, 1.0]];
        assert!(!is_orthonormal(a.as_ref(), 1e-12));
    }
}
