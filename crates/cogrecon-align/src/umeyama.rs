//! Closed-form least-squares similarity alignment (Umeyama)
//!
//! Reference: S. Umeyama, "Least-squares estimation of transformation parameters between
//! two point patterns", IEEE PAMI 1991.

use crate::{error::AlignError, linalg, pointset::PointSet, transform::SimilarityTransform};

/// Parameters of the alignment solver.
#[derive(Debug, Clone)]
pub struct AlignmentParams {
    /// Estimate the uniform scale. If false, the scale is fixed to 1.
    pub estimate_scale: bool,
}

impl Default for AlignmentParams {
    fn default() -> Self {
        Self {
            estimate_scale: true,
        }
    }
}

/// Rotation (row-major), scale and translation for fixed-size points.
pub type UmeyamaOutput<const D: usize> = ([[f64; D]; D], f64, [f64; D]);

/// Compute the cross-covariance matrix `(target_c^T * source_c) / N` of two point sets.
///
/// PRECONDITION: `source` and `target` have the same shape.
pub fn cross_covariance(source: &PointSet, target: &PointSet) -> faer::Mat<f64> {
    assert_eq!(
        source.shape(),
        target.shape(),
        "source and target must have the same shape"
    );
    let source_centered = source.centered(&source.centroid());
    let target_centered = target.centered(&target.centroid());
    covariance_from_centered(source_centered.as_ref(), target_centered.as_ref())
}

fn covariance_from_centered(
    source_centered: faer::MatRef<'_, f64>,
    target_centered: faer::MatRef<'_, f64>,
) -> faer::Mat<f64> {
    let n = source_centered.nrows() as f64;
    let mut cov = faer::Mat::<f64>::zeros(target_centered.ncols(), source_centered.ncols());
    faer::linalg::matmul::matmul(
        cov.as_mut(),
        target_centered.transpose(),
        source_centered,
        None,
        1.0 / n,
        faer::Parallelism::None,
    );
    cov
}

/// Estimate the similarity transform that maps `source` onto `target`.
///
/// Minimizes the mean squared distance between `scale * R * source_i + t` and `target_i`
/// over proper rotations `R`, scales and translations.
///
/// # Arguments
///
/// * `source` - The N x m points to align.
/// * `target` - The N x m points to align to.
///
/// # Returns
///
/// The transform from the source to the target frame.
///
/// # Errors
///
/// * [`AlignError::DegenerateInput`] if the cross-covariance rank is below `m - 1`.
/// * [`AlignError::ZeroSourceVariance`] if all the source points coincide.
///
/// PRECONDITION: `source` and `target` have the same shape.
///
/// Example:
///
/// ```
/// use cogrecon_align::{pointset::PointSet, umeyama::solve};
///
/// let source = PointSet::from_points(&[[0.0, 0.0], [1.0, 0.0], [0.0, 2.0]]).unwrap();
/// let target = PointSet::from_points(&[[1.0, 1.0], [3.0, 1.0], [1.0, 5.0]]).unwrap();
/// let transform = solve(&source, &target).unwrap();
/// assert!((transform.scale - 2.0).abs() < 1e-9);
/// ```
pub fn solve(source: &PointSet, target: &PointSet) -> Result<SimilarityTransform, AlignError> {
    solve_with(source, target, &AlignmentParams::default())
}

/// Estimate the similarity transform that maps `source` onto `target` with explicit parameters.
///
/// See [`solve`]. With `estimate_scale == false` the scale is fixed to 1 and the
/// zero variance check is skipped.
pub fn solve_with(
    source: &PointSet,
    target: &PointSet,
    params: &AlignmentParams,
) -> Result<SimilarityTransform, AlignError> {
    assert_eq!(
        source.shape(),
        target.shape(),
        "source and target must have the same shape"
    );
    let (n, m) = source.shape();

    // 1. centroids
    let source_centroid = source.centroid();
    let target_centroid = target.centroid();

    // 2. centered point sets
    let source_centered = source.centered(&source_centroid);
    let target_centered = target.centered(&target_centroid);

    // 3. source variance
    let sigma_source = source.variance();

    // 4. cross-covariance
    let cov = covariance_from_centered(source_centered.as_ref(), target_centered.as_ref());

    // 5. full svd, cov = U * diag(d) * V^T
    let svd = cov.svd();
    let u = svd.u();
    let v = svd.v();
    let d = {
        let s = svd.s_diagonal();
        (0..s.nrows()).map(|i| s.read(i)).collect::<Vec<_>>()
    };

    // 6. numerical rank
    let rank = linalg::numerical_rank(&d, m, m);

    log::debug!(
        "umeyama: n={} m={} rank={} singular values={:?}",
        n,
        m,
        rank,
        d
    );

    // 7. sign correction on the axis of the smallest singular value
    if rank + 1 < m {
        log::warn!("umeyama: covariance rank {} is below {} - 1", rank, m);
        return Err(AlignError::DegenerateInput {
            rank,
            dim: m,
            covariance: cov,
        });
    }

    // sign of det(cov) = det(U) * prod(d) * det(V), read from the orthogonal factors so
    // that it stays defined when the smallest singular value vanishes
    let det_sign = u.determinant() * v.determinant();

    let mut s = vec![1.0; m];
    if det_sign < 0.0 {
        let last = smallest_index(&d);
        log::debug!("umeyama: reflection detected, flipping axis {}", last);
        s[last] = -1.0;
    }

    // 8. R = U * S * V^T
    let us = faer::Mat::<f64>::from_fn(m, m, |i, j| u.read(i, j) * s[j]);
    let rotation = us.as_ref() * v.transpose();

    // 9. c = trace(diag(d) * S) / sigma_source
    let scale = if params.estimate_scale {
        if sigma_source == 0.0 {
            log::warn!("umeyama: source points have zero variance");
            return Err(AlignError::ZeroSourceVariance);
        }
        d.iter().zip(s.iter()).map(|(di, si)| di * si).sum::<f64>() / sigma_source
    } else {
        1.0
    };

    // 10. t = mu_target - c * R * mu_source
    let translation = linalg::matvec(rotation.as_ref(), &source_centroid)
        .iter()
        .zip(target_centroid.iter())
        .map(|(r, mu)| mu - scale * r)
        .collect();

    Ok(SimilarityTransform::new(rotation, scale, translation))
}

/// Umeyama alignment of fixed-size point arrays.
///
/// Returns the rotation as a row-major array, the scale and the translation.
///
/// PRECONDITION: `src` and `dst` have the same length.
pub fn umeyama<const D: usize>(
    src: &[[f64; D]],
    dst: &[[f64; D]],
) -> Result<UmeyamaOutput<D>, AlignError> {
    let source = PointSet::from_points(src)?;
    let target = PointSet::from_points(dst)?;
    let transform = solve(&source, &target)?;

    let rotation = linalg::faer_mat_to_array::<D>(transform.rotation.as_ref());
    let mut translation = [0.0; D];
    translation.copy_from_slice(&transform.translation);

    Ok((rotation, transform.scale, translation))
}

// Index of the smallest singular value; the last one for a descending svd.
fn smallest_index(d: &[f64]) -> usize {
    let mut idx = d.len() - 1;
    for (i, &di) in d.iter().enumerate().rev() {
        if di < d[idx] {
            idx = i;
        }
    }
    idx
}
