use crate::{pointset::PointSet, transform::SimilarityTransform};

/// Compute the mean squared distance between the transformed source and the target.
///
/// This is the quantity minimized by [`crate::umeyama::solve`].
///
/// # Arguments
///
/// * `transform` - The transform from the source to the target frame.
/// * `source` - The source points.
/// * `target` - The target points.
///
/// PRECONDITION: `source` and `target` have the same shape and the dimension of `transform`.
pub fn mean_squared_error(
    transform: &SimilarityTransform,
    source: &PointSet,
    target: &PointSet,
) -> f64 {
    assert_eq!(source.shape(), target.shape());
    let transformed = transform.apply(source);
    let sum = transformed
        .points()
        .zip(target.points())
        .map(|(p, q)| p.iter().zip(q.iter()).map(|(a, b)| (a - b).powi(2)).sum::<f64>())
        .sum::<f64>();
    sum / source.len() as f64
}

/// Compute the root mean squared distance between the transformed source and the target.
pub fn rmse(transform: &SimilarityTransform, source: &PointSet, target: &PointSet) -> f64 {
    mean_squared_error(transform, source, target).sqrt()
}
