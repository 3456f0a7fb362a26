use crate::{error::AlignError, linalg, pointset::PointSet};

/// A similarity transform `x -> scale * rotation * x + translation`.
///
/// The transform maps points from the source frame to the target frame.
#[derive(Debug, Clone)]
pub struct SimilarityTransform {
    /// Rotation matrix (m x m).
    pub rotation: faer::Mat<f64>,
    /// Uniform scale factor.
    pub scale: f64,
    /// Translation vector (length m).
    pub translation: Vec<f64>,
}

impl SimilarityTransform {
    /// Create a new transform from its parts.
    ///
    /// PRECONDITION: `rotation` is square and `translation.len() == rotation.nrows()`.
    pub fn new(rotation: faer::Mat<f64>, scale: f64, translation: Vec<f64>) -> Self {
        assert_eq!(rotation.nrows(), rotation.ncols());
        assert_eq!(rotation.nrows(), translation.len());
        Self {
            rotation,
            scale,
            translation,
        }
    }

    /// The identity transform in `dim` dimensions.
    pub fn identity(dim: usize) -> Self {
        Self {
            rotation: faer::Mat::<f64>::from_fn(dim, dim, |i, j| if i == j { 1.0 } else { 0.0 }),
            scale: 1.0,
            translation: vec![0.0; dim],
        }
    }

    /// The dimension of the points the transform acts on.
    #[inline]
    pub fn dim(&self) -> usize {
        self.translation.len()
    }

    /// The product `scale * rotation`.
    pub fn scaled_rotation(&self) -> faer::Mat<f64> {
        faer::Mat::<f64>::from_fn(self.dim(), self.dim(), |i, j| {
            self.scale * self.rotation.read(i, j)
        })
    }

    /// The (m + 1) x (m + 1) homogeneous matrix `[[scale * R, t], [0, 1]]`.
    pub fn to_homogeneous(&self) -> faer::Mat<f64> {
        let m = self.dim();
        faer::Mat::<f64>::from_fn(m + 1, m + 1, |i, j| match (i < m, j < m) {
            (true, true) => self.scale * self.rotation.read(i, j),
            (true, false) => self.translation[i],
            (false, true) => 0.0,
            (false, false) => 1.0,
        })
    }

    /// Transform a single point.
    ///
    /// PRECONDITION: `point.len() == self.dim()`.
    pub fn transform_point(&self, point: &[f64]) -> Vec<f64> {
        let rotated = linalg::matvec(self.rotation.as_ref(), point);
        rotated
            .iter()
            .zip(self.translation.iter())
            .map(|(r, t)| self.scale * r + t)
            .collect()
    }

    /// Transform every point of a point set.
    ///
    /// PRECONDITION: `points.dim() == self.dim()`.
    ///
    /// Example:
    ///
    /// ```
    /// use cogrecon_align::{pointset::PointSet, transform::SimilarityTransform};
    ///
    /// let points = PointSet::from_points(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// let transformed = SimilarityTransform::identity(2).apply(&points);
    /// assert_eq!(transformed, points);
    /// ```
    pub fn apply(&self, points: &PointSet) -> PointSet {
        assert_eq!(points.dim(), self.dim());

        // P' = c * P * R^T + 1 * t^T
        let rotated = points.as_faer() * self.rotation.transpose();

        let m = self.dim();
        let mut data = Vec::with_capacity(points.len() * m);
        for i in 0..rotated.nrows() {
            for j in 0..m {
                data.push(self.scale * rotated.read(i, j) + self.translation[j]);
            }
        }

        PointSet::from_raw_parts(data, m)
    }

    /// The inverse transform `x -> (1 / c) * R^T * (x - t)`.
    ///
    /// # Errors
    ///
    /// Returns [`AlignError::ZeroScale`] if the scale is zero.
    pub fn inverse(&self) -> Result<Self, AlignError> {
        if self.scale == 0.0 {
            return Err(AlignError::ZeroScale);
        }
        let inv_scale = 1.0 / self.scale;
        let rotation = self.rotation.transpose().to_owned();
        let translation = linalg::matvec(rotation.as_ref(), &self.translation)
            .into_iter()
            .map(|x| -inv_scale * x)
            .collect();
        Ok(Self {
            rotation,
            scale: inv_scale,
            translation,
        })
    }

    /// Compose two transforms, the result applies `other` first and then `self`.
    ///
    /// PRECONDITION: both transforms have the same dimension.
    pub fn compose(&self, other: &Self) -> Self {
        assert_eq!(self.dim(), other.dim());
        // c1 R1 (c2 R2 x + t2) + t1
        let rotation = self.rotation.as_ref() * other.rotation.as_ref();
        let translation = self.transform_point(&other.translation);
        Self {
            rotation,
            scale: self.scale * other.scale,
            translation,
        }
    }
}
