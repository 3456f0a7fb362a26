use crate::error::AlignError;

/// A set of N points of dimension m stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    // The point coordinates, one row per point.
    data: Vec<f64>,
    // The dimension of each point.
    dim: usize,
}

impl PointSet {
    /// Create a new point set from row-major data and the point dimension.
    ///
    /// # Arguments
    ///
    /// * `data` - The point coordinates, `dim` values per point.
    /// * `dim` - The dimension of each point.
    ///
    /// # Errors
    ///
    /// Returns [`AlignError::InvalidShape`] if `dim` is zero or the data length is
    /// not a multiple of `dim`, [`AlignError::EmptyPointSet`] if there are no points and
    /// [`AlignError::NonFiniteData`] if a coordinate is NaN or infinite.
    pub fn new(data: Vec<f64>, dim: usize) -> Result<Self, AlignError> {
        if dim == 0 || data.len() % dim != 0 {
            return Err(AlignError::InvalidShape(data.len(), dim));
        }
        if data.is_empty() {
            return Err(AlignError::EmptyPointSet);
        }
        if let Some(idx) = data.iter().position(|x| !x.is_finite()) {
            return Err(AlignError::NonFiniteData(idx));
        }
        Ok(Self { data, dim })
    }

    // Internal constructor for data already known to be well formed.
    pub(crate) fn from_raw_parts(data: Vec<f64>, dim: usize) -> Self {
        debug_assert!(dim > 0 && !data.is_empty() && data.len() % dim == 0);
        Self { data, dim }
    }

    /// Create a new point set from fixed-size points.
    ///
    /// Example:
    ///
    /// ```
    /// use cogrecon_align::pointset::PointSet;
    ///
    /// let points = PointSet::from_points(&[[0.0, 0.0], [1.0, 0.0], [0.0, 2.0]]).unwrap();
    /// assert_eq!(points.shape(), (3, 2));
    /// ```
    pub fn from_points<const D: usize>(points: &[[f64; D]]) -> Result<Self, AlignError> {
        let data = points.iter().flat_map(|p| p.iter().copied()).collect();
        Self::new(data, D)
    }

    /// Create a new point set copying the rows of a faer matrix.
    pub fn from_faer(mat: faer::MatRef<'_, f64>) -> Result<Self, AlignError> {
        let mut data = Vec::with_capacity(mat.nrows() * mat.ncols());
        for i in 0..mat.nrows() {
            for j in 0..mat.ncols() {
                data.push(mat.read(i, j));
            }
        }
        Self::new(data, mat.ncols())
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / self.dim
    }

    /// Check if the point set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the dimension of the points.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get the shape of the point set as (number of points, dimension).
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.len(), self.dim)
    }

    /// Get the i-th point.
    ///
    /// PRECONDITION: `i < self.len()`.
    pub fn point(&self, i: usize) -> &[f64] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Iterate over the points.
    pub fn points(&self) -> std::slice::ChunksExact<'_, f64> {
        self.data.chunks_exact(self.dim)
    }

    /// Get the raw row-major coordinates.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get a zero-copy N x m faer view of the points.
    pub fn as_faer(&self) -> faer::MatRef<'_, f64> {
        faer::mat::from_row_major_slice(&self.data, self.len(), self.dim)
    }

    /// Compute the centroid (mean over the points, per dimension).
    pub fn centroid(&self) -> Vec<f64> {
        let mut centroid = vec![0.0; self.dim];
        for p in self.points() {
            for (c, &x) in centroid.iter_mut().zip(p.iter()) {
                *c += x;
            }
        }
        let n = self.len() as f64;
        centroid.iter_mut().for_each(|c| *c /= n);
        centroid
    }

    /// Subtract `centroid` from every point.
    ///
    /// Returns an N x m matrix with the centered points as rows.
    ///
    /// PRECONDITION: `centroid.len() == self.dim()`.
    pub fn centered(&self, centroid: &[f64]) -> faer::Mat<f64> {
        assert_eq!(centroid.len(), self.dim);
        faer::Mat::<f64>::from_fn(self.len(), self.dim, |i, j| {
            self.data[i * self.dim + j] - centroid[j]
        })
    }

    /// Mean over the points of the squared distance to the centroid.
    pub fn variance(&self) -> f64 {
        let centroid = self.centroid();
        let sum = self
            .points()
            .map(|p| {
                p.iter()
                    .zip(centroid.iter())
                    .map(|(x, c)| (x - c).powi(2))
                    .sum::<f64>()
            })
            .sum::<f64>();
        sum / self.len() as f64
    }
}
