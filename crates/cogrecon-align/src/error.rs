/// An error type for the alignment module.
#[derive(thiserror::Error, Debug)]
pub enum AlignError {
    /// The cross-covariance matrix is rank deficient by more than one, so the
    /// rotation is underdetermined.
    #[error(
        "colinearity detected in covariance matrix (rank {rank} < {dim} - 1):\n{covariance:?}"
    )]
    DegenerateInput {
        /// Numerical rank of the cross-covariance matrix.
        rank: usize,
        /// Dimension of the points.
        dim: usize,
        /// The offending cross-covariance matrix.
        covariance: faer::Mat<f64>,
    },

    /// All the source points coincide, the scale cannot be estimated.
    #[error("Source points have zero variance")]
    ZeroSourceVariance,

    /// Error when the data length does not match the point dimension.
    #[error("Data length ({0}) is not a multiple of the point dimension ({1})")]
    InvalidShape(usize, usize),

    /// Error when a coordinate is NaN or infinite.
    #[error("Point data contains a non-finite value at index {0}")]
    NonFiniteData(usize),

    /// Error when the point set has no points.
    #[error("Point set is empty")]
    EmptyPointSet,

    /// Error when inverting a transform with zero scale.
    #[error("Cannot invert a transform with zero scale")]
    ZeroScale,
}
