#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the alignment module.
pub mod error;

/// Linear algebra utilities.
pub mod linalg;

/// Residual metrics of an alignment.
pub mod metrics;

/// Point set container.
pub mod pointset;

/// Similarity transforms.
pub mod transform;

/// Closed-form similarity alignment solver.
pub mod umeyama;

pub use error::AlignError;
pub use pointset::PointSet;
pub use transform::SimilarityTransform;
pub use umeyama::{solve, solve_with, AlignmentParams};
