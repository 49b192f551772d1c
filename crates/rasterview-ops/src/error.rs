//! Error types for point transforms.

use thiserror::Error;

/// Failure of a coordinate transform or of a fill driven by one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// The point has no image under the transform.
    #[error("point ({x}, {y}) is outside the domain of the transform")]
    OutOfDomain {
        /// X coordinate of the rejected point.
        x: f64,
        /// Y coordinate of the rejected point.
        y: f64,
    },

    /// The transform cannot be inverted.
    #[error("transform is not invertible")]
    Singular,

    /// The fill itself was rejected (bad window or destination size).
    #[error(transparent)]
    Raster(#[from] rasterview_core::Error),

    /// Failure reported by an external collaborator.
    #[error("{0}")]
    Other(String),
}

impl TransformError {
    /// Creates an out-of-domain error for the point (x, y).
    #[inline]
    pub fn out_of_domain(x: f64, y: f64) -> Self {
        Self::OutOfDomain { x, y }
    }
}

/// Result type for point transforms.
pub type TransformResult<T> = Result<T, TransformError>;
