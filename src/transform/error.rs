//! Error types for geometric transform operations.

use std::fmt;

/// Result type for geometric transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Errors that can occur during resampling and warping.
#[derive(Debug, Clone)]
pub enum TransformError {
    /// Dimension mismatch in N-D operations.
    DimensionMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// Invalid parameter value.
    InvalidParameter { parameter: String, message: String },

    /// Error from underlying numr operation.
    NumrError(String),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch {
                expected,
                actual,
                context,
            } => {
                write!(
                    f,
                    "Dimension mismatch in {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Self::InvalidParameter { parameter, message } => {
                write!(f, "Invalid parameter '{}': {}", parameter, message)
            }
            Self::NumrError(msg) => {
                write!(f, "numr error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TransformError {}

impl From<numr::error::Error> for TransformError {
    fn from(err: numr::error::Error) -> Self {
        Self::NumrError(err.to_string())
    }
}
