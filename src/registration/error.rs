//! Error types for registration operations.

use std::fmt;

/// Result type for registration operations.
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Errors that can occur during image registration.
#[derive(Debug, Clone)]
pub enum RegistrationError {
    /// Two arrays that must agree in shape do not.
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        context: String,
    },

    /// Invalid parameter value.
    InvalidParameter { parameter: String, message: String },

    /// Non-finite values were detected in the correlation peak or the image
    /// energies. Raised at the metrics stage, where NaNs first become
    /// provable.
    NonFiniteInput,

    /// Error from underlying numr operation.
    NumrError(String),
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                expected,
                got,
                context,
            } => {
                write!(
                    f,
                    "Shape mismatch in {}: expected {:?}, got {:?}",
                    context, expected, got
                )
            }
            Self::InvalidParameter { parameter, message } => {
                write!(f, "Invalid parameter '{}': {}", parameter, message)
            }
            Self::NonFiniteInput => {
                write!(
                    f,
                    "NaN values found; remove NaNs from the input images or \
                     register through the masked route with \
                     reference_mask/moving_mask set to the finite pixels"
                )
            }
            Self::NumrError(msg) => {
                write!(f, "numr error: {}", msg)
            }
        }
    }
}

impl std::error::Error for RegistrationError {}

impl From<numr::error::Error> for RegistrationError {
    fn from(err: numr::error::Error) -> Self {
        Self::NumrError(err.to_string())
    }
}
