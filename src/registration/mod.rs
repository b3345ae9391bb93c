//! Image translation registration.
//!
//! Provides efficient subpixel translation registration by phase
//! cross-correlation (FFT cross-power spectrum plus a matrix-multiply DFT
//! refinement stage) and a masked variant for images containing invalid
//! pixels.

mod cpu;
pub mod error;
pub mod impl_generic;
pub mod traits;

#[cfg(feature = "cuda")]
mod cuda;

#[cfg(feature = "wgpu")]
mod wgpu;

pub use error::{RegistrationError, RegistrationResult};
pub use traits::masked::MaskedPhaseCorrelationAlgorithms;
pub use traits::phase::{
    CorrelationSpace, MaskedCorrelationParams, PhaseCorrelationAlgorithms,
    PhaseCorrelationParams, Registration, RegistrationMethod,
};

use crate::DType;

/// Image dtypes the registration algorithms accept.
pub(crate) fn validate_image_dtype(dtype: DType, op: &'static str) -> RegistrationResult<()> {
    match dtype {
        DType::F32 | DType::F64 | DType::Complex64 | DType::Complex128 => Ok(()),
        _ => Err(numr::error::Error::UnsupportedDType { dtype, op }.into()),
    }
}
