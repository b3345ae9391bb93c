//! Geometric image transforms.
//!
//! Provides the generic resampling primitive (coordinate mapping and affine
//! transforms) and the image warps built on it: warp, resize, rescale, and
//! rotate.

mod cpu;
pub mod error;
pub mod impl_generic;
pub mod traits;

#[cfg(feature = "cuda")]
mod cuda;

#[cfg(feature = "wgpu")]
mod wgpu;

pub use error::{TransformError, TransformResult};
pub use traits::resample::{BoundaryMode, InterpolationOrder, ResampleAlgorithms};
pub use traits::warps::WarpAlgorithms;
