//! imagr - N-Dimensional Image Processing on numr
//!
//! imagr provides image registration, geometric warping, and morphological
//! footprint generation for N-dimensional images. Built on numr's tensor
//! primitives, the same algorithm code runs on every backend (CPU, CUDA,
//! WebGPU).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      imagr                              │
//! │     (registration, geometric warps, footprints)         │
//! └──────────────────────────┬──────────────────────────────┘
//!                            │ uses
//! ┌──────────────────────────▼──────────────────────────────┐
//! │                       numr                              │
//! │     (tensors, FFT, matmul, elementwise ops)             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Current Modules
//!
//! - [`registration`] - Subpixel image translation registration by phase
//!   cross-correlation, with an upsampled-DFT refinement stage and a masked
//!   variant for images with invalid pixels
//! - [`transform`] - Geometric resampling (coordinate mapping, affine
//!   transforms) and the image warps built on it (warp, resize, rescale,
//!   rotate)
//! - [`morphology`] - Footprint (structuring element) generators for
//!   morphological operations
//!
//! # Backend Support
//!
//! imagr is generic over numr's `Runtime` trait. The same code works on:
//! - CPU (with SIMD acceleration)
//! - CUDA (NVIDIA GPUs)
//! - WebGPU (cross-platform GPU)
//!
//! # Feature Flags
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `cuda`  | Enable CUDA GPU acceleration | CUDA 12.x, numr/cuda |
//! | `wgpu`  | Enable WebGPU cross-platform GPU | numr/wgpu |
//!
//! ## Backend Limitations
//!
//! - **WebGPU**: Only supports F32/Complex64 precision (no F64)
//! - **CUDA**: Requires CUDA 12.x toolkit installed
//!
//! # Example
//!
//! ```
//! # use numr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
//! # use numr::tensor::Tensor;
//! use imagr::registration::{
//!     PhaseCorrelationAlgorithms, PhaseCorrelationParams, RegistrationMethod,
//! };
//! # let device = CpuDevice::new();
//! # let client = CpuClient::new(device.clone());
//! # let data: Vec<f64> = (0..64).map(|i| (i as f64 * 0.37).sin()).collect();
//! # let reference = Tensor::<CpuRuntime>::from_slice(&data, &[8, 8], &device);
//! # let moving = reference.clone();
//! let method = RegistrationMethod::PhaseCorrelation(
//!     PhaseCorrelationParams::new().with_upsample_factor(10.0),
//! );
//! let result = client.phase_cross_correlation(&reference, &moving, &method)?;
//! assert_eq!(result.shifts.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod morphology;
pub mod registration;
pub mod transform;

// Re-export main types for convenience
pub use morphology::FootprintAlgorithms;
pub use registration::{
    CorrelationSpace, MaskedCorrelationParams, MaskedPhaseCorrelationAlgorithms,
    PhaseCorrelationAlgorithms, PhaseCorrelationParams, Registration, RegistrationError,
    RegistrationMethod, RegistrationResult,
};
pub use transform::{
    BoundaryMode, InterpolationOrder, ResampleAlgorithms, TransformError, TransformResult,
    WarpAlgorithms,
};

// Re-export numr types that users will commonly need
pub use numr::dtype::DType;
pub use numr::error::{Error, Result};
pub use numr::runtime::{Runtime, RuntimeClient};
pub use numr::tensor::Tensor;
