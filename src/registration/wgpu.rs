//! WebGPU implementation of the registration algorithms.
//!
//! This module implements the [`PhaseCorrelationAlgorithms`] and
//! [`MaskedPhaseCorrelationAlgorithms`] traits for WebGPU by delegating to
//! the generic implementations in `impl_generic/`.

use crate::registration::error::RegistrationResult;
use crate::registration::impl_generic::{
    masked_phase_cross_correlation_impl, register_translation_impl,
};
use crate::registration::{
    MaskedPhaseCorrelationAlgorithms, PhaseCorrelationAlgorithms, Registration,
    RegistrationMethod,
};
use numr::runtime::wgpu::{WgpuClient, WgpuRuntime};
use numr::tensor::Tensor;

impl PhaseCorrelationAlgorithms<WgpuRuntime> for WgpuClient {
    fn phase_cross_correlation(
        &self,
        reference_image: &Tensor<WgpuRuntime>,
        moving_image: &Tensor<WgpuRuntime>,
        method: &RegistrationMethod<WgpuRuntime>,
    ) -> RegistrationResult<Registration> {
        register_translation_impl(self, reference_image, moving_image, method)
    }
}

impl MaskedPhaseCorrelationAlgorithms<WgpuRuntime> for WgpuClient {
    fn masked_phase_cross_correlation(
        &self,
        reference_image: &Tensor<WgpuRuntime>,
        moving_image: &Tensor<WgpuRuntime>,
        reference_mask: &Tensor<WgpuRuntime>,
        moving_mask: Option<&Tensor<WgpuRuntime>>,
        overlap_ratio: f64,
    ) -> RegistrationResult<Vec<f64>> {
        masked_phase_cross_correlation_impl(
            self,
            reference_image,
            moving_image,
            reference_mask,
            moving_mask,
            overlap_ratio,
        )
    }
}
