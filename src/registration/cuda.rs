//! CUDA implementation of the registration algorithms.
//!
//! This module implements the [`PhaseCorrelationAlgorithms`] and
//! [`MaskedPhaseCorrelationAlgorithms`] traits for CUDA by delegating to the
//! generic implementations in `impl_generic/`.

use crate::registration::error::RegistrationResult;
use crate::registration::impl_generic::{
    masked_phase_cross_correlation_impl, register_translation_impl,
};
use crate::registration::{
    MaskedPhaseCorrelationAlgorithms, PhaseCorrelationAlgorithms, Registration,
    RegistrationMethod,
};
use numr::runtime::cuda::{CudaClient, CudaRuntime};
use numr::tensor::Tensor;

impl PhaseCorrelationAlgorithms<CudaRuntime> for CudaClient {
    fn phase_cross_correlation(
        &self,
        reference_image: &Tensor<CudaRuntime>,
        moving_image: &Tensor<CudaRuntime>,
        method: &RegistrationMethod<CudaRuntime>,
    ) -> RegistrationResult<Registration> {
        register_translation_impl(self, reference_image, moving_image, method)
    }
}

impl MaskedPhaseCorrelationAlgorithms<CudaRuntime> for CudaClient {
    fn masked_phase_cross_correlation(
        &self,
        reference_image: &Tensor<CudaRuntime>,
        moving_image: &Tensor<CudaRuntime>,
        reference_mask: &Tensor<CudaRuntime>,
        moving_mask: Option<&Tensor<CudaRuntime>>,
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
