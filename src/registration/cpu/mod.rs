//! CPU implementation of the registration algorithms.
//!
//! This module implements the [`PhaseCorrelationAlgorithms`] and
//! [`MaskedPhaseCorrelationAlgorithms`] traits for CPU by delegating to the
//! generic implementations in `impl_generic/`.

use crate::registration::error::RegistrationResult;
use crate::registration::impl_generic::{
    masked_phase_cross_correlation_impl, register_translation_impl,
};
use crate::registration::{
    MaskedPhaseCorrelationAlgorithms, PhaseCorrelationAlgorithms, Registration,
    RegistrationMethod,
};
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl PhaseCorrelationAlgorithms<CpuRuntime> for CpuClient {
    fn phase_cross_correlation(
        &self,
        reference_image: &Tensor<CpuRuntime>,
        moving_image: &Tensor<CpuRuntime>,
        method: &RegistrationMethod<CpuRuntime>,
    ) -> RegistrationResult<Registration> {
        register_translation_impl(self, reference_image, moving_image, method)
    }
}

impl MaskedPhaseCorrelationAlgorithms<CpuRuntime> for CpuClient {
    fn masked_phase_cross_correlation(
        &self,
        reference_image: &Tensor<CpuRuntime>,
        moving_image: &Tensor<CpuRuntime>,
        reference_mask: &Tensor<CpuRuntime>,
        moving_mask: Option<&Tensor<CpuRuntime>>,
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

#[cfg(test)]
mod tests;
