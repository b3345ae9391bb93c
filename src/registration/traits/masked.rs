//! Masked phase cross-correlation trait.
use crate::DType;

use crate::registration::error::RegistrationResult;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Algorithmic contract for masked translation registration.
///
/// Implements masked normalized cross-correlation (Padfield): correlation
/// statistics are computed only over pixels that are valid in both images at
/// each candidate shift, so occlusions, sensor defects, and NaN regions can
/// be excluded instead of corrupting the correlation surface.
pub trait MaskedPhaseCorrelationAlgorithms<R: Runtime<DType = DType>> {
    /// Masked image translation registration by normalized cross-correlation.
    ///
    /// # Arguments
    ///
    /// * `reference_image` - Reference image
    /// * `moving_image` - Image to register; must match the reference shape
    /// * `reference_mask` - Valid-pixel mask for the reference (nonzero =
    ///   valid), same shape as the images
    /// * `moving_mask` - Valid-pixel mask for the moving image; when `None`,
    ///   `reference_mask` is used for both
    /// * `overlap_ratio` - Minimum fraction of overlapping valid pixels,
    ///   relative to the best achievable overlap, for a candidate shift to be
    ///   considered. Lower values admit larger translations; higher values
    ///   are more robust against spurious matches in small overlaps.
    ///
    /// # Returns
    ///
    /// The integer-pixel shift vector required to register `moving_image`
    /// with `reference_image`, in image axis order. This route resolves whole
    /// pixels only and produces no error/phase metrics.
    fn masked_phase_cross_correlation(
        &self,
        reference_image: &Tensor<R>,
        moving_image: &Tensor<R>,
        reference_mask: &Tensor<R>,
        moving_mask: Option<&Tensor<R>>,
        overlap_ratio: f64,
    ) -> RegistrationResult<Vec<f64>>;
}
