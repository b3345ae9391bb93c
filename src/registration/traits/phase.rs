//! Phase cross-correlation algorithm traits.
use crate::DType;

use crate::registration::error::{RegistrationError, RegistrationResult};
use numr::runtime::Runtime;
use numr::tensor::Tensor;
use std::str::FromStr;

/// Interpretation of the input arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorrelationSpace {
    /// Spatial-domain data; forward FFTs are applied before correlating.
    #[default]
    Real,
    /// The inputs are already frequency-domain arrays; the forward FFT is
    /// bypassed.
    Fourier,
}

impl FromStr for CorrelationSpace {
    type Err = RegistrationError;

    /// Case-insensitive parse of the `"real"` / `"fourier"` space names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("real") {
            Ok(Self::Real)
        } else if s.eq_ignore_ascii_case("fourier") {
            Ok(Self::Fourier)
        } else {
            Err(RegistrationError::InvalidParameter {
                parameter: "space".to_string(),
                message: format!("space must be \"real\" or \"fourier\", got \"{}\"", s),
            })
        }
    }
}

/// Parameters for the unmasked phase cross-correlation route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseCorrelationParams {
    /// Images are registered to within `1 / upsample_factor` of a pixel.
    /// `1.0` (the default) disables the subpixel refinement stage.
    pub upsample_factor: f64,
    /// Whether the inputs are spatial-domain or frequency-domain arrays.
    pub space: CorrelationSpace,
    /// If true (the default), the translation-invariant RMS error and the
    /// global phase difference are computed alongside the shift vector.
    pub return_error: bool,
}

impl PhaseCorrelationParams {
    /// Default parameters: no upsampling, real-space inputs, metrics on.
    pub fn new() -> Self {
        Self {
            upsample_factor: 1.0,
            space: CorrelationSpace::Real,
            return_error: true,
        }
    }

    /// Set the upsampling factor.
    pub fn with_upsample_factor(mut self, upsample_factor: f64) -> Self {
        self.upsample_factor = upsample_factor;
        self
    }

    /// Set the input space.
    pub fn with_space(mut self, space: CorrelationSpace) -> Self {
        self.space = space;
        self
    }

    /// Enable or disable the error/phase metrics.
    pub fn with_return_error(mut self, return_error: bool) -> Self {
        self.return_error = return_error;
        self
    }
}

impl Default for PhaseCorrelationParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for the masked phase cross-correlation route.
#[derive(Debug, Clone)]
pub struct MaskedCorrelationParams<R: Runtime<DType = DType>> {
    /// Valid-pixel mask for the reference image (nonzero = valid).
    pub reference_mask: Tensor<R>,
    /// Valid-pixel mask for the moving image. Defaults to `reference_mask`
    /// when absent.
    pub moving_mask: Option<Tensor<R>>,
    /// Minimum fraction of overlapping valid pixels for a candidate shift to
    /// be considered (default: 0.3).
    pub overlap_ratio: f64,
}

impl<R: Runtime<DType = DType>> MaskedCorrelationParams<R> {
    /// Masked parameters with the default overlap ratio.
    pub fn new(reference_mask: Tensor<R>) -> Self {
        Self {
            reference_mask,
            moving_mask: None,
            overlap_ratio: 0.3,
        }
    }

    /// Set a separate mask for the moving image.
    pub fn with_moving_mask(mut self, moving_mask: Tensor<R>) -> Self {
        self.moving_mask = Some(moving_mask);
        self
    }

    /// Set the minimum overlap ratio.
    pub fn with_overlap_ratio(mut self, overlap_ratio: f64) -> Self {
        self.overlap_ratio = overlap_ratio;
        self
    }
}

/// Registration route selection.
///
/// The two routes are mutually exclusive and return different amounts of
/// information, so the choice is a tagged variant rather than a pair of
/// nullable mask parameters: the masked route never produces error/phase
/// metrics, and the unmasked parameters do not apply to it.
#[derive(Debug, Clone)]
pub enum RegistrationMethod<R: Runtime<DType = DType>> {
    /// Plain phase cross-correlation over fully valid images.
    PhaseCorrelation(PhaseCorrelationParams),
    /// Masked normalized cross-correlation for images with invalid pixels.
    MaskedPhaseCorrelation(MaskedCorrelationParams<R>),
}

/// Result of a registration call.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    /// Shift (in pixels, image axis order) to apply to the moving image to
    /// register it onto the reference image.
    pub shifts: Vec<f64>,

    /// Translation-invariant normalized RMS error between the images.
    /// `Some` only when the unmasked route ran with `return_error`.
    pub error: Option<f64>,

    /// Global phase difference between the images, in `(-pi, pi]`. Zero for
    /// non-negative images. `Some` under the same conditions as `error`.
    pub phase_diff: Option<f64>,
}

/// Algorithmic contract for translation registration by phase correlation.
///
/// All backends implementing registration MUST implement this trait using
/// the EXACT SAME ALGORITHMS to ensure numerical parity.
pub trait PhaseCorrelationAlgorithms<R: Runtime<DType = DType>> {
    /// Efficient subpixel image translation registration by cross-correlation.
    ///
    /// Obtains an initial estimate of the cross-correlation peak by an FFT,
    /// then refines the shift estimate by upsampling the DFT in a small
    /// neighborhood of that estimate by means of a matrix-multiply DFT,
    /// giving the same precision as FFT upsampling at a fraction of the
    /// computation and memory cost.
    ///
    /// # Arguments
    ///
    /// * `reference_image` - Reference image (`F32`/`F64` spatial data, or
    ///   `Complex64`/`Complex128` in either space)
    /// * `moving_image` - Image to register; must match `reference_image` in
    ///   shape and dtype
    /// * `method` - Route selection and its parameters
    ///
    /// # Returns
    ///
    /// The shift vector required to register `moving_image` with
    /// `reference_image`, with error/phase metrics when requested. Axis
    /// ordering matches the image's own axes (row-major), not an x/y screen
    /// convention.
    ///
    /// # Errors
    ///
    /// * `ShapeMismatch` - reference and moving shapes differ
    /// * `InvalidParameter` - `upsample_factor < 1`, a non-power-of-two axis
    ///   on the FFT route, or an unsupported dtype
    /// * `NonFiniteInput` - NaNs detected while computing the metrics
    fn phase_cross_correlation(
        &self,
        reference_image: &Tensor<R>,
        moving_image: &Tensor<R>,
        method: &RegistrationMethod<R>,
    ) -> RegistrationResult<Registration>;
}
