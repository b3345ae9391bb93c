//! Generic phase cross-correlation implementation.
//!
//! Port of Manuel Guizar's efficient subpixel registration algorithm
//! (Guizar-Sicairos, Thurman, Fienup, "Efficient subpixel image registration
//! algorithms", Optics Letters 33, 156-158, 2008): a whole-array FFT locates
//! the integer-pixel correlation peak, then a matrix-multiply DFT upsamples a
//! small neighborhood of that peak to the requested subpixel resolution.
use crate::DType;

use super::helpers::{
    argmax_magnitude, complex_to_vec, fftn_impl, normalized_energy, to_complex, unravel_index,
    zero_degenerate_axes,
};
use super::masked::masked_phase_cross_correlation_impl;
use super::upsampled_dft::upsampled_dft_impl;
use crate::registration::error::{RegistrationError, RegistrationResult};
use crate::registration::traits::phase::{
    CorrelationSpace, PhaseCorrelationParams, Registration, RegistrationMethod,
};
use crate::registration::validate_image_dtype;
use numr::algorithm::fft::{FftAlgorithms, FftDirection};
use numr::dtype::Complex128;
use numr::error::Error;
use numr::ops::TensorOps;
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Dispatch a registration call to the route selected by `method`.
///
/// The masked route bypasses the phase-correlation pipeline entirely; its
/// result carries shifts only.
pub fn register_translation_impl<R, C>(
    client: &C,
    reference_image: &Tensor<R>,
    moving_image: &Tensor<R>,
    method: &RegistrationMethod<R>,
) -> RegistrationResult<Registration>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + FftAlgorithms<R> + RuntimeClient<R>,
{
    match method {
        RegistrationMethod::PhaseCorrelation(params) => {
            phase_correlation_impl(client, reference_image, moving_image, params)
        }
        RegistrationMethod::MaskedPhaseCorrelation(params) => {
            let shifts = masked_phase_cross_correlation_impl(
                client,
                reference_image,
                moving_image,
                &params.reference_mask,
                params.moving_mask.as_ref(),
                params.overlap_ratio,
            )?;
            Ok(Registration {
                shifts,
                error: None,
                phase_diff: None,
            })
        }
    }
}

/// The unmasked pipeline: validate, transform, locate, refine, measure.
fn phase_correlation_impl<R, C>(
    client: &C,
    reference_image: &Tensor<R>,
    moving_image: &Tensor<R>,
    params: &PhaseCorrelationParams,
) -> RegistrationResult<Registration>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + FftAlgorithms<R> + RuntimeClient<R>,
{
    // Images must agree in shape before any numeric work happens.
    if reference_image.shape() != moving_image.shape() {
        return Err(RegistrationError::ShapeMismatch {
            expected: reference_image.shape().to_vec(),
            got: moving_image.shape().to_vec(),
            context: "phase_cross_correlation".to_string(),
        });
    }
    validate_image_dtype(reference_image.dtype(), "phase_cross_correlation")?;
    if reference_image.dtype() != moving_image.dtype() {
        return Err(Error::DTypeMismatch {
            lhs: reference_image.dtype(),
            rhs: moving_image.dtype(),
        }
        .into());
    }
    if params.upsample_factor < 1.0 {
        return Err(RegistrationError::InvalidParameter {
            parameter: "upsample_factor".to_string(),
            message: format!("must be >= 1, got {}", params.upsample_factor),
        });
    }
    // The FFT backend is radix-2; reject unusable sizes up front rather than
    // part-way through the pipeline.
    for &n in reference_image.shape() {
        if !n.is_power_of_two() {
            return Err(RegistrationError::InvalidParameter {
                parameter: "reference_image".to_string(),
                message: format!(
                    "this route requires power-of-two axis lengths, got {:?}; \
                     pad the images or use the masked route",
                    reference_image.shape()
                ),
            });
        }
    }

    let shape = reference_image.shape().to_vec();
    let ndim = shape.len();

    // Complex data in fourier space is used as-is; real data gets FFT'd.
    let (src_freq, target_freq) = match params.space {
        CorrelationSpace::Fourier => (
            to_complex(client, reference_image)?,
            to_complex(client, moving_image)?,
        ),
        CorrelationSpace::Real => (
            fftn_impl(client, reference_image, FftDirection::Forward)?,
            fftn_impl(client, moving_image, FftDirection::Forward)?,
        ),
    };

    // Whole-pixel shift: cross-power spectrum and one inverse FFT.
    let image_product = client.mul(&src_freq, &client.conj(&target_freq)?)?;
    let cross_correlation = fftn_impl(client, &image_product, FftDirection::Inverse)?;

    let cc = complex_to_vec(&cross_correlation)?;
    let peak_flat = argmax_magnitude(&cc);
    let maxima = unravel_index(peak_flat, &shape);

    // Indices past the midpoint are negative shifts (circular correlation).
    let mut shifts: Vec<f64> = maxima
        .iter()
        .zip(shape.iter())
        .map(|(&idx, &n)| {
            let midpoint = (n / 2) as f64;
            if idx as f64 > midpoint {
                idx as f64 - n as f64
            } else {
                idx as f64
            }
        })
        .collect();

    let mut ccmax = cc[peak_flat];
    let mut src_amp = 0.0;
    let mut target_amp = 0.0;

    if params.upsample_factor == 1.0 {
        if params.return_error {
            src_amp = normalized_energy(&complex_to_vec(&src_freq)?, true);
            target_amp = normalized_energy(&complex_to_vec(&target_freq)?, true);
        }
    } else {
        // Refine the estimate with a matrix-multiply DFT around the coarse
        // peak, at the requested resolution.
        let upsample_factor = params.upsample_factor;

        // Snap the initial estimate to the upsampled grid.
        for shift in shifts.iter_mut() {
            *shift = (*shift * upsample_factor).round() / upsample_factor;
        }
        let upsampled_region_size = (1.5 * upsample_factor).ceil() as usize;
        // Center of the output window at dftshift.
        let dftshift = (upsampled_region_size / 2) as f64;
        let sample_region_offset: Vec<f64> = shifts
            .iter()
            .map(|&shift| dftshift - shift * upsample_factor)
            .collect();

        // Evaluating the conjugate and conjugating back keeps the sign
        // convention of the coarse stage while reducing phase error.
        let upsampled = upsampled_dft_impl(
            client,
            &client.conj(&image_product)?,
            &[upsampled_region_size],
            upsample_factor,
            Some(&sample_region_offset),
        )?;
        let upsampled = client.conj(&upsampled)?;

        let window = complex_to_vec(&upsampled)?;
        let window_shape = vec![upsampled_region_size; ndim];
        let peak_flat = argmax_magnitude(&window);
        ccmax = window[peak_flat];

        let peak = unravel_index(peak_flat, &window_shape);
        for (shift, &p) in shifts.iter_mut().zip(peak.iter()) {
            *shift += (p as f64 - dftshift) / upsample_factor;
        }

        if params.return_error {
            src_amp = normalized_energy(&complex_to_vec(&src_freq)?, false);
            target_amp = normalized_energy(&complex_to_vec(&target_freq)?, false);
        }
    }

    // A single-sample axis carries no shift information; zero it regardless
    // of what the peak search produced.
    zero_degenerate_axes(&mut shifts, &shape);

    if params.return_error {
        if ccmax.re.is_nan() || ccmax.im.is_nan() || src_amp.is_nan() || target_amp.is_nan() {
            return Err(RegistrationError::NonFiniteInput);
        }
        Ok(Registration {
            shifts,
            error: Some(compute_error(ccmax, src_amp, target_amp)),
            phase_diff: Some(compute_phasediff(ccmax)),
        })
    } else {
        Ok(Registration {
            shifts,
            error: None,
            phase_diff: None,
        })
    }
}

/// Global phase difference between the two images, from the complex value of
/// the correlation peak. Zero for non-negative images.
fn compute_phasediff(ccmax: Complex128) -> f64 {
    ccmax.im.atan2(ccmax.re)
}

/// Translation-invariant normalized RMS error between the images.
///
/// The absolute value clamps the tiny negative arguments that floating-point
/// cancellation produces when the images are nearly identical.
fn compute_error(ccmax: Complex128, src_amp: f64, target_amp: f64) -> f64 {
    let peak_power = ccmax.re * ccmax.re + ccmax.im * ccmax.im;
    (1.0 - peak_power / (src_amp * target_amp)).abs().sqrt()
}
