//! Generic masked phase cross-correlation implementation.
//!
//! Masked normalized cross-correlation after Padfield ("Masked Object
//! Registration in the Fourier Domain", IEEE TIP 21(5), 2012): correlation
//! statistics are accumulated only over pixels valid in both images at each
//! candidate shift, entirely in the Fourier domain. Invalid pixels never
//! enter the sums, so the route is safe for inputs containing NaN.
use crate::DType;

use super::helpers::{complex_to_vec, fftn_impl};
use crate::registration::error::{RegistrationError, RegistrationResult};
use crate::registration::validate_image_dtype;
use numr::algorithm::fft::{FftAlgorithms, FftDirection};
use numr::dtype::Complex128;
use numr::error::Error;
use numr::ops::TensorOps;
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Masked translation registration.
///
/// Statistics are accumulated in `f64` regardless of the input precision;
/// the variance-style terms cancel catastrophically in `f32`.
pub fn masked_phase_cross_correlation_impl<R, C>(
    client: &C,
    reference_image: &Tensor<R>,
    moving_image: &Tensor<R>,
    reference_mask: &Tensor<R>,
    moving_mask: Option<&Tensor<R>>,
    overlap_ratio: f64,
) -> RegistrationResult<Vec<f64>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + FftAlgorithms<R> + RuntimeClient<R>,
{
    if reference_image.shape() != moving_image.shape() {
        return Err(RegistrationError::ShapeMismatch {
            expected: reference_image.shape().to_vec(),
            got: moving_image.shape().to_vec(),
            context: "masked_phase_cross_correlation".to_string(),
        });
    }
    if reference_mask.shape() != reference_image.shape() {
        return Err(RegistrationError::ShapeMismatch {
            expected: reference_image.shape().to_vec(),
            got: reference_mask.shape().to_vec(),
            context: "masked_phase_cross_correlation (reference_mask)".to_string(),
        });
    }
    if let Some(mask) = moving_mask {
        if mask.shape() != moving_image.shape() {
            return Err(RegistrationError::ShapeMismatch {
                expected: moving_image.shape().to_vec(),
                got: mask.shape().to_vec(),
                context: "masked_phase_cross_correlation (moving_mask)".to_string(),
            });
        }
    }
    if !(overlap_ratio > 0.0 && overlap_ratio <= 1.0) {
        return Err(RegistrationError::InvalidParameter {
            parameter: "overlap_ratio".to_string(),
            message: format!("must lie in (0, 1], got {}", overlap_ratio),
        });
    }
    validate_image_dtype(reference_image.dtype(), "masked_phase_cross_correlation")?;
    validate_image_dtype(moving_image.dtype(), "masked_phase_cross_correlation")?;

    let shape = reference_image.shape().to_vec();

    let reference = real_to_vec(reference_image)?;
    let moving = real_to_vec(moving_image)?;
    let ref_mask = mask_to_vec(reference_mask)?;
    let mov_mask = match moving_mask {
        Some(mask) => mask_to_vec(mask)?,
        None => ref_mask.clone(),
    };

    let xcorr = cross_correlate_masked(
        client,
        &moving,
        &reference,
        &mov_mask,
        &ref_mask,
        &shape,
        overlap_ratio,
    )?;

    // Peak of the correlation surface; ties are averaged so a plateau maps
    // to its center.
    let xcorr_shape: Vec<usize> = shape.iter().map(|&n| 2 * n - 1).collect();
    let max_val = xcorr.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mut center = vec![0.0f64; shape.len()];
    let mut count = 0usize;
    for (flat, &value) in xcorr.iter().enumerate() {
        if value == max_val {
            let mut rem = flat;
            for dim in (0..xcorr_shape.len()).rev() {
                center[dim] += (rem % xcorr_shape[dim]) as f64;
                rem /= xcorr_shape[dim];
            }
            count += 1;
        }
    }

    let shifts = center
        .iter()
        .zip(shape.iter())
        .map(|(&sum, &n)| (n as f64 - 1.0) - sum / count as f64)
        .collect();
    Ok(shifts)
}

/// Full-extent masked normalized cross-correlation of `moving` against
/// `reference`, over all axes. Output shape is `2n - 1` per axis.
fn cross_correlate_masked<R, C>(
    client: &C,
    moving: &[f64],
    reference: &[f64],
    moving_mask: &[bool],
    reference_mask: &[bool],
    shape: &[usize],
    overlap_ratio: f64,
) -> RegistrationResult<Vec<f64>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + FftAlgorithms<R> + RuntimeClient<R>,
{
    let eps = f64::EPSILON;
    let xcorr_shape: Vec<usize> = shape.iter().map(|&n| 2 * n - 1).collect();
    // Linear correlation needs 2n-1 samples per axis; the FFT backend needs
    // powers of two on top of that.
    let padded_shape: Vec<usize> = xcorr_shape.iter().map(|&n| n.next_power_of_two()).collect();

    // Invalid pixels are zeroed by selection, never by multiplication, so a
    // masked NaN cannot leak into the sums.
    let select = |values: &[f64], mask: &[bool]| -> Vec<f64> {
        values
            .iter()
            .zip(mask.iter())
            .map(|(&v, &ok)| if ok { v } else { 0.0 })
            .collect::<Vec<f64>>()
    };
    let moving_z = select(moving, moving_mask);
    // The reference enters the correlation axis-reversed; so does its mask.
    let reference_rot = flip_all(&select(reference, reference_mask), shape);
    let reference_mask_rot = flip_all(
        &reference_mask
            .iter()
            .map(|&ok| if ok { 1.0 } else { 0.0 })
            .collect::<Vec<f64>>(),
        shape,
    );
    let moving_mask_f: Vec<f64> = moving_mask
        .iter()
        .map(|&ok| if ok { 1.0 } else { 0.0 })
        .collect();
    let square = |values: &[f64]| values.iter().map(|&v| v * v).collect::<Vec<f64>>();

    let moving_fft = fft_padded(client, &moving_z, shape, &padded_shape)?;
    let moving_sq_fft = fft_padded(client, &square(&moving_z), shape, &padded_shape)?;
    let moving_mask_fft = fft_padded(client, &moving_mask_f, shape, &padded_shape)?;
    let reference_rot_fft = fft_padded(client, &reference_rot, shape, &padded_shape)?;
    let reference_rot_sq_fft = fft_padded(client, &square(&reference_rot), shape, &padded_shape)?;
    let reference_mask_rot_fft = fft_padded(client, &reference_mask_rot, shape, &padded_shape)?;

    let correlate = |a: &Tensor<R>, b: &Tensor<R>| -> RegistrationResult<Vec<f64>> {
        let product = client.mul(a, b)?;
        let spatial = fftn_impl(client, &product, FftDirection::Inverse)?;
        Ok(complex_to_vec(&spatial)?.iter().map(|c| c.re).collect())
    };

    // Number of valid pixels overlapping at each candidate shift.
    let mut overlap = correlate(&reference_mask_rot_fft, &moving_mask_fft)?;
    for v in overlap.iter_mut() {
        *v = v.round().max(eps);
    }

    // Masked sums of each image over the overlap window.
    let moving_sum = correlate(&reference_mask_rot_fft, &moving_fft)?;
    let reference_sum = correlate(&moving_mask_fft, &reference_rot_fft)?;

    let raw = correlate(&reference_rot_fft, &moving_fft)?;
    let moving_sq_sum = correlate(&reference_mask_rot_fft, &moving_sq_fft)?;
    let reference_sq_sum = correlate(&moving_mask_fft, &reference_rot_sq_fft)?;

    let total: usize = padded_shape.iter().product();
    let mut numerator = vec![0.0f64; total];
    let mut denom = vec![0.0f64; total];
    for i in 0..total {
        numerator[i] = raw[i] - moving_sum[i] * reference_sum[i] / overlap[i];
        let moving_var = (moving_sq_sum[i] - moving_sum[i] * moving_sum[i] / overlap[i]).max(0.0);
        let reference_var =
            (reference_sq_sum[i] - reference_sum[i] * reference_sum[i] / overlap[i]).max(0.0);
        denom[i] = (moving_var * reference_var).sqrt();
    }

    // Keep only the linear-correlation extent.
    let numerator = crop(&numerator, &padded_shape, &xcorr_shape);
    let denom = crop(&denom, &padded_shape, &xcorr_shape);
    let overlap = crop(&overlap, &padded_shape, &xcorr_shape);

    let max_denom = denom.iter().cloned().fold(0.0f64, f64::max);
    let tol = 1e3 * eps * max_denom;
    let max_overlap = overlap.iter().cloned().fold(0.0f64, f64::max);
    let overlap_threshold = overlap_ratio * max_overlap;

    let xcorr = numerator
        .iter()
        .zip(denom.iter())
        .zip(overlap.iter())
        .map(|((&num, &den), &ovl)| {
            if ovl < overlap_threshold || den <= tol {
                0.0
            } else {
                (num / den).clamp(-1.0, 1.0)
            }
        })
        .collect();
    Ok(xcorr)
}

/// Embed `data` at the origin of a zero `padded_shape` buffer and transform.
fn fft_padded<R, C>(
    client: &C,
    data: &[f64],
    shape: &[usize],
    padded_shape: &[usize],
) -> RegistrationResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + FftAlgorithms<R> + RuntimeClient<R>,
{
    let total: usize = padded_shape.iter().product();
    let mut padded = vec![Complex128::ZERO; total];
    for (flat, &value) in data.iter().enumerate() {
        let mut rem = flat;
        let mut padded_flat = 0usize;
        let mut stride = 1usize;
        for dim in (0..shape.len()).rev() {
            padded_flat += (rem % shape[dim]) * stride;
            rem /= shape[dim];
            stride *= padded_shape[dim];
        }
        padded[padded_flat] = Complex128::new(value, 0.0);
    }
    let tensor = Tensor::<R>::from_slice(&padded, padded_shape, client.device());
    fftn_impl(client, &tensor, FftDirection::Forward)
}

/// Reverse an array along every axis.
fn flip_all(data: &[f64], shape: &[usize]) -> Vec<f64> {
    let mut out = vec![0.0f64; data.len()];
    for (flat, &value) in data.iter().enumerate() {
        let mut rem = flat;
        let mut flipped_flat = 0usize;
        let mut stride = 1usize;
        for dim in (0..shape.len()).rev() {
            let idx = rem % shape[dim];
            flipped_flat += (shape[dim] - 1 - idx) * stride;
            rem /= shape[dim];
            stride *= shape[dim];
        }
        out[flipped_flat] = value;
    }
    out
}

/// Extract the leading `out_shape` corner of a row-major `padded_shape` array.
fn crop(data: &[f64], padded_shape: &[usize], out_shape: &[usize]) -> Vec<f64> {
    let total: usize = out_shape.iter().product();
    let mut out = vec![0.0f64; total];
    for (flat, slot) in out.iter_mut().enumerate() {
        let mut rem = flat;
        let mut src_flat = 0usize;
        let mut stride = 1usize;
        for dim in (0..out_shape.len()).rev() {
            src_flat += (rem % out_shape[dim]) * stride;
            rem /= out_shape[dim];
            stride *= padded_shape[dim];
        }
        *slot = data[src_flat];
    }
    out
}

/// Copy a real tensor to the host as `f64`.
fn real_to_vec<R>(tensor: &Tensor<R>) -> RegistrationResult<Vec<f64>>
where
    R: Runtime<DType = DType>,
{
    let contig = tensor.contiguous()?;
    match contig.dtype() {
        DType::F32 => {
            let data: Vec<f32> = contig.to_vec();
            Ok(data.iter().map(|&v| v as f64).collect())
        }
        DType::F64 => Ok(contig.to_vec()),
        dtype => Err(Error::UnsupportedDType {
            dtype,
            op: "real_to_vec",
        }
        .into()),
    }
}

/// Copy a mask tensor to the host; nonzero means valid.
fn mask_to_vec<R>(tensor: &Tensor<R>) -> RegistrationResult<Vec<bool>>
where
    R: Runtime<DType = DType>,
{
    let contig = tensor.contiguous()?;
    match contig.dtype() {
        DType::Bool | DType::U8 => {
            let data: Vec<u8> = contig.to_vec();
            Ok(data.iter().map(|&v| v != 0).collect())
        }
        DType::F32 => {
            let data: Vec<f32> = contig.to_vec();
            Ok(data.iter().map(|&v| v != 0.0).collect())
        }
        DType::F64 => {
            let data: Vec<f64> = contig.to_vec();
            Ok(data.iter().map(|&v| v != 0.0).collect())
        }
        dtype => Err(Error::UnsupportedDType {
            dtype,
            op: "mask_to_vec",
        }
        .into()),
    }
}
