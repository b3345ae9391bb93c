//! Generic helper functions for registration.
//!
//! N-dimensional FFTs are composed from numr's per-axis `fft_dim`; the
//! remaining operations (complex magnitude argmax, energy sums) have no numr
//! primitive and use `to_vec()` host fallbacks, which work for any Runtime.
use crate::DType;

use crate::registration::error::RegistrationResult;
use numr::algorithm::fft::{FftAlgorithms, FftDirection, FftNormalization};
use numr::dtype::{Complex64, Complex128};
use numr::error::Error;
use numr::ops::ComplexOps;
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Promote a real tensor to its matching complex dtype (zero imaginary
/// part); complex tensors pass through unchanged.
pub(crate) fn to_complex<R, C>(client: &C, input: &Tensor<R>) -> RegistrationResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: ComplexOps<R> + RuntimeClient<R>,
{
    let dtype = input.dtype();
    match dtype {
        DType::Complex64 | DType::Complex128 => Ok(input.clone()),
        DType::F32 | DType::F64 => {
            let imag = Tensor::<R>::zeros(input.shape(), dtype, client.device());
            client.make_complex(input, &imag).map_err(Into::into)
        }
        _ => Err(Error::UnsupportedDType {
            dtype,
            op: "to_complex",
        }
        .into()),
    }
}

/// N-dimensional FFT over all axes of `input`.
///
/// Real inputs (`F32`/`F64`) are promoted to the matching complex dtype
/// first. Axes of length 1 are skipped: a single-sample DFT is the identity.
pub fn fftn_impl<R, C>(
    client: &C,
    input: &Tensor<R>,
    direction: FftDirection,
) -> RegistrationResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: FftAlgorithms<R> + ComplexOps<R> + RuntimeClient<R>,
{
    let mut out = to_complex(client, input)?;

    for dim in 0..input.ndim() {
        if input.shape()[dim] == 1 {
            continue;
        }
        out = client.fft_dim(&out, dim as isize, direction, FftNormalization::Backward)?;
    }

    Ok(out)
}

/// Copy a complex tensor to the host as `Complex128`, upconverting
/// `Complex64` data.
pub(crate) fn complex_to_vec<R>(tensor: &Tensor<R>) -> RegistrationResult<Vec<Complex128>>
where
    R: Runtime<DType = DType>,
{
    let contig = tensor.contiguous()?;
    match contig.dtype() {
        DType::Complex64 => {
            let data: Vec<Complex64> = contig.to_vec();
            Ok(data
                .iter()
                .map(|c| Complex128::new(c.re as f64, c.im as f64))
                .collect())
        }
        DType::Complex128 => Ok(contig.to_vec()),
        dtype => Err(Error::UnsupportedDType {
            dtype,
            op: "complex_to_vec",
        }
        .into()),
    }
}

/// Flat index of the sample with the largest magnitude (first maximum wins).
pub(crate) fn argmax_magnitude(data: &[Complex128]) -> usize {
    let mut best = 0usize;
    let mut best_sq = f64::NEG_INFINITY;
    for (i, c) in data.iter().enumerate() {
        let sq = c.re * c.re + c.im * c.im;
        if sq > best_sq {
            best_sq = sq;
            best = i;
        }
    }
    best
}

/// Convert a flat row-major index into a multi-index for `shape`.
pub(crate) fn unravel_index(mut flat: usize, shape: &[usize]) -> Vec<usize> {
    let mut index = vec![0usize; shape.len()];
    for dim in (0..shape.len()).rev() {
        index[dim] = flat % shape[dim];
        flat /= shape[dim];
    }
    index
}

/// Normalized image energy from a frequency-domain array: the sum of squared
/// magnitudes, divided by the sample count when `mean` is set.
pub(crate) fn normalized_energy(freq: &[Complex128], mean: bool) -> f64 {
    let sum: f64 = freq.iter().map(|c| c.re * c.re + c.im * c.im).sum();
    if mean { sum / freq.len() as f64 } else { sum }
}

/// Zero the shift components of single-sample axes.
///
/// An axis of length 1 carries no spatial information, so its shift is
/// defined to be 0 regardless of what the peak search produced. Applied as a
/// final pass over the shift vector, after both the coarse and refined
/// stages.
pub(crate) fn zero_degenerate_axes(shifts: &mut [f64], shape: &[usize]) {
    for (shift, &len) in shifts.iter_mut().zip(shape.iter()) {
        if len == 1 {
            *shift = 0.0;
        }
    }
}
