//! Upsampled DFT by matrix multiplication.
use crate::DType;

use crate::registration::error::{RegistrationError, RegistrationResult};
use numr::dtype::{Complex64, Complex128};
use numr::error::Error;
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;
use std::f64::consts::PI;

/// Evaluate an upsampled, shifted DFT of `data` over a small output window.
///
/// Produces the same values as embedding `data` in an array `upsample_factor`
/// times larger per axis, taking its FFT, and extracting an
/// `upsampled_region_size` window starting at `axis_offsets`. The window is
/// computed directly instead, one complex exponential kernel matrix and one
/// contraction per axis, so the zero-padded array is never materialized. Much
/// faster and more memory efficient than zero-padded FFT upsampling whenever
/// the window is small relative to `data.numel() * upsample_factor`.
///
/// # Arguments
///
/// * `data` - Complex input array (the DFT of the original data)
/// * `upsampled_region_size` - Output window size; a single value is
///   broadcast to every axis, otherwise one value per axis is required
/// * `upsample_factor` - The upsampling factor
/// * `axis_offsets` - Per-axis offsets of the sampled window; `None` centers
///   the window at zero offset
///
/// # Errors
///
/// `InvalidParameter` when a region-size or offset sequence does not match
/// the dimensionality of `data`; `UnsupportedDType` for non-complex input.
pub fn upsampled_dft_impl<R, C>(
    client: &C,
    data: &Tensor<R>,
    upsampled_region_size: &[usize],
    upsample_factor: f64,
    axis_offsets: Option<&[f64]>,
) -> RegistrationResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: RuntimeClient<R>,
{
    let ndim = data.ndim();

    let region: Vec<usize> = if upsampled_region_size.len() == ndim {
        upsampled_region_size.to_vec()
    } else if upsampled_region_size.len() == 1 {
        vec![upsampled_region_size[0]; ndim]
    } else {
        return Err(RegistrationError::InvalidParameter {
            parameter: "upsampled_region_size".to_string(),
            message: format!(
                "region size count ({}) must equal the input dimensionality ({})",
                upsampled_region_size.len(),
                ndim
            ),
        });
    };

    let offsets: Vec<f64> = match axis_offsets {
        None => vec![0.0; ndim],
        Some(offsets) if offsets.len() == ndim => offsets.to_vec(),
        Some(offsets) => {
            return Err(RegistrationError::InvalidParameter {
                parameter: "axis_offsets".to_string(),
                message: format!(
                    "axis offset count ({}) must equal the input dimensionality ({})",
                    offsets.len(),
                    ndim
                ),
            });
        }
    };

    let contig = data.contiguous()?;
    let shape = contig.shape().to_vec();

    // Kernels are built in the same precision as the data.
    match contig.dtype() {
        DType::Complex64 => {
            let host: Vec<Complex64> = contig.to_vec();
            let out = contract_c64(&host, &shape, &region, upsample_factor, &offsets);
            Ok(Tensor::<R>::from_slice(&out, &region, client.device()))
        }
        DType::Complex128 => {
            let host: Vec<Complex128> = contig.to_vec();
            let out = contract_c128(&host, &shape, &region, upsample_factor, &offsets);
            Ok(Tensor::<R>::from_slice(&out, &region, client.device()))
        }
        dtype => Err(Error::UnsupportedDType {
            dtype,
            op: "upsampled_dft",
        }
        .into()),
    }
}

/// Standard DFT sample frequency for index `c` of an `n`-point transform,
/// as a fraction of the sampling rate: `[0, 1, .., n/2-1, -n/2, .., -1] / n`.
fn fft_sample_frequency(c: usize, n: usize) -> f64 {
    if c < n.div_ceil(2) {
        c as f64 / n as f64
    } else {
        (c as f64 - n as f64) / n as f64
    }
}

/// Contract `data` against one kernel matrix per axis, in reverse axis order.
///
/// Each step consumes the current last axis and prepends the corresponding
/// output axis, so after all D steps the axes come back in their original
/// order. Building one 2-D kernel at a time is the memory-saving core of the
/// algorithm; a combined D-dimensional kernel is never formed.
fn contract_c64(
    data: &[Complex64],
    shape: &[usize],
    region: &[usize],
    upsample_factor: f64,
    offsets: &[f64],
) -> Vec<Complex64> {
    let mut cur = data.to_vec();
    for ax in (0..shape.len()).rev() {
        let n_in = shape[ax];
        let n_out = region[ax];
        let offset = offsets[ax];

        // kernel[r][c] = exp(-2*pi*i * (r - offset) * freq(c) / upsample_factor)
        let mut kernel = Vec::with_capacity(n_out * n_in);
        for r in 0..n_out {
            let shift = r as f64 - offset;
            for c in 0..n_in {
                let theta = -2.0 * PI * shift * fft_sample_frequency(c, n_in) / upsample_factor;
                kernel.push(Complex64::new(theta.cos() as f32, theta.sin() as f32));
            }
        }

        let batch = cur.len() / n_in;
        let mut next = vec![Complex64::ZERO; n_out * batch];
        for r in 0..n_out {
            let krow = &kernel[r * n_in..(r + 1) * n_in];
            for b in 0..batch {
                let row = &cur[b * n_in..(b + 1) * n_in];
                let mut acc = Complex64::ZERO;
                for c in 0..n_in {
                    acc += krow[c] * row[c];
                }
                next[r * batch + b] = acc;
            }
        }
        cur = next;
    }
    cur
}

fn contract_c128(
    data: &[Complex128],
    shape: &[usize],
    region: &[usize],
    upsample_factor: f64,
    offsets: &[f64],
) -> Vec<Complex128> {
    let mut cur = data.to_vec();
    for ax in (0..shape.len()).rev() {
        let n_in = shape[ax];
        let n_out = region[ax];
        let offset = offsets[ax];

        let mut kernel = Vec::with_capacity(n_out * n_in);
        for r in 0..n_out {
            let shift = r as f64 - offset;
            for c in 0..n_in {
                let theta = -2.0 * PI * shift * fft_sample_frequency(c, n_in) / upsample_factor;
                kernel.push(Complex128::new(theta.cos(), theta.sin()));
            }
        }

        let batch = cur.len() / n_in;
        let mut next = vec![Complex128::ZERO; n_out * batch];
        for r in 0..n_out {
            let krow = &kernel[r * n_in..(r + 1) * n_in];
            for b in 0..batch {
                let row = &cur[b * n_in..(b + 1) * n_in];
                let mut acc = Complex128::ZERO;
                for c in 0..n_in {
                    acc += krow[c] * row[c];
                }
                next[r * batch + b] = acc;
            }
        }
        cur = next;
    }
    cur
}
