//! Generic image warp implementations.
//!
//! Each warp only decides an output extent and an inverse affine map, then
//! hands resampling to `affine_transform_impl`.
use crate::DType;

use super::resample::{affine_transform_impl, validate_resample_dtype};
use crate::transform::error::{TransformError, TransformResult};
use crate::transform::traits::resample::{BoundaryMode, InterpolationOrder};
use numr::ops::{CompareOps, ScalarOps, TypeConversionOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Generic warp implementation: an inverse affine map given explicitly.
pub fn warp_impl<R, C>(
    client: &C,
    image: &Tensor<R>,
    matrix: &Tensor<R>,
    offset: &Tensor<R>,
    output_shape: Option<&[usize]>,
    order: InterpolationOrder,
    mode: BoundaryMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: ScalarOps<R> + CompareOps<R> + RuntimeClient<R>,
{
    affine_transform_impl(client, image, matrix, offset, output_shape, order, mode)
}

/// Generic resize implementation.
///
/// Pixel-area alignment: output sample `o` along an axis reads input position
/// `(o + 0.5) * n_in / n_out - 0.5`, so the image extent (not the corner
/// samples) is preserved under scaling.
pub fn resize_impl<R, C>(
    client: &C,
    image: &Tensor<R>,
    output_shape: &[usize],
    order: InterpolationOrder,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: ScalarOps<R> + CompareOps<R> + TypeConversionOps<R> + RuntimeClient<R>,
{
    let ndim = image.ndim();
    let dtype = image.dtype();
    validate_resample_dtype(dtype, "resize")?;
    if output_shape.len() != ndim {
        return Err(TransformError::DimensionMismatch {
            expected: ndim,
            actual: output_shape.len(),
            context: "resize: output_shape must have one entry per axis".to_string(),
        });
    }
    if output_shape.contains(&0) {
        return Err(TransformError::InvalidParameter {
            parameter: "output_shape".to_string(),
            message: format!("axis lengths must be nonzero, got {:?}", output_shape),
        });
    }

    let device = client.device();
    let factors: Vec<f64> = image
        .shape()
        .iter()
        .zip(output_shape.iter())
        .map(|(&n_in, &n_out)| n_in as f64 / n_out as f64)
        .collect();

    let mut matrix_data = vec![0.0f64; ndim * ndim];
    let mut offset_data = vec![0.0f64; ndim];
    for d in 0..ndim {
        matrix_data[d * ndim + d] = factors[d];
        offset_data[d] = 0.5 * factors[d] - 0.5;
    }

    let matrix = Tensor::<R>::from_slice(&matrix_data, &[ndim, ndim], device);
    let matrix = client.cast(&matrix, dtype)?;
    let offset = Tensor::<R>::from_slice(&offset_data, &[ndim], device);
    let offset = client.cast(&offset, dtype)?;

    affine_transform_impl(
        client,
        image,
        &matrix,
        &offset,
        Some(output_shape),
        order,
        BoundaryMode::Edge,
    )
}

/// Generic rescale implementation: per-axis scale factors, resolved to a
/// rounded output shape and resized.
pub fn rescale_impl<R, C>(
    client: &C,
    image: &Tensor<R>,
    scale: &[f64],
    order: InterpolationOrder,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: ScalarOps<R> + CompareOps<R> + TypeConversionOps<R> + RuntimeClient<R>,
{
    let ndim = image.ndim();
    let factors: Vec<f64> = if scale.len() == ndim {
        scale.to_vec()
    } else if scale.len() == 1 {
        vec![scale[0]; ndim]
    } else {
        return Err(TransformError::DimensionMismatch {
            expected: ndim,
            actual: scale.len(),
            context: "rescale: scale must be a single factor or one per axis".to_string(),
        });
    };
    if factors.iter().any(|&f| !(f > 0.0)) {
        return Err(TransformError::InvalidParameter {
            parameter: "scale".to_string(),
            message: format!("factors must be positive, got {:?}", factors),
        });
    }

    let output_shape: Vec<usize> = image
        .shape()
        .iter()
        .zip(factors.iter())
        .map(|(&n, &f)| ((n as f64 * f).round() as usize).max(1))
        .collect();

    resize_impl(client, image, &output_shape, order)
}

/// Generic rotate implementation: rotation in the plane of the two leading
/// axes, anchored at the image center.
pub fn rotate_impl<R, C>(
    client: &C,
    image: &Tensor<R>,
    angle: f64,
    resize: bool,
    order: InterpolationOrder,
    mode: BoundaryMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: ScalarOps<R> + CompareOps<R> + TypeConversionOps<R> + RuntimeClient<R>,
{
    let ndim = image.ndim();
    let dtype = image.dtype();
    validate_resample_dtype(dtype, "rotate")?;
    if ndim < 2 {
        return Err(TransformError::InvalidParameter {
            parameter: "image".to_string(),
            message: "rotate requires at least 2D input".to_string(),
        });
    }

    let device = client.device();
    let shape = image.shape().to_vec();
    let angle_rad = angle.to_radians();
    let cos_a = angle_rad.cos();
    let sin_a = angle_rad.sin();

    // Inverse map restricted to the leading plane; remaining axes pass
    // through unchanged.
    let mut matrix_data = vec![0.0f64; ndim * ndim];
    for d in 0..ndim {
        matrix_data[d * ndim + d] = 1.0;
    }
    matrix_data[0] = cos_a;
    matrix_data[1] = sin_a;
    matrix_data[ndim] = -sin_a;
    matrix_data[ndim + 1] = cos_a;

    let rows = shape[0] as f64;
    let cols = shape[1] as f64;
    let center_in_0 = (rows - 1.0) / 2.0;
    let center_in_1 = (cols - 1.0) / 2.0;

    let (output_shape, center_out_0, center_out_1) = if resize {
        let new_rows = (rows * cos_a.abs() + cols * sin_a.abs()).ceil() as usize;
        let new_cols = (rows * sin_a.abs() + cols * cos_a.abs()).ceil() as usize;
        let mut out = shape.clone();
        out[0] = new_rows;
        out[1] = new_cols;
        let c0 = (new_rows as f64 - 1.0) / 2.0;
        let c1 = (new_cols as f64 - 1.0) / 2.0;
        (out, c0, c1)
    } else {
        (shape.clone(), center_in_0, center_in_1)
    };

    // offset = center_in - matrix @ center_out
    let mut offset_data = vec![0.0f64; ndim];
    offset_data[0] = center_in_0 - cos_a * center_out_0 - sin_a * center_out_1;
    offset_data[1] = center_in_1 + sin_a * center_out_0 - cos_a * center_out_1;

    let matrix = Tensor::<R>::from_slice(&matrix_data, &[ndim, ndim], device);
    let matrix = client.cast(&matrix, dtype)?;
    let offset = Tensor::<R>::from_slice(&offset_data, &[ndim], device);
    let offset = client.cast(&offset, dtype)?;

    affine_transform_impl(
        client,
        image,
        &matrix,
        &offset,
        Some(&output_shape),
        order,
        mode,
    )
}
