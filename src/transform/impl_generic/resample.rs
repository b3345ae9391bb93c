//! Generic resampling implementations.
//!
//! All warps reduce to the same primitive: generate output coordinates, map
//! them into input space, and gather interpolated values. The gather stays on
//! device: corner indices are assembled arithmetically and fetched with
//! `index_select`, weights with elementwise ops.
use crate::DType;

use crate::transform::error::{TransformError, TransformResult};
use crate::transform::traits::resample::{BoundaryMode, InterpolationOrder};
use numr::error::Error;
use numr::ops::{CompareOps, MeshgridIndexing, ScalarOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

pub(crate) fn validate_resample_dtype(dtype: DType, op: &'static str) -> TransformResult<()> {
    match dtype {
        DType::F32 | DType::F64 => Ok(()),
        _ => Err(Error::UnsupportedDType { dtype, op }.into()),
    }
}

/// Generic map_coordinates implementation.
///
/// Nearest order rounds and gathers; linear order gathers all 2^ndim corner
/// neighbors and blends them by fractional weight. Out-of-extent coordinates
/// are clamped for the gather; under `BoundaryMode::Constant` the clamped
/// samples are then replaced through a validity mask.
pub fn map_coordinates_impl<R, C>(
    client: &C,
    input: &Tensor<R>,
    coordinates: &Tensor<R>,
    order: InterpolationOrder,
    mode: BoundaryMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: ScalarOps<R> + CompareOps<R> + RuntimeClient<R>,
{
    let ndim = input.ndim();
    let dtype = input.dtype();
    validate_resample_dtype(dtype, "map_coordinates")?;
    if coordinates.dtype() != dtype {
        return Err(Error::DTypeMismatch {
            lhs: dtype,
            rhs: coordinates.dtype(),
        }
        .into());
    }

    let coord_shape = coordinates.shape().to_vec();
    if coord_shape.is_empty() || coord_shape[0] != ndim {
        return Err(TransformError::DimensionMismatch {
            expected: ndim,
            actual: coord_shape.first().copied().unwrap_or(0),
            context: "map_coordinates: coordinates first dim must match input ndim".to_string(),
        });
    }

    let output_shape = &coord_shape[1..];
    let output_total: usize = output_shape.iter().product();
    let input_shape = input.shape().to_vec();

    let input_flat = input
        .contiguous()?
        .reshape(&[input_shape.iter().product::<usize>()])?;

    // Flattened coordinate array per axis.
    let mut coord_arrays: Vec<Tensor<R>> = Vec::with_capacity(ndim);
    for d in 0..ndim {
        let c = coordinates.narrow(0, d, 1)?;
        let c_flat = c.squeeze(Some(0)).contiguous()?.reshape(&[output_total])?;
        coord_arrays.push(c_flat);
    }

    let interpolated = match order {
        InterpolationOrder::Nearest => {
            // Round, clamp to the extent, and gather.
            let mut flat_idx = client.fill(&[output_total], 0.0, dtype)?;
            let mut stride = 1.0f64;

            for d in (0..ndim).rev() {
                let rounded = client.round(&coord_arrays[d])?;
                let clamped = client.clamp(&rounded, 0.0, (input_shape[d] - 1) as f64)?;
                let contribution = client.mul_scalar(&clamped, stride)?;
                flat_idx = client.add(&flat_idx, &contribution)?;
                stride *= input_shape[d] as f64;
            }

            let idx_int = client.cast(&flat_idx, DType::I64)?;
            client.index_select(&input_flat, 0, &idx_int)?
        }
        InterpolationOrder::Linear => {
            let num_corners = 1usize << ndim;

            let mut floors: Vec<Tensor<R>> = Vec::with_capacity(ndim);
            let mut weights: Vec<Tensor<R>> = Vec::with_capacity(ndim);
            for d in 0..ndim {
                let f = client.floor(&coord_arrays[d])?;
                let w = client.sub(&coord_arrays[d], &f)?;
                floors.push(client.clamp(&f, 0.0, (input_shape[d] - 1) as f64)?);
                weights.push(w);
            }

            // Blend the 2^ndim corner neighbors.
            let mut result = client.fill(&[output_total], 0.0, dtype)?;
            for corner in 0..num_corners {
                let mut flat_idx = client.fill(&[output_total], 0.0, dtype)?;
                let mut corner_weight = client.fill(&[output_total], 1.0, dtype)?;
                let mut stride = 1.0f64;

                for d in (0..ndim).rev() {
                    let use_ceil = (corner >> d) & 1 == 1;

                    let coord = if use_ceil {
                        let ceil = client.add_scalar(&floors[d], 1.0)?;
                        client.clamp(&ceil, 0.0, (input_shape[d] - 1) as f64)?
                    } else {
                        floors[d].clone()
                    };

                    let w = if use_ceil {
                        weights[d].clone()
                    } else {
                        client.rsub_scalar(&weights[d], 1.0)?
                    };

                    corner_weight = client.mul(&corner_weight, &w)?;
                    let contribution = client.mul_scalar(&coord, stride)?;
                    flat_idx = client.add(&flat_idx, &contribution)?;
                    stride *= input_shape[d] as f64;
                }

                let idx_int = client.cast(&flat_idx, DType::I64)?;
                let values = client.index_select(&input_flat, 0, &idx_int)?;
                let weighted = client.mul(&values, &corner_weight)?;
                result = client.add(&result, &weighted)?;
            }
            result
        }
    };

    let result = match mode {
        BoundaryMode::Edge => interpolated,
        BoundaryMode::Constant(cval) => {
            // Validity mask: inside the extent along every axis. Nearest
            // order owns the half-pixel band around the edge samples.
            let slack = match order {
                InterpolationOrder::Nearest => 0.5,
                InterpolationOrder::Linear => 0.0,
            };
            let mut inside = client.fill(&[output_total], 1.0, dtype)?;
            for d in 0..ndim {
                let lower = client.fill(&[output_total], -slack, dtype)?;
                let upper =
                    client.fill(&[output_total], (input_shape[d] - 1) as f64 + slack, dtype)?;
                let above = client.ge(&coord_arrays[d], &lower)?;
                let below = client.le(&coord_arrays[d], &upper)?;
                inside = client.mul(&inside, &client.mul(&above, &below)?)?;
            }
            let fill = client.fill(&[output_total], cval, dtype)?;
            client.where_cond(&inside, &interpolated, &fill)?
        }
    };

    result.reshape(output_shape).map_err(|e| e.into())
}

/// Generic affine_transform implementation.
pub fn affine_transform_impl<R, C>(
    client: &C,
    input: &Tensor<R>,
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
    let ndim = input.ndim();
    let dtype = input.dtype();
    validate_resample_dtype(dtype, "affine_transform")?;
    if matrix.shape() != [ndim, ndim] {
        return Err(TransformError::InvalidParameter {
            parameter: "matrix".to_string(),
            message: format!(
                "expected shape [{}, {}], got {:?}",
                ndim,
                ndim,
                matrix.shape()
            ),
        });
    }
    if offset.shape() != [ndim] {
        return Err(TransformError::InvalidParameter {
            parameter: "offset".to_string(),
            message: format!("expected shape [{}], got {:?}", ndim, offset.shape()),
        });
    }

    let out_shape = output_shape.unwrap_or(input.shape()).to_vec();

    // input_coords = matrix @ output_coords + offset
    let coords_flat = coordinate_grid(client, &out_shape, dtype)?;
    let mapped = client.matmul(matrix, &coords_flat)?;
    let offset_col = offset.reshape(&[ndim, 1])?;
    let mapped = client.add(&mapped, &offset_col)?;

    let mut coord_shape = vec![ndim];
    coord_shape.extend_from_slice(&out_shape);
    let coordinates = mapped.reshape(&coord_shape)?;

    map_coordinates_impl(client, input, &coordinates, order, mode)
}

/// Output coordinate grid of shape `[ndim, total]`, built on device from
/// `arange` + `meshgrid`.
pub(crate) fn coordinate_grid<R, C>(
    client: &C,
    shape: &[usize],
    dtype: DType,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: ScalarOps<R> + RuntimeClient<R>,
{
    let total: usize = shape.iter().product();

    let axes: Vec<Tensor<R>> = shape
        .iter()
        .map(|&s| client.arange(0.0, s as f64, 1.0, dtype))
        .collect::<Result<Vec<_>, _>>()?;

    let axis_refs: Vec<&Tensor<R>> = axes.iter().collect();
    let grids = client.meshgrid(&axis_refs, MeshgridIndexing::Ij)?;

    let flat_grids: Vec<Tensor<R>> = grids
        .into_iter()
        .map(|g| g.reshape(&[total]).map_err(TransformError::from))
        .collect::<TransformResult<Vec<_>>>()?;

    let flat_refs: Vec<&Tensor<R>> = flat_grids.iter().collect();
    client.stack(&flat_refs, 0).map_err(|e| e.into())
}
