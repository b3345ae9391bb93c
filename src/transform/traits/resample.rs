//! Geometric resampling traits.
//!
//! The resampler is the generic primitive every warp in this crate is built
//! on: evaluate an image at arbitrary fractional coordinates.
use crate::DType;

use crate::transform::error::TransformResult;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Interpolation order for resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationOrder {
    /// Nearest neighbor interpolation (order 0).
    Nearest,
    /// Bilinear/trilinear interpolation (order 1).
    #[default]
    Linear,
}

/// Handling of coordinates outside the input extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoundaryMode {
    /// Produce a constant value: k k k k | a b c d | k k k k
    Constant(f64),
    /// Clamp to the nearest edge value: a a a a | a b c d | d d d d
    #[default]
    Edge,
}

/// Algorithmic contract for geometric resampling.
///
/// All backends implementing resampling MUST implement this trait using the
/// EXACT SAME ALGORITHMS to ensure numerical parity.
pub trait ResampleAlgorithms<R: Runtime<DType = DType>> {
    /// Evaluate `input` at fractional coordinates.
    ///
    /// # Arguments
    ///
    /// * `input` - Input tensor (`F32` or `F64`)
    /// * `coordinates` - Tensor of shape `[ndim, ...output_shape]`; each slice
    ///   along dim 0 holds the input-space coordinates for that axis
    /// * `order` - Interpolation order
    /// * `mode` - Handling of coordinates outside the input extent
    ///
    /// # Returns
    ///
    /// Output tensor with shape `coordinates.shape()[1..]`.
    fn map_coordinates(
        &self,
        input: &Tensor<R>,
        coordinates: &Tensor<R>,
        order: InterpolationOrder,
        mode: BoundaryMode,
    ) -> TransformResult<Tensor<R>>;

    /// Apply an affine transformation to an N-dimensional array.
    ///
    /// Maps output coordinates to input coordinates via
    /// `input_coords = matrix @ output_coords + offset` and resamples.
    ///
    /// # Arguments
    ///
    /// * `input` - Input tensor
    /// * `matrix` - Transformation matrix of shape `[ndim, ndim]`
    /// * `offset` - Translation offset of shape `[ndim]`
    /// * `output_shape` - Shape of the output tensor (input shape if `None`)
    /// * `order` - Interpolation order
    /// * `mode` - Handling of coordinates outside the input extent
    fn affine_transform(
        &self,
        input: &Tensor<R>,
        matrix: &Tensor<R>,
        offset: &Tensor<R>,
        output_shape: Option<&[usize]>,
        order: InterpolationOrder,
        mode: BoundaryMode,
    ) -> TransformResult<Tensor<R>>;
}
