//! Image warp traits.
use crate::DType;

use crate::transform::error::TransformResult;
use crate::transform::traits::resample::{BoundaryMode, InterpolationOrder};
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Algorithmic contract for image warps.
///
/// Every operation here is a thin consumer of [`super::ResampleAlgorithms`]:
/// it only decides the output extent and the inverse coordinate map.
pub trait WarpAlgorithms<R: Runtime<DType = DType>> {
    /// Warp an image according to an inverse affine coordinate map.
    ///
    /// For each output position `x_out`, the sampled input position is
    /// `matrix @ x_out + offset` (the inverse map, as is conventional for
    /// warping: it pulls values into the output grid, leaving no holes).
    ///
    /// # Arguments
    ///
    /// * `image` - Input image
    /// * `matrix` - Inverse map matrix of shape `[ndim, ndim]`
    /// * `offset` - Inverse map offset of shape `[ndim]`
    /// * `output_shape` - Output extent (input shape if `None`)
    /// * `order` - Interpolation order
    /// * `mode` - Handling of samples outside the input extent
    fn warp(
        &self,
        image: &Tensor<R>,
        matrix: &Tensor<R>,
        offset: &Tensor<R>,
        output_shape: Option<&[usize]>,
        order: InterpolationOrder,
        mode: BoundaryMode,
    ) -> TransformResult<Tensor<R>>;

    /// Resize an image to match a certain size.
    ///
    /// Performs interpolation to up-size or down-size N-dimensional images,
    /// with pixel-area alignment: output sample `o` along an axis reads input
    /// position `(o + 0.5) * n_in / n_out - 0.5`.
    ///
    /// # Arguments
    ///
    /// * `image` - Input image
    /// * `output_shape` - Target shape, one entry per axis
    /// * `order` - Interpolation order
    fn resize(
        &self,
        image: &Tensor<R>,
        output_shape: &[usize],
        order: InterpolationOrder,
    ) -> TransformResult<Tensor<R>>;

    /// Scale an image by per-axis factors.
    ///
    /// The output shape is `round(n * scale)` per axis; values > 1 enlarge,
    /// < 1 shrink.
    fn rescale(
        &self,
        image: &Tensor<R>,
        scale: &[f64],
        order: InterpolationOrder,
    ) -> TransformResult<Tensor<R>>;

    /// Rotate an image in the plane of its two leading axes.
    ///
    /// The rotation is anchored at the image center. With `resize` set, the
    /// output extent grows to the bounding box of the rotated input;
    /// otherwise the input extent is kept and corners may be clipped.
    ///
    /// # Arguments
    ///
    /// * `image` - Input image (at least 2-D)
    /// * `angle` - Rotation angle in degrees
    /// * `resize` - Grow the output to contain the whole rotated image
    /// * `order` - Interpolation order
    /// * `mode` - Handling of samples outside the input extent
    fn rotate(
        &self,
        image: &Tensor<R>,
        angle: f64,
        resize: bool,
        order: InterpolationOrder,
        mode: BoundaryMode,
    ) -> TransformResult<Tensor<R>>;
}
