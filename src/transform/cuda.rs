//! CUDA implementation of the transform algorithms.
//!
//! This module implements the [`ResampleAlgorithms`] and [`WarpAlgorithms`]
//! traits for CUDA by delegating to the generic implementations in
//! `impl_generic/`.

use crate::transform::error::TransformResult;
use crate::transform::impl_generic::{
    affine_transform_impl, map_coordinates_impl, rescale_impl, resize_impl, rotate_impl,
    warp_impl,
};
use crate::transform::{BoundaryMode, InterpolationOrder, ResampleAlgorithms, WarpAlgorithms};
use numr::runtime::cuda::{CudaClient, CudaRuntime};
use numr::tensor::Tensor;

impl ResampleAlgorithms<CudaRuntime> for CudaClient {
    fn map_coordinates(
        &self,
        input: &Tensor<CudaRuntime>,
        coordinates: &Tensor<CudaRuntime>,
        order: InterpolationOrder,
        mode: BoundaryMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        map_coordinates_impl(self, input, coordinates, order, mode)
    }

    fn affine_transform(
        &self,
        input: &Tensor<CudaRuntime>,
        matrix: &Tensor<CudaRuntime>,
        offset: &Tensor<CudaRuntime>,
        output_shape: Option<&[usize]>,
        order: InterpolationOrder,
        mode: BoundaryMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        affine_transform_impl(self, input, matrix, offset, output_shape, order, mode)
    }
}

impl WarpAlgorithms<CudaRuntime> for CudaClient {
    fn warp(
        &self,
        image: &Tensor<CudaRuntime>,
        matrix: &Tensor<CudaRuntime>,
        offset: &Tensor<CudaRuntime>,
        output_shape: Option<&[usize]>,
        order: InterpolationOrder,
        mode: BoundaryMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        warp_impl(self, image, matrix, offset, output_shape, order, mode)
    }

    fn resize(
        &self,
        image: &Tensor<CudaRuntime>,
        output_shape: &[usize],
        order: InterpolationOrder,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        resize_impl(self, image, output_shape, order)
    }

    fn rescale(
        &self,
        image: &Tensor<CudaRuntime>,
        scale: &[f64],
        order: InterpolationOrder,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        rescale_impl(self, image, scale, order)
    }

    fn rotate(
        &self,
        image: &Tensor<CudaRuntime>,
        angle: f64,
        resize: bool,
        order: InterpolationOrder,
        mode: BoundaryMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        rotate_impl(self, image, angle, resize, order, mode)
    }
}
