//! WebGPU implementation of the transform algorithms.
//!
//! This module implements the [`ResampleAlgorithms`] and [`WarpAlgorithms`]
//! traits for WebGPU by delegating to the generic implementations in
//! `impl_generic/`.

use crate::transform::error::TransformResult;
use crate::transform::impl_generic::{
    affine_transform_impl, map_coordinates_impl, rescale_impl, resize_impl, rotate_impl,
    warp_impl,
};
use crate::transform::{BoundaryMode, InterpolationOrder, ResampleAlgorithms, WarpAlgorithms};
use numr::runtime::wgpu::{WgpuClient, WgpuRuntime};
use numr::tensor::Tensor;

impl ResampleAlgorithms<WgpuRuntime> for WgpuClient {
    fn map_coordinates(
        &self,
        input: &Tensor<WgpuRuntime>,
        coordinates: &Tensor<WgpuRuntime>,
        order: InterpolationOrder,
        mode: BoundaryMode,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        map_coordinates_impl(self, input, coordinates, order, mode)
    }

    fn affine_transform(
        &self,
        input: &Tensor<WgpuRuntime>,
        matrix: &Tensor<WgpuRuntime>,
        offset: &Tensor<WgpuRuntime>,
        output_shape: Option<&[usize]>,
        order: InterpolationOrder,
        mode: BoundaryMode,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        affine_transform_impl(self, input, matrix, offset, output_shape, order, mode)
    }
}

impl WarpAlgorithms<WgpuRuntime> for WgpuClient {
    fn warp(
        &self,
        image: &Tensor<WgpuRuntime>,
        matrix: &Tensor<WgpuRuntime>,
        offset: &Tensor<WgpuRuntime>,
        output_shape: Option<&[usize]>,
        order: InterpolationOrder,
        mode: BoundaryMode,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        warp_impl(self, image, matrix, offset, output_shape, order, mode)
    }

    fn resize(
        &self,
        image: &Tensor<WgpuRuntime>,
        output_shape: &[usize],
        order: InterpolationOrder,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        resize_impl(self, image, output_shape, order)
    }

    fn rescale(
        &self,
        image: &Tensor<WgpuRuntime>,
        scale: &[f64],
        order: InterpolationOrder,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        rescale_impl(self, image, scale, order)
    }

    fn rotate(
        &self,
        image: &Tensor<WgpuRuntime>,
        angle: f64,
        resize: bool,
        order: InterpolationOrder,
        mode: BoundaryMode,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        rotate_impl(self, image, angle, resize, order, mode)
    }
}
