//! CPU implementation of the transform algorithms.
//!
//! This module implements the [`ResampleAlgorithms`] and [`WarpAlgorithms`]
//! traits for CPU by delegating to the generic implementations in
//! `impl_generic/`.

use crate::transform::error::TransformResult;
use crate::transform::impl_generic::{
    affine_transform_impl, map_coordinates_impl, rescale_impl, resize_impl, rotate_impl,
    warp_impl,
};
use crate::transform::{BoundaryMode, InterpolationOrder, ResampleAlgorithms, WarpAlgorithms};
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl ResampleAlgorithms<CpuRuntime> for CpuClient {
    fn map_coordinates(
        &self,
        input: &Tensor<CpuRuntime>,
        coordinates: &Tensor<CpuRuntime>,
        order: InterpolationOrder,
        mode: BoundaryMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        map_coordinates_impl(self, input, coordinates, order, mode)
    }

    fn affine_transform(
        &self,
        input: &Tensor<CpuRuntime>,
        matrix: &Tensor<CpuRuntime>,
        offset: &Tensor<CpuRuntime>,
        output_shape: Option<&[usize]>,
        order: InterpolationOrder,
        mode: BoundaryMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        affine_transform_impl(self, input, matrix, offset, output_shape, order, mode)
    }
}

impl WarpAlgorithms<CpuRuntime> for CpuClient {
    fn warp(
        &self,
        image: &Tensor<CpuRuntime>,
        matrix: &Tensor<CpuRuntime>,
        offset: &Tensor<CpuRuntime>,
        output_shape: Option<&[usize]>,
        order: InterpolationOrder,
        mode: BoundaryMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        warp_impl(self, image, matrix, offset, output_shape, order, mode)
    }

    fn resize(
        &self,
        image: &Tensor<CpuRuntime>,
        output_shape: &[usize],
        order: InterpolationOrder,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        resize_impl(self, image, output_shape, order)
    }

    fn rescale(
        &self,
        image: &Tensor<CpuRuntime>,
        scale: &[f64],
        order: InterpolationOrder,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        rescale_impl(self, image, scale, order)
    }

    fn rotate(
        &self,
        image: &Tensor<CpuRuntime>,
        angle: f64,
        resize: bool,
        order: InterpolationOrder,
        mode: BoundaryMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        rotate_impl(self, image, angle, resize, order, mode)
    }
}

#[cfg(test)]
mod tests;
