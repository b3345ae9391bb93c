//! WebGPU implementation of the footprint generators.
//!
//! This module implements the [`FootprintAlgorithms`] trait for WebGPU by
//! delegating to the generic implementations in `impl_generic/`.

use crate::morphology::impl_generic::{
    ball_impl, cube_impl, default_footprint_impl, diamond_impl, disk_impl, ellipse_impl,
    octagon_impl, octahedron_impl, rectangle_impl, square_impl, star_impl,
};
use crate::morphology::FootprintAlgorithms;
use numr::error::Result;
use numr::runtime::wgpu::{WgpuClient, WgpuRuntime};
use numr::tensor::Tensor;

impl FootprintAlgorithms<WgpuRuntime> for WgpuClient {
    fn square(&self, width: usize) -> Result<Tensor<WgpuRuntime>> {
        square_impl(self, width)
    }

    fn rectangle(&self, nrows: usize, ncols: usize) -> Result<Tensor<WgpuRuntime>> {
        rectangle_impl(self, nrows, ncols)
    }

    fn diamond(&self, radius: usize) -> Result<Tensor<WgpuRuntime>> {
        diamond_impl(self, radius)
    }

    fn disk(&self, radius: usize) -> Result<Tensor<WgpuRuntime>> {
        disk_impl(self, radius)
    }

    fn ellipse(&self, width: usize, height: usize) -> Result<Tensor<WgpuRuntime>> {
        ellipse_impl(self, width, height)
    }

    fn cube(&self, width: usize) -> Result<Tensor<WgpuRuntime>> {
        cube_impl(self, width)
    }

    fn octahedron(&self, radius: usize) -> Result<Tensor<WgpuRuntime>> {
        octahedron_impl(self, radius)
    }

    fn ball(&self, radius: usize) -> Result<Tensor<WgpuRuntime>> {
        ball_impl(self, radius)
    }

    fn octagon(&self, m: usize, n: usize) -> Result<Tensor<WgpuRuntime>> {
        octagon_impl(self, m, n)
    }

    fn star(&self, a: usize) -> Result<Tensor<WgpuRuntime>> {
        star_impl(self, a)
    }

    fn default_footprint(&self, ndim: usize) -> Result<Tensor<WgpuRuntime>> {
        default_footprint_impl(self, ndim)
    }
}
