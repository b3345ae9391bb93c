//! CPU implementation of the footprint generators.
//!
//! This module implements the [`FootprintAlgorithms`] trait for CPU by
//! delegating to the generic implementations in `impl_generic/`.

use crate::morphology::impl_generic::{
    ball_impl, cube_impl, default_footprint_impl, diamond_impl, disk_impl, ellipse_impl,
    octagon_impl, octahedron_impl, rectangle_impl, square_impl, star_impl,
};
use crate::morphology::FootprintAlgorithms;
use numr::error::Result;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl FootprintAlgorithms<CpuRuntime> for CpuClient {
    fn square(&self, width: usize) -> Result<Tensor<CpuRuntime>> {
        square_impl(self, width)
    }

    fn rectangle(&self, nrows: usize, ncols: usize) -> Result<Tensor<CpuRuntime>> {
        rectangle_impl(self, nrows, ncols)
    }

    fn diamond(&self, radius: usize) -> Result<Tensor<CpuRuntime>> {
        diamond_impl(self, radius)
    }

    fn disk(&self, radius: usize) -> Result<Tensor<CpuRuntime>> {
        disk_impl(self, radius)
    }

    fn ellipse(&self, width: usize, height: usize) -> Result<Tensor<CpuRuntime>> {
        ellipse_impl(self, width, height)
    }

    fn cube(&self, width: usize) -> Result<Tensor<CpuRuntime>> {
        cube_impl(self, width)
    }

    fn octahedron(&self, radius: usize) -> Result<Tensor<CpuRuntime>> {
        octahedron_impl(self, radius)
    }

    fn ball(&self, radius: usize) -> Result<Tensor<CpuRuntime>> {
        ball_impl(self, radius)
    }

    fn octagon(&self, m: usize, n: usize) -> Result<Tensor<CpuRuntime>> {
        octagon_impl(self, m, n)
    }

    fn star(&self, a: usize) -> Result<Tensor<CpuRuntime>> {
        star_impl(self, a)
    }

    fn default_footprint(&self, ndim: usize) -> Result<Tensor<CpuRuntime>> {
        default_footprint_impl(self, ndim)
    }
}
