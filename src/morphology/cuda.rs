//! CUDA implementation of the footprint generators.
//!
//! This module implements the [`FootprintAlgorithms`] trait for CUDA by
//! delegating to the generic implementations in `impl_generic/`.

use crate::morphology::impl_generic::{
    ball_impl, cube_impl, default_footprint_impl, diamond_impl, disk_impl, ellipse_impl,
    octagon_impl, octahedron_impl, rectangle_impl, square_impl, star_impl,
};
use crate::morphology::FootprintAlgorithms;
use numr::error::Result;
use numr::runtime::cuda::{CudaClient, CudaRuntime};
use numr::tensor::Tensor;

impl FootprintAlgorithms<CudaRuntime> for CudaClient {
    fn square(&self, width: usize) -> Result<Tensor<CudaRuntime>> {
        square_impl(self, width)
    }

    fn rectangle(&self, nrows: usize, ncols: usize) -> Result<Tensor<CudaRuntime>> {
        rectangle_impl(self, nrows, ncols)
    }

    fn diamond(&self, radius: usize) -> Result<Tensor<CudaRuntime>> {
        diamond_impl(self, radius)
    }

    fn disk(&self, radius: usize) -> Result<Tensor<CudaRuntime>> {
        disk_impl(self, radius)
    }

    fn ellipse(&self, width: usize, height: usize) -> Result<Tensor<CudaRuntime>> {
        ellipse_impl(self, width, height)
    }

    fn cube(&self, width: usize) -> Result<Tensor<CudaRuntime>> {
        cube_impl(self, width)
    }

    fn octahedron(&self, radius: usize) -> Result<Tensor<CudaRuntime>> {
        octahedron_impl(self, radius)
    }

    fn ball(&self, radius: usize) -> Result<Tensor<CudaRuntime>> {
        ball_impl(self, radius)
    }

    fn octagon(&self, m: usize, n: usize) -> Result<Tensor<CudaRuntime>> {
        octagon_impl(self, m, n)
    }

    fn star(&self, a: usize) -> Result<Tensor<CudaRuntime>> {
        star_impl(self, a)
    }

    fn default_footprint(&self, ndim: usize) -> Result<Tensor<CudaRuntime>> {
        default_footprint_impl(self, ndim)
    }
}
