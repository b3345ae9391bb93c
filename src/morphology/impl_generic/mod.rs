//! Generic footprint construction.
//!
//! Footprint grids are small, so they are generated on the host and uploaded
//! once; this works identically for every Runtime.
use crate::DType;

use numr::error::{Error, Result};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

fn upload<R, C>(client: &C, data: &[u8], shape: &[usize]) -> Result<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: RuntimeClient<R>,
{
    Tensor::<R>::try_from_slice(data, shape, client.device())
}

pub fn square_impl<R, C>(client: &C, width: usize) -> Result<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: RuntimeClient<R>,
{
    upload(client, &vec![1u8; width * width], &[width, width])
}

pub fn rectangle_impl<R, C>(client: &C, nrows: usize, ncols: usize) -> Result<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: RuntimeClient<R>,
{
    upload(client, &vec![1u8; nrows * ncols], &[nrows, ncols])
}

pub fn diamond_impl<R, C>(client: &C, radius: usize) -> Result<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: RuntimeClient<R>,
{
    let n = 2 * radius + 1;
    let r = radius as i64;
    let data: Vec<u8> = (0..n * n)
        .map(|flat| {
            let i = (flat / n) as i64;
            let j = (flat % n) as i64;
            u8::from((i - r).abs() + (j - r).abs() <= r)
        })
        .collect();
    upload(client, &data, &[n, n])
}

pub fn disk_impl<R, C>(client: &C, radius: usize) -> Result<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: RuntimeClient<R>,
{
    let n = 2 * radius + 1;
    let r = radius as i64;
    let data: Vec<u8> = (0..n * n)
        .map(|flat| {
            let x = (flat / n) as i64 - r;
            let y = (flat % n) as i64 - r;
            u8::from(x * x + y * y <= r * r)
        })
        .collect();
    upload(client, &data, &[n, n])
}

pub fn ellipse_impl<R, C>(client: &C, width: usize, height: usize) -> Result<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: RuntimeClient<R>,
{
    let nrows = 2 * height + 1;
    let ncols = 2 * width + 1;
    let ry = (height + 1) as f64;
    let rx = (width + 1) as f64;
    let data: Vec<u8> = (0..nrows * ncols)
        .map(|flat| {
            let r = (flat / ncols) as f64 - height as f64;
            let c = (flat % ncols) as f64 - width as f64;
            u8::from((r / ry).powi(2) + (c / rx).powi(2) <= 1.0)
        })
        .collect();
    upload(client, &data, &[nrows, ncols])
}

pub fn cube_impl<R, C>(client: &C, width: usize) -> Result<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: RuntimeClient<R>,
{
    upload(client, &vec![1u8; width * width * width], &[width, width, width])
}

pub fn octahedron_impl<R, C>(client: &C, radius: usize) -> Result<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: RuntimeClient<R>,
{
    let n = 2 * radius + 1;
    let r = radius as i64;
    let data: Vec<u8> = (0..n * n * n)
        .map(|flat| {
            let z = (flat / (n * n)) as i64 - r;
            let y = ((flat / n) % n) as i64 - r;
            let x = (flat % n) as i64 - r;
            u8::from(x.abs() + y.abs() + z.abs() <= r)
        })
        .collect();
    upload(client, &data, &[n, n, n])
}

pub fn ball_impl<R, C>(client: &C, radius: usize) -> Result<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: RuntimeClient<R>,
{
    let n = 2 * radius + 1;
    let r = radius as i64;
    let data: Vec<u8> = (0..n * n * n)
        .map(|flat| {
            let z = (flat / (n * n)) as i64 - r;
            let y = ((flat / n) % n) as i64 - r;
            let x = (flat % n) as i64 - r;
            u8::from(x * x + y * y + z * z <= r * r)
        })
        .collect();
    upload(client, &data, &[n, n, n])
}

/// The octagon is the convex hull of its eight vertices; membership reduces
/// to four half-plane pairs.
pub fn octagon_impl<R, C>(client: &C, m: usize, n: usize) -> Result<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: RuntimeClient<R>,
{
    let side = m + 2 * n;
    let ni = n as i64;
    let mi = m as i64;
    let last = side as i64 - 1;
    let data: Vec<u8> = (0..side * side)
        .map(|flat| {
            let i = (flat / side) as i64;
            let j = (flat % side) as i64;
            u8::from(i + j >= ni && i + j <= 2 * last - ni && (i - j).abs() <= mi + ni - 1)
        })
        .collect();
    upload(client, &data, &[side, side])
}

/// Union of the axis-aligned square and the diamond spanned by the edge
/// midpoints (the convex hull of the rotated square's vertices).
pub fn star_impl<R, C>(client: &C, a: usize) -> Result<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: RuntimeClient<R>,
{
    if a == 1 {
        return upload(client, &[1u8; 9], &[3, 3]);
    }

    let m = 2 * a + 1;
    let n = a / 2;
    let side = m + 2 * n;
    let c = (side as i64 - 1) / 2;
    let data: Vec<u8> = (0..side * side)
        .map(|flat| {
            let i = (flat / side) as i64;
            let j = (flat % side) as i64;
            let in_square =
                i >= n as i64 && i < (m + n) as i64 && j >= n as i64 && j < (m + n) as i64;
            let in_diamond = (i - c).abs() + (j - c).abs() <= c;
            u8::from(in_square || in_diamond)
        })
        .collect();
    upload(client, &data, &[side, side])
}

pub fn default_footprint_impl<R, C>(client: &C, ndim: usize) -> Result<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: RuntimeClient<R>,
{
    if ndim == 0 {
        return Err(Error::InvalidArgument {
            arg: "ndim",
            reason: "default_footprint requires at least one dimension".to_string(),
        });
    }

    let shape = vec![3usize; ndim];
    let total = 3usize.pow(ndim as u32);
    let data: Vec<u8> = (0..total)
        .map(|flat| {
            let mut rem = flat;
            let mut distance = 0usize;
            for _ in 0..ndim {
                distance += (rem % 3).abs_diff(1);
                rem /= 3;
            }
            u8::from(distance <= 1)
        })
        .collect();
    upload(client, &data, &shape)
}
