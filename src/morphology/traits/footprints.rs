//! Footprint generator traits.
use crate::DType;

use numr::error::Result;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Algorithmic contract for footprint (structuring element) generation.
///
/// Every generator returns a `U8` tensor where 1 marks a pixel belonging to
/// the neighborhood and 0 one that does not.
pub trait FootprintAlgorithms<R: Runtime<DType = DType>> {
    /// Flat, square-shaped footprint: every pixel of a `width`-sided square
    /// belongs to the neighborhood.
    fn square(&self, width: usize) -> Result<Tensor<R>>;

    /// Flat, rectangular footprint of `nrows` by `ncols`, all ones.
    fn rectangle(&self, nrows: usize, ncols: usize) -> Result<Tensor<R>>;

    /// Flat, diamond-shaped footprint: pixels whose city-block (Manhattan)
    /// distance from the center is no greater than `radius`.
    fn diamond(&self, radius: usize) -> Result<Tensor<R>>;

    /// Flat, disk-shaped footprint: pixels whose Euclidean distance from the
    /// center is no greater than `radius`.
    fn disk(&self, radius: usize) -> Result<Tensor<R>>;

    /// Flat, ellipse-shaped footprint on a `(2*height+1, 2*width+1)` grid.
    ///
    /// A pixel `(r, c)` belongs to the neighborhood when
    /// `((r - height) / (height + 1))^2 + ((c - width) / (width + 1))^2 <= 1`.
    fn ellipse(&self, width: usize, height: usize) -> Result<Tensor<R>>;

    /// Cube-shaped footprint, the 3-D equivalent of [`Self::square`].
    fn cube(&self, width: usize) -> Result<Tensor<R>>;

    /// Octahedron-shaped footprint, the 3-D equivalent of [`Self::diamond`].
    fn octahedron(&self, radius: usize) -> Result<Tensor<R>>;

    /// Ball-shaped footprint, the 3-D equivalent of [`Self::disk`].
    fn ball(&self, radius: usize) -> Result<Tensor<R>>;

    /// Octagon-shaped footprint with horizontal/vertical sides of size `m`
    /// and 45-degree sides of size `n`, on an `(m + 2n)`-sided grid.
    fn octagon(&self, m: usize, n: usize) -> Result<Tensor<R>>;

    /// Star-shaped footprint: a square of side `2a + 1` overlapped with its
    /// 45-degree rotated version. The returned grid has side
    /// `2a + 1 + 2*floor(a / 2)`.
    fn star(&self, a: usize) -> Result<Tensor<R>>;

    /// Cross-shaped footprint with connectivity 1 in `ndim` dimensions, the
    /// default neighborhood when none is specified.
    fn default_footprint(&self, ndim: usize) -> Result<Tensor<R>>;
}
