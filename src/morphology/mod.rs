//! Morphological footprints for N-dimensional arrays.
//!
//! Provides the footprint (structuring element) generators used by
//! morphological operations: flat 2-D shapes (square, rectangle, diamond,
//! disk, ellipse, octagon, star), their 3-D equivalents (cube, octahedron,
//! ball), and the cross-shaped default footprint for any dimensionality.

mod cpu;
pub mod impl_generic;
pub mod traits;

#[cfg(feature = "cuda")]
mod cuda;

#[cfg(feature = "wgpu")]
mod wgpu;

pub use traits::footprints::FootprintAlgorithms;
