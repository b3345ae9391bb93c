//! Generic implementations of the transform algorithms.
//!
//! These functions are generic over any numr Runtime and contain the actual
//! algorithm logic. Backend modules implement the transform traits by
//! delegating here.

pub mod resample;
pub mod warps;

pub use resample::{affine_transform_impl, map_coordinates_impl};
pub use warps::{rescale_impl, resize_impl, rotate_impl, warp_impl};
