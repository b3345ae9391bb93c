//! Transform algorithm traits.

pub mod resample;
pub mod warps;

pub use resample::{BoundaryMode, InterpolationOrder, ResampleAlgorithms};
pub use warps::WarpAlgorithms;
