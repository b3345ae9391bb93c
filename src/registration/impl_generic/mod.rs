//! Generic implementations of the registration algorithms.
//!
//! These functions are generic over any numr Runtime and contain the actual
//! algorithm logic. Backend modules implement the registration traits by
//! delegating here.

pub mod helpers;
pub mod masked;
pub mod phase;
pub mod upsampled_dft;

pub use helpers::fftn_impl;
pub use masked::masked_phase_cross_correlation_impl;
pub use phase::register_translation_impl;
pub use upsampled_dft::upsampled_dft_impl;
