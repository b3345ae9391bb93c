//! Morphology algorithm traits.

pub mod footprints;

pub use footprints::FootprintAlgorithms;
