//! Registration algorithm traits.

pub mod masked;
pub mod phase;

pub use masked::MaskedPhaseCorrelationAlgorithms;
pub use phase::{
    CorrelationSpace, MaskedCorrelationParams, PhaseCorrelationAlgorithms,
    PhaseCorrelationParams, Registration, RegistrationMethod,
};
