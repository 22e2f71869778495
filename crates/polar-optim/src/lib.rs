//! Non-linear data reduction for a full Stokes polarimeter.
//!
//! A single rotating quarter-wave plate in front of a fixed horizontal
//! polarizer modulates the detected power as a four-coefficient sinusoid
//! in the plate angle. The coefficients are fitted with tiny-solver's
//! Levenberg–Marquardt optimizer and mapped algebraically onto the
//! incident Stokes vector.

pub mod factors;
pub mod solver;
pub mod stokes;

pub use solver::FitOptions;
pub use stokes::*;
