//! High-level entry crate for the `polarimetry-rs` toolbox.
//!
//! Two independent measurement pipelines share the optical-element model
//! from [`core`]:
//!
//! - **Full Mueller polarimetry** ([`linear`]): a dual-rotating-retarder
//!   polarimeter reduced by SVD least squares, with a condition-number
//!   diagnostic for the data-reduction matrix.
//! - **Full Stokes polarimetry** ([`optim`]): a rotating quarter-wave
//!   plate polarimeter reduced by a Levenberg–Marquardt sinusoid fit.
//!
//! ```no_run
//! use polarimetry::prelude::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let thetas = linspace(0.0, std::f64::consts::PI, 40);
//!
//! // Simulate an "air" measurement and reduce it back.
//! let fit = simulate_mueller(&IdealElements, &thetas, &Mueller::identity(), 1.0)?;
//! println!("condition number: {:.2}", fit.condition_number);
//!
//! // Recover a Stokes vector from a rotating-QWP power curve.
//! let truth = Stokes::new(1.0, 0.5, 0.0, 0.0);
//! let fit = simulate_stokes(&IdealElements, &thetas, &truth, &FitOptions::default())?;
//! println!("recovered S: {}", fit.stokes);
//! # Ok(())
//! # }
//! ```
//!
//! The `polarimetry` crate is the public compatibility boundary; the
//! layer crates are intended for advanced usage and may evolve faster.

/// Math types, element models, and conditioning helpers.
pub mod core {
    pub use polar_core::*;
}

/// Linear Mueller-matrix data reduction.
pub mod linear {
    pub use polar_linear::*;
}

/// Non-linear Stokes-vector data reduction.
pub mod optim {
    pub use polar_optim::*;
}

/// Convenient re-exports for common use cases.
pub mod prelude {
    pub use crate::core::{
        condition_number, linspace, IdealElements, Mueller, PolarizationElements, Real, Stokes,
    };
    pub use crate::linear::{
        mueller_from_powers, simulate_mueller, MuellerFit, MuellerFitError, ANALYZER_RATIO,
        QUARTER_WAVE,
    };
    pub use crate::optim::{
        simulate_stokes, stokes_from_powers, FitOptions, SinusoidCoeffs, StokesFit,
    };
}
