//! Core math and polarization primitives for `polarimetry-rs`.
//!
//! This crate contains:
//! - linear algebra type aliases (`Real`, `Mueller`, `Stokes`),
//! - Mueller matrices of ideal polarization elements ([`IdealElements`]),
//! - matrix conditioning helpers (`inf_norm`, [`condition_number`]).
//!
//! The element model is behind the [`PolarizationElements`] trait so the
//! polarimeter engines can be driven by non-ideal element models without
//! touching the data-reduction code.

/// Polarization element models.
pub mod elements;
/// Linear algebra type aliases and conditioning helpers.
pub mod math;

pub use elements::*;
pub use math::*;
