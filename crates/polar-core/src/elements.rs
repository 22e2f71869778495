//! Mueller matrices of linear polarization elements.
//!
//! The matrices follow the standard (Chipman) convention: angles are
//! fast-axis / transmission-axis orientations in radians measured from
//! horizontal, and every matrix acts on a Stokes vector `[S0, S1, S2, S3]`.

use crate::math::Real;
use nalgebra::{Matrix4, RealField};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Retardance of an ideal quarter-wave plate. Both polarimeter designs
/// rotate quarter-wave retarders: the quarter wave couples all four
/// Stokes components into the detected intensity.
pub const QUARTER_WAVE: Real = FRAC_PI_2;

/// Model of the polarization elements a polarimeter is built from.
///
/// The polarimeter engines only ever ask for polarizer and retarder
/// Mueller matrices, so swapping in a model with diattenuation or
/// retardance errors is a matter of implementing this trait.
pub trait PolarizationElements<S: RealField + Copy> {
    /// Mueller matrix of a linear polarizer with transmission axis `angle`.
    fn linear_polarizer(&self, angle: S) -> Matrix4<S>;

    /// Mueller matrix of a linear retarder with fast axis `angle` and
    /// phase delay `retardance` between the orthogonal components.
    fn linear_retarder(&self, angle: S, retardance: S) -> Matrix4<S>;
}

/// Ideal, loss-free polarization elements.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IdealElements;

impl<S: RealField + Copy> PolarizationElements<S> for IdealElements {
    fn linear_polarizer(&self, angle: S) -> Matrix4<S> {
        let zero = S::zero();
        let one = S::one();
        let two = S::from_f64(2.0).unwrap();
        let half = S::from_f64(0.5).unwrap();

        let c = (angle * two).cos();
        let s = (angle * two).sin();

        Matrix4::new(
            one,
            c,
            s,
            zero,
            c,
            c * c,
            c * s,
            zero,
            s,
            s * c,
            s * s,
            zero,
            zero,
            zero,
            zero,
            zero,
        ) * half
    }

    fn linear_retarder(&self, angle: S, retardance: S) -> Matrix4<S> {
        let zero = S::zero();
        let one = S::one();
        let two = S::from_f64(2.0).unwrap();

        let c = (angle * two).cos();
        let s = (angle * two).sin();
        let cd = retardance.cos();
        let sd = retardance.sin();

        Matrix4::new(
            one,
            zero,
            zero,
            zero,
            zero,
            c * c + s * s * cd,
            c * s * (one - cd),
            -s * sd,
            zero,
            c * s * (one - cd),
            s * s + c * c * cd,
            c * sd,
            zero,
            s * sd,
            -c * sd,
            cd,
        )
    }
}
