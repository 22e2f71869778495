//! Full Stokes polarimetry: sinusoid fit of the rotating-QWP power curve.

use crate::factors::SinusoidSampleFactor;
use crate::solver::{solve, FitOptions};
use anyhow::{anyhow, ensure, Result};
use log::debug;
use nalgebra::{DVector, DVectorView};
use polar_core::{AnalyzerRow, PolarizationElements, Real, Stokes, QUARTER_WAVE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tiny_solver::problem::Problem;

const COEFF_KEY: &str = "coeffs";

/// Fourier coefficients of the rotating-QWP power curve
/// `P(θ) = a0 + b2·sin 2θ + a4·cos 4θ + b4·sin 4θ`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SinusoidCoeffs {
    pub a0: Real,
    pub b2: Real,
    pub a4: Real,
    pub b4: Real,
}

impl SinusoidCoeffs {
    pub const DIM: usize = 4;

    /// Convert to a dense parameter vector `[a0, b2, a4, b4]`.
    pub fn to_dvec(&self) -> DVector<Real> {
        nalgebra::dvector![self.a0, self.b2, self.a4, self.b4]
    }

    /// Build from a dense parameter vector `[a0, b2, a4, b4]`.
    pub fn from_dvec(v: DVectorView<'_, Real>) -> Result<Self> {
        ensure!(
            v.len() == Self::DIM,
            "expected coefficient vector of length {}, got {}",
            Self::DIM,
            v.len()
        );
        Ok(Self {
            a0: v[0],
            b2: v[1],
            a4: v[2],
            b4: v[3],
        })
    }

    /// Evaluate the fitted power model at wave-plate angle `theta`.
    pub fn eval(&self, theta: Real) -> Real {
        self.a0
            + self.b2 * (2.0 * theta).sin()
            + self.a4 * (4.0 * theta).cos()
            + self.b4 * (4.0 * theta).sin()
    }

    /// Closed-form map from the fitted coefficients to the incident
    /// Stokes vector, from Fourier analysis of the analyzer response:
    /// `S0 = 2(a0 − a4)`, `S1 = 4·a4`, `S2 = 4·b4`, `S3 = −2·b2`.
    pub fn to_stokes(&self) -> Stokes {
        Stokes::new(
            2.0 * (self.a0 - self.a4),
            4.0 * self.a4,
            4.0 * self.b4,
            -2.0 * self.b2,
        )
    }
}

/// Result of a full Stokes data reduction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StokesFit {
    /// Recovered Stokes vector.
    pub stokes: Stokes,
    /// Raw sinusoid coefficients, kept for fit-quality inspection.
    pub coeffs: SinusoidCoeffs,
    /// Final cost `0.5·‖r‖²` of the sinusoid fit.
    pub final_cost: Real,
}

/// Analyzer Stokes-projection vector at wave-plate angle `theta`: the
/// top row of `polarizer(0) · retarder(θ, π/2)`, the only row a single
/// detector behind the polarizer observes.
pub fn analyzer_vector<E: PolarizationElements<Real>>(elements: &E, theta: Real) -> AnalyzerRow {
    (elements.linear_polarizer(0.0) * elements.linear_retarder(theta, QUARTER_WAVE))
        .row(0)
        .into_owned()
}

/// Simulate detector powers for a known incident Stokes vector.
pub fn simulate_powers<E: PolarizationElements<Real>>(
    elements: &E,
    thetas: &[Real],
    true_stokes: &Stokes,
) -> DVector<Real> {
    DVector::from_iterator(
        thetas.len(),
        thetas
            .iter()
            .map(|&theta| (analyzer_vector(elements, theta) * true_stokes)[(0, 0)]),
    )
}

/// Recover a Stokes vector from measured detector powers.
///
/// Fits the four-coefficient sinusoid by Levenberg–Marquardt from the
/// fixed initial guess `(1, 1, 1, 1)` and maps the coefficients onto the
/// Stokes components. Non-convergence is an error, never a silent wrong
/// answer.
pub fn stokes_from_powers(
    thetas: &[Real],
    powers: &[Real],
    opts: &FitOptions,
) -> Result<StokesFit> {
    ensure!(!thetas.is_empty(), "need at least one measurement angle");
    ensure!(
        thetas.len() == powers.len(),
        "angle count ({}) must match power count ({})",
        thetas.len(),
        powers.len()
    );

    let mut problem = Problem::new();
    for (&theta, &power) in thetas.iter().zip(powers) {
        let factor = SinusoidSampleFactor { theta, power };
        problem.add_residual_block(1, &[COEFF_KEY], Box::new(factor), None);
    }

    let mut initial: HashMap<String, DVector<Real>> = HashMap::new();
    let guess = SinusoidCoeffs {
        a0: 1.0,
        b2: 1.0,
        a4: 1.0,
        b4: 1.0,
    };
    initial.insert(COEFF_KEY.to_string(), guess.to_dvec());

    let solution = solve(&problem, initial, opts)?;
    let coeff_vec = solution
        .get(COEFF_KEY)
        .ok_or_else(|| anyhow!("missing coefficient block in solution"))?;
    let coeffs = SinusoidCoeffs::from_dvec(coeff_vec.as_view())?;

    let param_blocks = problem.initialize_parameter_blocks(&solution);
    let residuals = problem.compute_residuals(&param_blocks, true);
    let final_cost = 0.5 * residuals.as_ref().squared_norm_l2();
    debug!("sinusoid fit final cost: {final_cost:.3e}");

    Ok(StokesFit {
        stokes: coeffs.to_stokes(),
        coeffs,
        final_cost,
    })
}

/// Simulate a full Stokes polarimeter measurement of `true_stokes` and
/// reduce it back through the sinusoid fit.
pub fn simulate_stokes<E: PolarizationElements<Real>>(
    elements: &E,
    thetas: &[Real],
    true_stokes: &Stokes,
    opts: &FitOptions,
) -> Result<StokesFit> {
    let powers = simulate_powers(elements, thetas, true_stokes);
    stokes_from_powers(thetas, powers.as_slice(), opts)
}
