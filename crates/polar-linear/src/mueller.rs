use log::debug;
use nalgebra::{DMatrix, DVector, Vector4};
use polar_core::{
    condition_number, mueller_from_vec16, AnalyzerRow, Mueller, PolarizationElements, Real,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use polar_core::QUARTER_WAVE;

/// Angular gear ratio between the analyzer and generator retarders.
/// The 5:1 ratio de-aliases the Fourier harmonics of the power curve so
/// the data-reduction matrix reaches full rank 16.
pub const ANALYZER_RATIO: Real = 5.0;

#[derive(Debug, Error, Clone, Copy)]
pub enum MuellerFitError {
    /// No measurement angles were supplied.
    #[error("need at least one measurement angle")]
    EmptyAngles,
    /// Angle and power sequences disagree in length.
    #[error("angle count {0} does not match power count {1}")]
    PowerCountMismatch(usize, usize),
    /// SVD failed while solving the data-reduction system.
    #[error("svd failed during data reduction")]
    SvdFailed,
}

/// Result of a full Mueller data reduction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MuellerFit {
    /// Recovered Mueller matrix (least-squares solution).
    pub mueller: Mueller,
    /// Infinity-norm condition number of the data-reduction matrix.
    ///
    /// The pseudo-inverse never fails outright; a near-singular system
    /// silently degrades to a least-norm solution. This diagnostic is the
    /// way to catch that: treat large values as an advisory that the
    /// recovered matrix is dominated by noise.
    pub condition_number: Real,
}

/// Generator arm at angle `theta`: quarter-wave retarder after a
/// horizontal polarizer, illuminated by the source.
fn generator<E: PolarizationElements<Real>>(elements: &E, theta: Real) -> Mueller {
    elements.linear_retarder(theta, QUARTER_WAVE) * elements.linear_polarizer(0.0)
}

/// Analyzer arm at angle `theta`: geared quarter-wave retarder followed
/// by a horizontal polarizer in front of the detector.
fn analyzer<E: PolarizationElements<Real>>(elements: &E, theta: Real) -> Mueller {
    elements.linear_polarizer(0.0) * elements.linear_retarder(ANALYZER_RATIO * theta, QUARTER_WAVE)
}

/// First column of the generator matrix: the Stokes vector launched into
/// the sample for a unit unpolarized source.
fn generator_column<E: PolarizationElements<Real>>(elements: &E, theta: Real) -> Vector4<Real> {
    generator(elements, theta).column(0).into_owned()
}

/// Top row of the analyzer matrix: the projection the detector observes.
fn analyzer_row<E: PolarizationElements<Real>>(elements: &E, theta: Real) -> AnalyzerRow {
    analyzer(elements, theta).row(0).into_owned()
}

/// Assemble the data-reduction matrix W for the given rotation angles.
///
/// Row i is the Kronecker product of the analyzer top row and the
/// generator first column at `thetas[i]`, so that `W · vec(M) = P` with
/// `vec(M)` the row-major flattening of the sample Mueller matrix.
pub fn reduction_matrix<E: PolarizationElements<Real>>(
    elements: &E,
    thetas: &[Real],
) -> DMatrix<Real> {
    let mut wmat = DMatrix::<Real>::zeros(thetas.len(), 16);
    for (i, &theta) in thetas.iter().enumerate() {
        let a = analyzer_row(elements, theta);
        let g = generator_column(elements, theta);
        for r in 0..4 {
            for c in 0..4 {
                wmat[(i, 4 * r + c)] = a[r] * g[c];
            }
        }
    }
    wmat
}

/// Simulate detector powers for a known sample Mueller matrix.
///
/// `source_power` scales every sample uniformly (the power falling on
/// the probed detector pixel).
pub fn simulate_powers<E: PolarizationElements<Real>>(
    elements: &E,
    thetas: &[Real],
    true_mueller: &Mueller,
    source_power: Real,
) -> DVector<Real> {
    DVector::from_iterator(
        thetas.len(),
        thetas.iter().map(|&theta| {
            let a = analyzer_row(elements, theta);
            let g = generator_column(elements, theta);
            (a * true_mueller * g)[(0, 0)] * source_power
        }),
    )
}

fn reduce(wmat: DMatrix<Real>, powers: DVector<Real>) -> Result<MuellerFit, MuellerFitError> {
    let cond = condition_number(&wmat).ok_or(MuellerFitError::SvdFailed)?;
    debug!("data-reduction matrix condition number: {cond:.3e}");

    let svd = wmat.svd(true, true);
    let solution = svd
        .solve(&powers, 1.0e-12)
        .map_err(|_| MuellerFitError::SvdFailed)?;

    Ok(MuellerFit {
        mueller: mueller_from_vec16(&solution),
        condition_number: cond,
    })
}

/// Recover a Mueller matrix from measured detector powers.
///
/// `powers[i]` must be the detector reading taken at `thetas[i]`. Fewer
/// than 16 angles leaves the system underdetermined; the SVD then yields
/// the least-norm solution, flagged by a large condition number.
pub fn mueller_from_powers<E: PolarizationElements<Real>>(
    elements: &E,
    thetas: &[Real],
    powers: &[Real],
) -> Result<MuellerFit, MuellerFitError> {
    if thetas.is_empty() {
        return Err(MuellerFitError::EmptyAngles);
    }
    if thetas.len() != powers.len() {
        return Err(MuellerFitError::PowerCountMismatch(
            thetas.len(),
            powers.len(),
        ));
    }

    let wmat = reduction_matrix(elements, thetas);
    reduce(wmat, DVector::from_column_slice(powers))
}

/// Simulate a full Mueller polarimeter measurement of `true_mueller` and
/// reduce it back, returning the recovered matrix and the conditioning
/// diagnostic. Useful for validating a choice of rotation angles.
pub fn simulate_mueller<E: PolarizationElements<Real>>(
    elements: &E,
    thetas: &[Real],
    true_mueller: &Mueller,
    source_power: Real,
) -> Result<MuellerFit, MuellerFitError> {
    if thetas.is_empty() {
        return Err(MuellerFitError::EmptyAngles);
    }

    let wmat = reduction_matrix(elements, thetas);
    let powers = simulate_powers(elements, thetas, true_mueller, source_power);
    reduce(wmat, powers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polar_core::{linspace, IdealElements};
    use std::f64::consts::PI;

    #[test]
    fn identity_sample_recovered_from_air_measurement() {
        let thetas = linspace(0.0, PI, 40);
        let fit = simulate_mueller(&IdealElements, &thetas, &Mueller::identity(), 1.0).unwrap();

        let err = (fit.mueller - Mueller::identity()).abs().max();
        assert!(err < 1e-6, "max element error {err}");
    }

    #[test]
    fn compound_sample_recovered_to_solver_precision() {
        let elements = IdealElements;
        let truth: Mueller = elements.linear_retarder(PI / 22.0, QUARTER_WAVE)
            * elements.linear_polarizer(PI / 4.0)
            * elements.linear_retarder(PI / 16.0, QUARTER_WAVE);

        let thetas = linspace(0.0, PI, 40);
        let fit = simulate_mueller(&elements, &thetas, &truth, 1.0).unwrap();

        let err = (fit.mueller - truth).abs().max();
        assert!(err < 1e-9, "max element error {err}");
    }

    #[test]
    fn source_power_scales_linearly_through_the_inversion() {
        let thetas = linspace(0.0, PI, 40);
        let truth = Mueller::identity();
        let unit = simulate_mueller(&IdealElements, &thetas, &truth, 1.0).unwrap();
        let bright = simulate_mueller(&IdealElements, &thetas, &truth, 3.0).unwrap();

        let err = (bright.mueller - unit.mueller * 3.0).abs().max();
        assert!(err < 1e-9, "max element error {err}");
    }

    #[test]
    fn reduction_is_deterministic() {
        let thetas = linspace(0.0, PI, 24);
        let truth = Mueller::identity();
        let a = simulate_mueller(&IdealElements, &thetas, &truth, 1.0).unwrap();
        let b = simulate_mueller(&IdealElements, &thetas, &truth, 1.0).unwrap();
        assert_eq!(a.mueller, b.mueller);
        assert_eq!(a.condition_number, b.condition_number);
    }

    #[test]
    fn well_spread_angles_give_well_conditioned_system() {
        let thetas = linspace(0.0, PI, 40);
        let wmat = reduction_matrix(&IdealElements, &thetas);
        assert_eq!(wmat.shape(), (40, 16));

        let fit = simulate_mueller(&IdealElements, &thetas, &Mueller::identity(), 1.0).unwrap();
        assert!(
            fit.condition_number < 1e3,
            "cond = {}",
            fit.condition_number
        );
    }

    #[test]
    fn underdetermined_system_degrades_gracefully() {
        // 8 angles cannot pin down 16 unknowns; the least-norm solution
        // must still be finite.
        let thetas = linspace(0.0, PI, 8);
        let fit = simulate_mueller(&IdealElements, &thetas, &Mueller::identity(), 1.0).unwrap();
        assert!(fit.mueller.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn measured_mode_matches_simulation_mode() {
        let thetas = linspace(0.0, PI, 32);
        let truth = Mueller::identity();
        let powers = simulate_powers(&IdealElements, &thetas, &truth, 1.0);

        let fit =
            mueller_from_powers(&IdealElements, &thetas, powers.as_slice()).unwrap();
        let err = (fit.mueller - truth).abs().max();
        assert!(err < 1e-9, "max element error {err}");
    }

    #[test]
    fn power_count_mismatch_fails_fast() {
        let thetas = linspace(0.0, PI, 10);
        let powers = vec![1.0; 9];
        let err = mueller_from_powers(&IdealElements, &thetas, &powers).unwrap_err();
        assert!(matches!(err, MuellerFitError::PowerCountMismatch(10, 9)));
    }

    #[test]
    fn empty_angles_fail_fast() {
        let err = mueller_from_powers(&IdealElements, &[], &[]).unwrap_err();
        assert!(matches!(err, MuellerFitError::EmptyAngles));
    }
}
