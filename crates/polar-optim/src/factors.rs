//! Residual factors for the rotating-retarder power curve.

use nalgebra::{dvector, DVector, RealField};
use tiny_solver::factors::Factor;

/// One detector sample of the rotating-QWP power curve.
///
/// The coefficient block is `[a0, b2, a4, b4]` and the model is
/// `P(θ) = a0 + b2·sin 2θ + a4·cos 4θ + b4·sin 4θ`.
#[derive(Debug, Clone, Copy)]
pub struct SinusoidSampleFactor {
    /// Fast-axis angle of the wave plate for this sample, radians.
    pub theta: f64,
    /// Measured detector power.
    pub power: f64,
}

impl SinusoidSampleFactor {
    fn residual_generic<T: RealField>(&self, coeffs: &DVector<T>) -> DVector<T> {
        debug_assert_eq!(coeffs.len(), 4, "coefficient block must have 4 params");

        // The angle is data, not a parameter: evaluate the harmonics in f64.
        let sin2 = T::from_f64((2.0 * self.theta).sin()).unwrap();
        let cos4 = T::from_f64((4.0 * self.theta).cos()).unwrap();
        let sin4 = T::from_f64((4.0 * self.theta).sin()).unwrap();

        let model = coeffs[0].clone()
            + coeffs[1].clone() * sin2
            + coeffs[2].clone() * cos4
            + coeffs[3].clone() * sin4;
        let measured = T::from_f64(self.power).unwrap();

        dvector![measured - model]
    }
}

impl<T: RealField> Factor<T> for SinusoidSampleFactor {
    fn residual_func(&self, params: &[DVector<T>]) -> DVector<T> {
        debug_assert_eq!(params.len(), 1, "expected single coefficient block");
        self.residual_generic(&params[0])
    }
}
