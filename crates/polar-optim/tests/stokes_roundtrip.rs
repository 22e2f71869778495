use polar_core::{linspace, IdealElements, Stokes};
use polar_optim::{simulate_stokes, stokes_from_powers, FitOptions};
use std::f64::consts::PI;

#[test]
fn partially_polarized_input_recovered() {
    let thetas = linspace(0.0, 2.0 * PI, 100);
    let truth = Stokes::new(1.0, 0.5, 0.0, 0.0);

    let fit = simulate_stokes(&IdealElements, &thetas, &truth, &FitOptions::default()).unwrap();

    let err = (fit.stokes - truth).abs().max();
    assert!(err < 1e-4, "max component error {err}");
    assert!(fit.final_cost < 1e-8, "final cost {}", fit.final_cost);
}

#[test]
fn circular_and_diagonal_components_recovered() {
    let thetas = linspace(0.0, 2.0 * PI, 120);
    let truth = Stokes::new(1.0, 0.2, -0.4, 0.6);

    let fit = simulate_stokes(&IdealElements, &thetas, &truth, &FitOptions::default()).unwrap();

    let err = (fit.stokes - truth).abs().max();
    assert!(err < 1e-4, "max component error {err}");
}

#[test]
fn measured_mode_matches_simulation_mode() {
    let thetas = linspace(0.0, 2.0 * PI, 100);
    let truth = Stokes::new(2.0, -0.3, 0.1, 0.5);

    let powers = polar_optim::simulate_powers(&IdealElements, &thetas, &truth);
    let fit = stokes_from_powers(&thetas, powers.as_slice(), &FitOptions::default()).unwrap();

    let err = (fit.stokes - truth).abs().max();
    assert!(err < 1e-4, "max component error {err}");
}

#[test]
fn fitted_coefficients_describe_the_power_curve() {
    let thetas = linspace(0.0, 2.0 * PI, 100);
    let truth = Stokes::new(1.0, 0.5, 0.3, -0.2);

    let powers = polar_optim::simulate_powers(&IdealElements, &thetas, &truth);
    let fit = stokes_from_powers(&thetas, powers.as_slice(), &FitOptions::default()).unwrap();

    for (&theta, &power) in thetas.iter().zip(powers.iter()) {
        assert!(
            (fit.coeffs.eval(theta) - power).abs() < 1e-4,
            "power model mismatch at θ={theta}"
        );
    }
}
