//! Full Mueller polarimeter measurement with synthetic data.
//!
//! 1. Calibration "air" measurement against the identity matrix
//! 2. Measurement of a compound retarder–polarizer–retarder sample
//! 3. Comparison with ground truth and the conditioning diagnostic
//!
//! Run with: `cargo run -p polarimetry --example full_mueller`

use anyhow::Result;
use polarimetry::prelude::*;
use std::f64::consts::PI;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Full Mueller Polarimetry (Synthetic) ===\n");

    let elements = IdealElements;
    let thetas = linspace(0.0, PI, 40);

    // Calibration air measurement
    let air = simulate_mueller(&elements, &thetas, &Mueller::identity(), 1.0)?;
    println!("Air measurement:\n{:.6}", air.mueller);
    println!("Condition number: {:.3}\n", air.condition_number);

    // Sample under test: retarder / polarizer / retarder stack
    let truth: Mueller = elements.linear_retarder(PI / 22.0, QUARTER_WAVE)
        * elements.linear_polarizer(PI / 4.0)
        * elements.linear_retarder(PI / 16.0, QUARTER_WAVE);
    println!("Mueller in:\n{:.6}", truth);

    let fit = simulate_mueller(&elements, &thetas, &truth, 1.0)?;
    println!("Mueller out:\n{:.6}", fit.mueller);

    let max_err = (fit.mueller - truth).abs().max();
    println!("Max element error: {max_err:.3e}");

    Ok(())
}
