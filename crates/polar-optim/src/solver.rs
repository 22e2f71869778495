//! Levenberg–Marquardt driver for the sinusoid fit.

use anyhow::{anyhow, Result};
use nalgebra::DVector;
use std::collections::HashMap;
use tiny_solver::optimizer::{Optimizer, OptimizerOptions};
use tiny_solver::problem::Problem;
use tiny_solver::LevenbergMarquardtOptimizer;

/// Options for the power-curve fit.
///
/// The model has a single dense four-parameter block, so the only knobs
/// worth exposing are the iteration bound and the stopping tolerance;
/// everything else keeps tiny-solver's defaults. The iteration count is
/// always bounded so a pathological sample set surfaces as a fit
/// failure instead of spinning.
#[derive(Debug, Clone, Copy)]
pub struct FitOptions {
    /// Upper bound on optimizer iterations. The sinusoid model is linear
    /// in its coefficients, so well-posed fits converge in a handful.
    pub max_iters: usize,
    /// Relative cost decrease below which the fit counts as converged.
    pub rel_cost_tolerance: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iters: 50,
            rel_cost_tolerance: 1e-12,
        }
    }
}

impl FitOptions {
    fn to_optimizer_options(&self) -> OptimizerOptions {
        let mut opts = OptimizerOptions::default();
        opts.max_iteration = self.max_iters;
        opts.min_rel_error_decrease_threshold = self.rel_cost_tolerance;
        opts
    }
}

/// Solve a tiny-solver problem with the given initial values and options.
///
/// Non-convergence propagates as an error rather than returning the last
/// iterate.
pub fn solve(
    problem: &Problem,
    initial: HashMap<String, DVector<f64>>,
    opts: &FitOptions,
) -> Result<HashMap<String, DVector<f64>>> {
    let optimizer = LevenbergMarquardtOptimizer::default();
    let options = opts.to_optimizer_options();
    optimizer
        .optimize(problem, &initial, Some(options))
        .ok_or_else(|| anyhow!("sinusoid fit failed to converge"))
}
