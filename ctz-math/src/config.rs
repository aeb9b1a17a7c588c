//! Runtime tuning for the simplex solver.

use crate::error::{MathError, MathResult};
use crate::num::Scalar;
use serde::{Deserialize, Serialize};

/// Configuration for [`SimplexSolver`](crate::SimplexSolver).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Penalty attached to artificial variables. Must dominate every feasible
    /// objective value.
    pub big_m: f64,
    /// Comparison tolerance for optimality, pivot eligibility and the
    /// early-exit test.
    pub tolerance: f64,
    /// Stop with the sentinel value `1` as soon as the objective constant
    /// proves the optimum exceeds `tolerance`.
    pub early_exit: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            big_m: 1e6,
            tolerance: 1e-6,
            early_exit: false,
        }
    }
}

impl SolverConfig {
    /// Set the Big-M penalty.
    pub fn with_big_m(mut self, big_m: f64) -> Self {
        self.big_m = big_m;
        self
    }

    /// Set the numeric tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enable or disable the early feasibility shortcut.
    pub fn with_early_exit(mut self, early_exit: bool) -> Self {
        self.early_exit = early_exit;
        self
    }

    /// Convert the Big-M penalty into the scalar type.
    pub fn big_m_as<T: Scalar>(&self) -> MathResult<T> {
        T::from_f64(self.big_m).ok_or(MathError::NonRepresentable(self.big_m))
    }

    /// Convert the tolerance into the scalar type.
    pub fn tolerance_as<T: Scalar>(&self) -> MathResult<T> {
        T::from_f64(self.tolerance).ok_or(MathError::NonRepresentable(self.tolerance))
    }
}
