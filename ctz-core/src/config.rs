//! Runtime configuration for generation and search.

use crate::error::{CoreError, CoreResult};
use ctz_math::SolverConfig;
use serde::{Deserialize, Serialize};

/// Constants used when deriving state equations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Value substituted for negative exponents by mu-truncation
    pub baseline: f64,
    /// Structural constant `log2(3)` entering the predecessor exponents
    pub log2_three: f64,
    /// Deepest system that may be built; the dense tableau grows as `9^k`
    pub max_depth: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            baseline: 0.0,
            log2_three: 3f64.log2(),
            max_depth: 8,
        }
    }
}

impl GenerationConfig {
    /// Set the truncation baseline.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Set the structural constant.
    pub fn with_log2_three(mut self, log2_three: f64) -> Self {
        self.log2_three = log2_three;
        self
    }

    /// Set the deepest system that may be built.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Scalar type used to solve generated programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arithmetic {
    /// `f64` throughout
    #[default]
    Float,
    /// Generate in `f64`, solve over `BigRational`
    Exact,
}

/// Bisection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of bisection steps
    pub iterations: usize,
    /// Initial lower end of the bracket on lambda
    pub lower: f64,
    /// Initial upper end of the bracket on lambda
    pub upper: f64,
    /// Scalar type for solving
    pub arithmetic: Arithmetic,
    /// Simplex tuning
    pub solver: SolverConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: 20,
            lower: 1.0,
            upper: 2.0,
            arithmetic: Arithmetic::Float,
            solver: SolverConfig::default().with_early_exit(true),
        }
    }
}

impl SearchConfig {
    /// Set the number of bisection steps.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the initial bracket.
    pub fn with_bracket(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    /// Set the scalar type used for solving.
    pub fn with_arithmetic(mut self, arithmetic: Arithmetic) -> Self {
        self.arithmetic = arithmetic;
        self
    }

    /// Set the solver configuration.
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Reject brackets the driver cannot narrow.
    pub fn validate(&self) -> CoreResult<()> {
        if self.iterations == 0 {
            return Err(CoreError::InvalidConfig(
                "iteration count must be at least 1".to_string(),
            ));
        }
        if !(self.lower.is_finite() && self.upper.is_finite()) {
            return Err(CoreError::InvalidConfig(format!(
                "bracket [{}, {}] must be finite",
                self.lower, self.upper
            )));
        }
        if self.lower <= 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "lower bound {} must be positive",
                self.lower
            )));
        }
        if self.lower >= self.upper {
            return Err(CoreError::InvalidConfig(format!(
                "bracket [{}, {}] is empty",
                self.lower, self.upper
            )));
        }
        if self.arithmetic == Arithmetic::Exact && !cfg!(feature = "exact") {
            return Err(CoreError::InvalidConfig(
                "exact arithmetic requires the `exact` feature".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything a driver needs to evaluate a depth.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Equation derivation constants
    pub generation: GenerationConfig,
    /// Bisection parameters
    pub search: SearchConfig,
}
