//! Bisection on the trial growth constant.
//!
//! A trial `lambda` is *feasible* when the generated program's optimum exceeds
//! the solver tolerance. Feasibility is monotone in `lambda`, so halving a
//! bracket `[lower, upper]` converges on the critical constant.

use crate::config::{Arithmetic, Config, SearchConfig};
use crate::error::{CoreError, CoreResult};
use crate::system::StateSystem;
use ctz_math::{LinearProgram, Scalar, SimplexSolver, SolverConfig};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[cfg(feature = "exact")]
use num_rational::BigRational;

/// A closed interval known to contain the critical value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Largest value known to be feasible
    pub lower: f64,
    /// Smallest value known to be infeasible
    pub upper: f64,
}

impl Bracket {
    /// Create a bracket.
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// `upper - lower`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Center of the interval.
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Whether `value` lies inside the closed interval.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// The same interval on the exponent scale `gamma = log2(lambda)`.
    pub fn gamma(&self) -> Bracket {
        Bracket::new(self.lower.log2(), self.upper.log2())
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}-{:.6}", self.lower, self.upper)
    }
}

/// One completed bisection step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionStep {
    /// Zero-based step number
    pub iteration: usize,
    /// Trial constant tested in this step
    pub lambda: f64,
    /// Whether `lambda` was feasible
    pub feasible: bool,
    /// Bracket after the update
    pub bracket: Bracket,
}

/// Whether `system` is feasible at trial constant `lambda`.
pub fn feasible(lambda: f64, system: &StateSystem, config: &SearchConfig) -> CoreResult<bool> {
    let program = system.generate(lambda);
    match config.arithmetic {
        Arithmetic::Float => exceeds_tolerance(program, &config.solver),
        #[cfg(feature = "exact")]
        Arithmetic::Exact => exceeds_tolerance(to_rational(program)?, &config.solver),
        #[cfg(not(feature = "exact"))]
        Arithmetic::Exact => Err(CoreError::InvalidConfig(
            "exact arithmetic requires the `exact` feature".to_string(),
        )),
    }
}

fn exceeds_tolerance<T: Scalar>(
    program: LinearProgram<T>,
    solver: &SolverConfig,
) -> CoreResult<bool> {
    let tolerance: T = solver.tolerance_as()?;
    let optimum = SimplexSolver::new(program, solver)?.maximize()?;
    Ok(optimum > tolerance)
}

#[cfg(feature = "exact")]
fn to_rational(program: LinearProgram<f64>) -> CoreResult<LinearProgram<BigRational>> {
    use num_traits::FromPrimitive;

    let mut rejected = None;
    let exact = program.try_map(|value| {
        let converted = BigRational::from_f64(*value);
        if converted.is_none() {
            rejected = Some(*value);
        }
        converted
    });
    exact.ok_or_else(|| {
        CoreError::Math(ctz_math::MathError::NonRepresentable(
            rejected.unwrap_or(f64::NAN),
        ))
    })
}

/// Run the configured number of bisection steps on `system`.
pub fn narrow(system: &StateSystem, config: &SearchConfig) -> CoreResult<Bracket> {
    narrow_with(system, config, |_| {})
}

/// [`narrow`], reporting every step to `on_step`.
pub fn narrow_with<F>(
    system: &StateSystem,
    config: &SearchConfig,
    mut on_step: F,
) -> CoreResult<Bracket>
where
    F: FnMut(&BisectionStep),
{
    config.validate()?;

    let mut bracket = Bracket::new(config.lower, config.upper);
    for iteration in 0..config.iterations {
        let lambda = bracket.midpoint();
        let feasible = feasible(lambda, system, config)?;
        if feasible {
            bracket.lower = lambda;
        } else {
            bracket.upper = lambda;
        }

        debug!(
            depth = system.depth(),
            iteration,
            lambda,
            feasible,
            lower = bracket.lower,
            upper = bracket.upper,
            "bisection step"
        );
        on_step(&BisectionStep {
            iteration,
            lambda,
            feasible,
            bracket,
        });
    }

    Ok(bracket)
}

/// Result of evaluating one depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Recursion depth
    pub depth: u32,
    /// Final bracket on lambda
    pub bracket: Bracket,
    /// Wall time spent building and narrowing
    pub elapsed: Duration,
}

impl Evaluation {
    /// Final bracket on `gamma = log2(lambda)`.
    pub fn gamma(&self) -> Bracket {
        self.bracket.gamma()
    }
}

/// Build the system of `depth` and narrow it.
pub fn evaluate<F>(depth: u32, config: &Config, on_step: F) -> CoreResult<Evaluation>
where
    F: FnMut(&BisectionStep),
{
    let start = Instant::now();
    let system = StateSystem::with_config(depth, config.generation)?;
    let bracket = narrow_with(&system, &config.search, on_step)?;
    let elapsed = start.elapsed();

    info!(
        depth,
        lambda = %bracket,
        gamma = %bracket.gamma(),
        elapsed_secs = elapsed.as_secs_f64(),
        "evaluation finished"
    );

    Ok(Evaluation {
        depth,
        bracket,
        elapsed,
    })
}
