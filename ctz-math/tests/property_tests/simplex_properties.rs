//! Property-based tests for the simplex solver
//!
//! This module tests:
//! - Optimal values on problems with a known closed form
//! - Early-exit agreement with the full optimum
//! - Unboundedness detection

use ctz_math::{
    LinearProgram, LinearRelation, MathError, Relation, SimplexSolver, SolverConfig, Termination,
};
use proptest::prelude::*;

/// Strategy for positive bounds
fn bound_strategy() -> impl Strategy<Value = f64> {
    1.0f64..1000.0
}

/// Strategy for positive objective weights
fn weight_strategy() -> impl Strategy<Value = f64> {
    0.5f64..20.0
}

fn row(coefficients: &[f64], bound: f64, relation: Relation) -> LinearRelation<f64> {
    LinearRelation::new(coefficients.to_vec(), bound, relation)
}

fn maximize(rows: Vec<LinearRelation<f64>>, goal: &[f64], config: &SolverConfig) -> f64 {
    let program = LinearProgram::new(rows, row(goal, 0.0, Relation::Equal));
    SimplexSolver::new(program, config)
        .expect("valid configuration")
        .maximize()
        .expect("bounded program")
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-7 * b.abs().max(1.0)
}

#[cfg(test)]
mod simplex_optimality_properties {
    use super::*;

    proptest! {
        /// maximize c*x subject to x <= b, x >= 0
        #[test]
        fn single_variable_optimum(c in weight_strategy(), b in bound_strategy()) {
            let value = maximize(
                vec![
                    row(&[1.0], b, Relation::LessOrEqual),
                    row(&[1.0], 0.0, Relation::GreaterOrEqual),
                ],
                &[c],
                &SolverConfig::default(),
            );
            prop_assert!(close(value, c * b), "expected {}, got {}", c * b, value);
        }

        /// maximize x0 + x1 subject to x0 + x1 <= b
        #[test]
        fn shared_budget_optimum(b in bound_strategy()) {
            let value = maximize(
                vec![row(&[1.0, 1.0], b, Relation::LessOrEqual)],
                &[1.0, 1.0],
                &SolverConfig::default(),
            );
            prop_assert!(close(value, b));
        }

        /// maximize x0 + x1 subject to x0 <= a, x1 <= b
        #[test]
        fn box_optimum(a in bound_strategy(), b in bound_strategy()) {
            let value = maximize(
                vec![
                    row(&[1.0, 0.0], a, Relation::LessOrEqual),
                    row(&[0.0, 1.0], b, Relation::LessOrEqual),
                ],
                &[1.0, 1.0],
                &SolverConfig::default(),
            );
            prop_assert!(close(value, a + b));
        }

        /// A positive optimum triggers the early exit sentinel
        #[test]
        fn early_exit_reports_positive(a in bound_strategy(), b in bound_strategy()) {
            let program = LinearProgram::new(
                vec![
                    row(&[1.0, 0.0], a, Relation::LessOrEqual),
                    row(&[0.0, 1.0], b, Relation::LessOrEqual),
                ],
                row(&[1.0, 1.0], 0.0, Relation::Equal),
            );
            let config = SolverConfig::default().with_early_exit(true);
            let solution = SimplexSolver::new(program, &config)
                .expect("valid configuration")
                .solve()
                .expect("bounded program");
            prop_assert_eq!(solution.termination, Termination::EarlyExit);
            prop_assert_eq!(solution.value, 1.0);
        }
    }
}

#[cfg(test)]
mod simplex_unbounded_properties {
    use super::*;

    proptest! {
        /// maximize x0 subject to x0 >= b has no finite optimum
        #[test]
        fn lower_bound_only_is_unbounded(b in 0.0f64..100.0) {
            let program = LinearProgram::new(
                vec![row(&[1.0], b, Relation::GreaterOrEqual)],
                row(&[1.0], 0.0, Relation::Equal),
            );
            let result = SimplexSolver::new(program, &SolverConfig::default())
                .expect("valid configuration")
                .solve();
            let is_unbounded = matches!(result, Err(MathError::UnboundedSystem(_)));
            prop_assert!(is_unbounded);
        }
    }
}
