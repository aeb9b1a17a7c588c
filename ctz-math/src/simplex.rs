//! Primal Simplex with Big-M Bootstrapping.
//!
//! Maximizes a linear objective subject to a mix of `<=`, `=` and `>=` rows.
//!
//! ## Standardization
//!
//! Every input row receives one auxiliary column:
//! - `<=` rows get a slack (`+1`)
//! - `>=` rows get a surplus (`-1`) and an artificial (`+1`)
//! - `=` rows get an artificial (`+1`)
//!
//! Artificial columns cost `-M` in the objective and seed the basis at `-M`.
//! All rows then become equalities over `n + #auxiliary` columns.
//!
//! ## Iteration
//!
//! - Entering column: largest reduced cost (Dantzig rule, no anti-cycling)
//! - Leaving row: minimum ratio among strictly positive entries, preferring
//!   rows whose bound is already within tolerance of zero
//! - Optional early exit once the objective constant proves the optimum is
//!   strictly positive
//!
//! A solver is single-shot: [`SimplexSolver::solve`] consumes it.

#![allow(clippy::needless_range_loop)] // Tableau code indexes rows and columns explicitly

use crate::config::SolverConfig;
use crate::error::{MathError, MathResult, UnboundedDiagnostic};
use crate::num::Scalar;
use crate::program::LinearProgram;
use crate::relation::{LinearRelation, Relation};
use num_traits::Zero;
use tracing::{debug, trace};

/// How a solve finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// No improving column remains; the value is the optimum
    Optimal,
    /// Stopped as soon as the optimum was known to exceed the tolerance; the
    /// value is the sentinel `1`
    EarlyExit,
}

/// Simplex statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplexStats {
    /// Number of iterations (pricing rounds)
    pub iterations: usize,
    /// Number of pivot operations
    pub pivots: usize,
    /// Number of candidate rows examined by the ratio test
    pub ratio_tests: usize,
}

/// Outcome of a successful solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<T> {
    /// Optimum, or `1` on early exit
    pub value: T,
    /// How the solve finished
    pub termination: Termination,
    /// Work performed
    pub stats: SimplexStats,
}

/// Big-M primal simplex solver.
#[derive(Debug, Clone)]
pub struct SimplexSolver<T> {
    /// Standardized constraint rows (all equalities)
    system: Vec<LinearRelation<T>>,
    /// Objective row widened with the Big-M penalties
    objective: LinearRelation<T>,
    /// Objective coefficient of the variable basic in each row
    basis: Vec<T>,
    /// Number of original variables
    variable_count: usize,
    /// Number of slack, surplus and artificial columns
    auxiliary_count: usize,
    tolerance: T,
    early_exit: bool,
    stats: SimplexStats,
}

impl<T: Scalar> SimplexSolver<T> {
    /// Standardize `program` and prepare the initial basis.
    pub fn new(program: LinearProgram<T>, config: &SolverConfig) -> MathResult<Self> {
        let big_m: T = config.big_m_as()?;
        let tolerance: T = config.tolerance_as()?;

        let variable_count = program.variable_count();
        let (mut system, mut objective) = program.into_parts();

        let auxiliary_count = system
            .iter()
            .map(|row| if row.is_greater() { 2 } else { 1 })
            .sum::<usize>();
        let width = variable_count + auxiliary_count;

        objective.resize(width);
        let mut basis = vec![T::zero(); system.len()];

        let mut column = variable_count;
        for (row, basis_value) in system.iter_mut().zip(basis.iter_mut()) {
            row.resize(width);
            if row.is_greater() {
                row.coefficients_mut()[column] = -T::one();
                column += 1;
            }
            if !row.is_less() {
                objective.coefficients_mut()[column] = -big_m.clone();
                *basis_value = -big_m.clone();
            }
            row.coefficients_mut()[column] = T::one();
            column += 1;
            row.set_relation(Relation::Equal);
        }

        Ok(Self {
            system,
            objective,
            basis,
            variable_count,
            auxiliary_count,
            tolerance,
            early_exit: config.early_exit,
            stats: SimplexStats::default(),
        })
    }

    /// Number of original variables.
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Number of auxiliary columns added by standardization.
    pub fn auxiliary_count(&self) -> usize {
        self.auxiliary_count
    }

    /// Standardized constraint rows.
    pub fn rows(&self) -> &[LinearRelation<T>] {
        &self.system
    }

    /// Objective row including the Big-M penalties.
    pub fn objective(&self) -> &LinearRelation<T> {
        &self.objective
    }

    /// Objective coefficient recorded for each basis row.
    pub fn basis(&self) -> &[T] {
        &self.basis
    }

    /// Run to optimality (or early exit) and return the objective value.
    pub fn maximize(self) -> MathResult<T> {
        self.solve().map(|solution| solution.value)
    }

    /// Run to optimality (or early exit).
    pub fn solve(mut self) -> MathResult<Solution<T>> {
        let mut contribution = self.objective.clone();

        loop {
            self.stats.iterations += 1;

            // Pricing
            let pivot_col = match self.select_pivot_column(&contribution) {
                Some(col) if contribution.coefficients()[col] > self.tolerance => col,
                _ => {
                    debug!(
                        iterations = self.stats.iterations,
                        pivots = self.stats.pivots,
                        "simplex optimal"
                    );
                    return Ok(Solution {
                        value: -contribution.bound().clone(),
                        termination: Termination::Optimal,
                        stats: self.stats,
                    });
                }
            };

            // Ratio test
            let Some(pivot_row) = self.select_pivot_row(pivot_col) else {
                debug!(
                    iterations = self.stats.iterations,
                    pivot_col, "simplex unbounded"
                );
                return Err(self.unbounded(pivot_col, &contribution));
            };

            self.pivot(pivot_row, pivot_col, &mut contribution)?;

            trace!(
                iteration = self.stats.iterations,
                pivot_row,
                pivot_col,
                objective = %contribution.bound(),
                "simplex pivot"
            );

            if self.early_exit && *contribution.bound() < -self.tolerance.clone() {
                debug!(
                    iterations = self.stats.iterations,
                    pivots = self.stats.pivots,
                    "simplex early exit"
                );
                return Ok(Solution {
                    value: T::one(),
                    termination: Termination::EarlyExit,
                    stats: self.stats,
                });
            }
        }
    }

    /// First column holding the maximum reduced cost.
    fn select_pivot_column(&self, contribution: &LinearRelation<T>) -> Option<usize> {
        let coefficients = contribution.coefficients();
        if coefficients.is_empty() {
            return None;
        }

        let mut pivot_col = 0;
        for col in 1..coefficients.len() {
            if coefficients[col] > coefficients[pivot_col] {
                pivot_col = col;
            }
        }
        Some(pivot_col)
    }

    /// Minimum-ratio row with the "bound already at zero" preference.
    fn select_pivot_row(&mut self, pivot_col: usize) -> Option<usize> {
        let mut pivot_row: Option<usize> = None;

        for row in 0..self.system.len() {
            let entry = &self.system[row].coefficients()[pivot_col];
            if *entry <= self.tolerance {
                continue;
            }
            self.stats.ratio_tests += 1;

            let replace = match pivot_row {
                None => true,
                Some(best) => {
                    let best_entry = &self.system[best].coefficients()[pivot_col];
                    let ratio = self.system[row].bound().clone() / entry.clone();
                    let best_ratio = self.system[best].bound().clone() / best_entry.clone();
                    ratio < best_ratio
                        || (*self.system[row].bound() <= self.tolerance && entry > best_entry)
                }
            };
            if replace {
                pivot_row = Some(row);
            }
        }

        pivot_row
    }

    /// Normalize the pivot row and eliminate the pivot column everywhere else.
    fn pivot(
        &mut self,
        pivot_row: usize,
        pivot_col: usize,
        contribution: &mut LinearRelation<T>,
    ) -> MathResult<()> {
        self.stats.pivots += 1;
        self.basis[pivot_row] = self.objective.coefficients()[pivot_col].clone();

        let pivot_entry = self.system[pivot_row].coefficients()[pivot_col].clone();
        self.system[pivot_row].divide(&pivot_entry, &self.tolerance);
        let pivot = self.system[pivot_row].clone();

        for (row, relation) in self.system.iter_mut().enumerate() {
            if row == pivot_row {
                continue;
            }
            let factor = relation.coefficients()[pivot_col].clone();
            if factor.is_zero() {
                continue;
            }
            relation.sub_scaled_assign(&pivot, &factor, &self.tolerance)?;
        }

        let factor = contribution.coefficients()[pivot_col].clone();
        contribution.sub_scaled_assign(&pivot, &factor, &self.tolerance)
    }

    fn unbounded(&self, pivot_col: usize, contribution: &LinearRelation<T>) -> MathError {
        MathError::UnboundedSystem(Box::new(UnboundedDiagnostic {
            pivot_column: pivot_col,
            basis: self.basis.iter().map(ToString::to_string).collect(),
            contribution: contribution.to_string(),
            objective: self.objective.to_string(),
            system: self.system.iter().map(ToString::to_string).collect(),
        }))
    }
}
