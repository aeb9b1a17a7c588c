//! Error types for relation algebra and simplex solving.

use crate::relation::Relation;
use std::fmt;
use thiserror::Error;

/// Errors raised by [`LinearRelation`](crate::LinearRelation) arithmetic and
/// by [`SimplexSolver`](crate::SimplexSolver).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Addition or subtraction across a `<=`-like and a `>=`-like relation
    #[error("incompatible relations: cannot combine `{lhs}` with `{rhs}`")]
    IncompatibleRelation {
        /// Relation of the left operand
        lhs: Relation,
        /// Relation of the right operand
        rhs: Relation,
    },

    /// An improving column exists but no row bounds it
    #[error("unbounded system: no pivot row for column {}", .0.pivot_column)]
    UnboundedSystem(Box<UnboundedDiagnostic>),

    /// A configuration constant has no representation in the scalar type
    #[error("configuration constant {0} is not representable in the solver's scalar type")]
    NonRepresentable(f64),
}

/// Result type for math operations
pub type MathResult<T> = Result<T, MathError>;

/// Snapshot of the tableau at the moment unboundedness was detected.
///
/// Rows are rendered eagerly so the error stays independent of the scalar
/// type; `Display` produces the full postmortem dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnboundedDiagnostic {
    /// Column that was selected to enter the basis
    pub pivot_column: usize,
    /// Objective coefficient recorded for each basis row
    pub basis: Vec<String>,
    /// Current reduced-cost row
    pub contribution: String,
    /// Original (augmented) objective row
    pub objective: String,
    /// Every constraint row of the tableau
    pub system: Vec<String>,
}

impl fmt::Display for UnboundedDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "basis: {{ {} }}", self.basis.join(" "))?;
        writeln!(f, "contribution:")?;
        writeln!(f, "{}", self.contribution)?;
        writeln!(f, "objective:")?;
        writeln!(f, "{}", self.objective)?;
        writeln!(f, "system:")?;
        for row in &self.system {
            writeln!(f, "{}", row)?;
        }
        write!(f, "pivot_col = {}", self.pivot_column)
    }
}
