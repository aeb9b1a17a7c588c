//! Error types for state generation and the bisection driver.

use ctz_math::{MathError, UnboundedDiagnostic};
use thiserror::Error;

/// Errors raised while building state systems or searching for the
/// critical growth constant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// State fails `m mod 3 = 2`, `m < 3^k` or `k >= 1`, or does not belong
    /// where it was used
    #[error("invalid state ({m}, {k})")]
    InvalidState {
        /// Residue-class identifier
        m: usize,
        /// Recursion depth
        k: u32,
    },

    /// Depth is zero, above the configured ceiling, or `3^k` does not fit
    /// in a machine word
    #[error("depth {0} is out of range")]
    DepthOutOfRange(u32),

    /// Rejected configuration value
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Relation algebra or solver failure
    #[error(transparent)]
    Math(#[from] MathError),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Tableau dump carried by the solver's unboundedness signal.
    pub fn unbounded_diagnostic(&self) -> Option<&UnboundedDiagnostic> {
        match self {
            CoreError::Math(MathError::UnboundedSystem(diagnostic)) => Some(diagnostic),
            _ => None,
        }
    }
}
