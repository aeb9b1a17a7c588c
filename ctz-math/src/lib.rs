//! ctz Math - Linear Relations and a Big-M Simplex Solver
//!
//! This crate provides the numeric building blocks used to evaluate the
//! growth-constant programs generated by `ctz-core`:
//! - [`Relation`] and [`LinearRelation`], a small algebra over linear rows
//! - [`LinearProgram`], a set of rows plus a maximization objective
//! - [`SimplexSolver`], a primal simplex that bootstraps `=`/`>=` rows with
//!   Big-M artificial variables
//!
//! Everything is generic over [`Scalar`], so the same solver runs on `f64`
//! and, with the `rational` feature, on exact [`BigRational`] values.
//!
//! # Examples
//!
//! ```
//! use ctz_math::{LinearProgram, LinearRelation, Relation, SimplexSolver, SolverConfig};
//!
//! // maximize x0 subject to x0 <= 5, x0 >= 0
//! let program = LinearProgram::new(
//!     vec![
//!         LinearRelation::new(vec![1.0], 5.0, Relation::LessOrEqual),
//!         LinearRelation::new(vec![1.0], 0.0, Relation::GreaterOrEqual),
//!     ],
//!     LinearRelation::new(vec![1.0], 0.0, Relation::Equal),
//! );
//!
//! let solver = SimplexSolver::new(program, &SolverConfig::default()).unwrap();
//! let optimum: f64 = solver.maximize().unwrap();
//! assert!((optimum - 5.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod error;
pub mod num;
pub mod program;
pub mod relation;
pub mod simplex;

pub use config::SolverConfig;
pub use error::{MathError, MathResult, UnboundedDiagnostic};
pub use num::Scalar;
pub use program::LinearProgram;
pub use relation::{LinearRelation, Relation};
pub use simplex::{SimplexSolver, SimplexStats, Solution, Termination};

#[cfg(feature = "rational")]
pub use num::{BigInt, BigRational};
