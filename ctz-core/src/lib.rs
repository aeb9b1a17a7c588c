//! ctz Core - State Systems and Growth-Constant Bisection
//!
//! Encodes a Collatz-like family of functional inequalities as linear
//! programs and brackets its critical growth constant:
//! - [`State`] and the flat numbering of LP variables
//! - [`StateEquation`], one inequality per recursion state
//! - [`StateSystem`], the full depth-k program (equations, anchor and
//!   telescoping ordering rows)
//! - [`narrow`] / [`evaluate`], bisection on the trial constant
//!
//! Work and memory grow exponentially with the depth: a depth-k program has
//! `(3^k - 1) / 2` variables and a dense tableau over them.
//!
//! # Examples
//!
//! ```
//! use ctz_core::{SearchConfig, StateSystem, narrow};
//!
//! let system = StateSystem::new(2).unwrap();
//! let bracket = narrow(&system, &SearchConfig::default().with_iterations(5)).unwrap();
//! assert_eq!((bracket.lower, bracket.upper), (1.3125, 1.34375));
//! ```

pub mod config;
pub mod equation;
pub mod error;
pub mod search;
pub mod state;
pub mod system;

pub use config::{Arithmetic, Config, GenerationConfig, SearchConfig};
pub use equation::{ResidueClass, StateEquation};
pub use error::{CoreError, CoreResult};
pub use search::{BisectionStep, Bracket, Evaluation, evaluate, feasible, narrow, narrow_with};
pub use state::{State, power_of_three, variable_count};
pub use system::StateSystem;
