//! The full depth-k program: state equations, the anchor row and the
//! telescoping ordering rows.

use crate::config::GenerationConfig;
use crate::equation::StateEquation;
use crate::error::{CoreError, CoreResult};
use crate::state::{State, variable_count};
use ctz_math::{LinearProgram, LinearRelation, Relation};
use tracing::debug;

/// All state equations of one depth.
///
/// Built once per depth. [`StateSystem::generate`] produces a fresh
/// [`LinearProgram`] on every call; nothing is cached between trial
/// constants.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSystem {
    depth: u32,
    variable_count: usize,
    /// One equation per depth-k state, in increasing residue order
    equations: Vec<StateEquation>,
    config: GenerationConfig,
}

impl StateSystem {
    /// Build the system of depth `depth` with default generation constants.
    pub fn new(depth: u32) -> CoreResult<Self> {
        Self::with_config(depth, GenerationConfig::default())
    }

    /// Build the system of depth `depth`.
    ///
    /// Depths above [`GenerationConfig::max_depth`] are rejected with
    /// [`CoreError::DepthOutOfRange`] before anything is allocated.
    pub fn with_config(depth: u32, config: GenerationConfig) -> CoreResult<Self> {
        if depth > config.max_depth {
            return Err(CoreError::DepthOutOfRange(depth));
        }
        let variable_count = variable_count(depth)?;
        let equations = State::all_at(depth)?
            .map(|state| StateEquation::new(state.residue(), depth, &config))
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Self {
            depth,
            variable_count,
            equations,
            config,
        })
    }

    /// Recursion depth.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of LP variables, `(3^k - 1) / 2`.
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Generation constants.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// All equations, in increasing residue order.
    pub fn equations(&self) -> &[StateEquation] {
        &self.equations
    }

    /// Equation of state `(residue, depth)`.
    pub fn equation(&self, residue: usize, depth: u32) -> CoreResult<&StateEquation> {
        let position = self.position(residue, depth)?;
        Ok(&self.equations[position])
    }

    /// Replace the equation of state `(residue, depth)`.
    pub fn set_equation(
        &mut self,
        residue: usize,
        depth: u32,
        equation: StateEquation,
    ) -> CoreResult<()> {
        let position = self.position(residue, depth)?;
        if equation.state() != State::from_parts(residue, depth) {
            let found = equation.state();
            return Err(CoreError::InvalidState {
                m: found.residue(),
                k: found.depth(),
            });
        }
        self.equations[position] = equation;
        Ok(())
    }

    fn position(&self, residue: usize, depth: u32) -> CoreResult<usize> {
        State::new(residue, depth)?;
        if depth != self.depth {
            return Err(CoreError::InvalidState {
                m: residue,
                k: depth,
            });
        }
        Ok((residue - 2) / 3)
    }

    /// Number of rows [`StateSystem::generate`] produces:
    /// `3^(k-1)` equations, the anchor and `V - 1` ordering rows.
    pub fn row_count(&self) -> usize {
        self.equations.len() + self.variable_count
    }

    /// Parent/child pairs linked by ordering rows, depth by depth.
    ///
    /// Every state `(n, d)` with `d < k` is paired with its three
    /// [`State::children`].
    pub fn ordering_pairs(&self) -> impl Iterator<Item = (State, State)> {
        // Depths below k were sized when the system was built and cannot overflow.
        (1..self.depth)
            .flat_map(|depth| State::all_at(depth).into_iter().flatten())
            .flat_map(|parent| {
                parent
                    .children()
                    .into_iter()
                    .flatten()
                    .map(move |child| (parent, child))
            })
    }

    /// Objective row: maximize `x0`.
    pub fn objective() -> LinearRelation<f64> {
        LinearRelation::new(vec![1.0], 0.0, Relation::Equal)
    }

    /// Materialize the program at trial constant `lambda`.
    pub fn generate(&self, lambda: f64) -> LinearProgram<f64> {
        let mut rows = Vec::with_capacity(self.row_count());

        for equation in &self.equations {
            rows.push(
                equation
                    .mu_truncation(self.config.baseline)
                    .generate(lambda),
            );
        }

        // x(2, 1) <= 1 fixes the scale
        rows.push(LinearRelation::new(vec![1.0], 1.0, Relation::LessOrEqual));

        for (parent, child) in self.ordering_pairs() {
            let mut coefficients = vec![0.0; self.variable_count];
            coefficients[parent.flat_index()] = 1.0;
            coefficients[child.flat_index()] = -1.0;
            rows.push(LinearRelation::new(coefficients, 0.0, Relation::LessOrEqual));
        }

        debug!(
            depth = self.depth,
            lambda,
            rows = rows.len(),
            variables = self.variable_count,
            "generated state system"
        );

        LinearProgram::new(rows, Self::objective())
    }
}
