//! State equations: one functional inequality per recursion state.
//!
//! Each equation maps its dependency states to an exponent `alpha`. At a
//! trial constant `lambda` the equation linearizes to
//!
//! ```text
//! x(own) - sum lambda^(-alpha) * x(dependency) <= 0
//! ```

use crate::config::GenerationConfig;
use crate::error::{CoreError, CoreResult};
use crate::state::{State, power_of_three, variable_count};
use ctz_math::{LinearRelation, Relation};
use rustc_hash::FxHashMap;
use std::fmt;

/// Branch of the recursion selected by `m mod 9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueClass {
    /// `m mod 9 = 2`: image plus a `(4m - 2) / 3` predecessor
    Two,
    /// `m mod 9 = 5`: image only
    Five,
    /// `m mod 9 = 8`: image plus a `(2m - 1) / 3` predecessor
    Eight,
}

impl ResidueClass {
    /// Classify a residue already known to satisfy `m mod 3 = 2`.
    pub fn of(residue: usize) -> Self {
        match residue % 9 {
            2 => ResidueClass::Two,
            5 => ResidueClass::Five,
            _ => ResidueClass::Eight,
        }
    }
}

/// The inequality attached to one state `(m, k)`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateEquation {
    state: State,
    /// Width of the generated row: the variable count at the own depth
    width: usize,
    alphas: FxHashMap<State, f64>,
}

impl StateEquation {
    /// Derive the equation of state `(residue, depth)`.
    ///
    /// Predecessors live one depth up and are only recorded for `depth >= 2`;
    /// depth 0 has no variable to refer to.
    pub fn new(residue: usize, depth: u32, config: &GenerationConfig) -> CoreResult<Self> {
        let state = State::new(residue, depth)?;
        let modulus = power_of_three(depth)?;
        let width = variable_count(depth)?;
        let quadruple = residue
            .checked_mul(4)
            .ok_or(CoreError::DepthOutOfRange(depth))?;
        let image = quadruple % modulus;

        let mut alphas = FxHashMap::default();
        alphas.insert(State::from_parts(image, depth), 2.0);

        if depth >= 2 {
            let parent_modulus = modulus / 3;
            let predecessor = match ResidueClass::of(residue) {
                ResidueClass::Two => Some(((quadruple - 2) / 3, 2.0 - config.log2_three)),
                ResidueClass::Five => None,
                ResidueClass::Eight => Some(((2 * residue - 1) / 3, 1.0 - config.log2_three)),
            };
            if let Some((predecessor, alpha)) = predecessor {
                alphas.insert(
                    State::from_parts(predecessor % parent_modulus, depth - 1),
                    alpha,
                );
            }
        }

        Ok(Self {
            state,
            width,
            alphas,
        })
    }

    /// Own state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Recursion branch of the own state.
    pub fn residue_class(&self) -> ResidueClass {
        ResidueClass::of(self.state.residue())
    }

    /// Exponent recorded for a dependency, if any.
    pub fn alpha(&self, residue: usize, depth: u32) -> Option<f64> {
        let dependency = State::new(residue, depth).ok()?;
        self.alphas.get(&dependency).copied()
    }

    /// Record (or overwrite) the exponent of a dependency.
    ///
    /// The dependency must be a valid state no deeper than the own state.
    pub fn set_alpha(&mut self, residue: usize, depth: u32, alpha: f64) -> CoreResult<()> {
        let dependency = State::new(residue, depth)?;
        if depth > self.state.depth() {
            return Err(CoreError::InvalidState {
                m: residue,
                k: depth,
            });
        }
        self.alphas.insert(dependency, alpha);
        Ok(())
    }

    /// Dependencies with their exponents, ordered by state.
    pub fn dependencies(&self) -> Vec<(State, f64)> {
        let mut dependencies: Vec<(State, f64)> =
            self.alphas.iter().map(|(state, alpha)| (*state, *alpha)).collect();
        dependencies.sort_by_key(|(state, _)| *state);
        dependencies
    }

    /// Number of dependencies.
    pub fn len(&self) -> usize {
        self.alphas.len()
    }

    /// Whether there are no dependencies.
    pub fn is_empty(&self) -> bool {
        self.alphas.is_empty()
    }

    /// Copy of this equation with every negative exponent replaced by
    /// `baseline`. The receiver is left untouched.
    pub fn mu_truncation(&self, baseline: f64) -> Self {
        let mut truncated = self.clone();
        for alpha in truncated.alphas.values_mut() {
            if *alpha < 0.0 {
                *alpha = baseline;
            }
        }
        truncated
    }

    /// Linearize at trial constant `lambda`.
    ///
    /// The own coefficient is written first; a dependency that lands on the
    /// own index overwrites it.
    pub fn generate(&self, lambda: f64) -> LinearRelation<f64> {
        let mut coefficients = vec![0.0; self.width];
        coefficients[self.state.flat_index()] = 1.0;
        for (dependency, alpha) in &self.alphas {
            coefficients[dependency.flat_index()] = -lambda.powf(-alpha);
        }
        LinearRelation::new(coefficients, 0.0, Relation::LessOrEqual)
    }
}

impl fmt::Display for StateEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <=", self.state)?;
        for (index, (dependency, alpha)) in self.dependencies().into_iter().enumerate() {
            let separator = if index == 0 { " " } else { " + " };
            write!(f, "{separator}lambda^({:.6}) * {}", -alpha, dependency)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equation(residue: usize, depth: u32) -> StateEquation {
        StateEquation::new(residue, depth, &GenerationConfig::default()).unwrap()
    }

    fn state(residue: usize, depth: u32) -> State {
        State::new(residue, depth).unwrap()
    }

    #[test]
    fn test_rejects_invalid_state() {
        let config = GenerationConfig::default();
        assert_eq!(
            StateEquation::new(4, 2, &config),
            Err(CoreError::InvalidState { m: 4, k: 2 })
        );
        assert!(StateEquation::new(2, 0, &config).is_err());
    }

    #[test]
    fn test_residue_two_branch() {
        let eq = equation(2, 2);
        assert_eq!(eq.residue_class(), ResidueClass::Two);
        assert_eq!(
            eq.dependencies(),
            vec![(state(2, 1), 2.0 - 3f64.log2()), (state(8, 2), 2.0)]
        );
    }

    #[test]
    fn test_residue_five_branch() {
        let eq = equation(5, 2);
        assert_eq!(eq.residue_class(), ResidueClass::Five);
        assert_eq!(eq.dependencies(), vec![(state(2, 2), 2.0)]);
    }

    #[test]
    fn test_residue_eight_branch() {
        let eq = equation(8, 2);
        assert_eq!(eq.residue_class(), ResidueClass::Eight);
        assert_eq!(
            eq.dependencies(),
            vec![(state(2, 1), 1.0 - 3f64.log2()), (state(5, 2), 2.0)]
        );
    }

    #[test]
    fn test_depth_one_has_no_predecessor() {
        let eq = equation(2, 1);
        assert_eq!(eq.len(), 1);
        assert_eq!(eq.alpha(2, 1), Some(2.0));
    }

    #[test]
    fn test_generate_row() {
        let row = equation(8, 2).mu_truncation(0.0).generate(1.5);
        assert_eq!(row.relation(), Relation::LessOrEqual);
        assert_eq!(*row.bound(), 0.0);
        let expected = [-1.0, 0.0, -1.5f64.powf(-2.0), 1.0];
        assert_eq!(row.variable_count(), expected.len());
        for (actual, expected) in row.coefficients().iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_generate_overwrites_own_coefficient() {
        // (2, 1) maps onto itself
        let row = equation(2, 1).generate(2.0);
        assert_eq!(row.coefficients(), &[-0.25]);
    }

    #[test]
    fn test_set_alpha_overwrites() {
        let mut eq = equation(8, 2);
        eq.set_alpha(2, 1, 0.5).unwrap();
        assert_eq!(eq.alpha(2, 1), Some(0.5));
        assert_eq!(eq.len(), 2);

        eq.set_alpha(8, 2, -1.0).unwrap();
        assert_eq!(eq.alpha(8, 2), Some(-1.0));
        assert_eq!(eq.len(), 3);
    }

    #[test]
    fn test_set_alpha_validation() {
        let mut eq = equation(8, 2);
        assert_eq!(
            eq.set_alpha(3, 1, 1.0),
            Err(CoreError::InvalidState { m: 3, k: 1 })
        );
        assert_eq!(
            eq.set_alpha(2, 3, 1.0),
            Err(CoreError::InvalidState { m: 2, k: 3 })
        );
        assert_eq!(eq.len(), 2);
    }

    #[test]
    fn test_mu_truncation_is_stateless() {
        let eq = equation(8, 2);
        let truncated = eq.mu_truncation(0.0);
        assert_eq!(truncated.alpha(2, 1), Some(0.0));
        assert_eq!(eq.alpha(2, 1), Some(1.0 - 3f64.log2()));

        let first = eq.mu_truncation(0.0).generate(1.3);
        let second = eq.mu_truncation(0.0).generate(1.3);
        assert_eq!(first, second);
        assert_eq!(eq.generate(1.3), eq.generate(1.3));
    }

    #[test]
    fn test_mu_truncation_baseline() {
        let truncated = equation(8, 2).mu_truncation(0.25);
        assert_eq!(truncated.alpha(2, 1), Some(0.25));
        assert_eq!(truncated.alpha(5, 2), Some(2.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            equation(5, 2).to_string(),
            "(5, 2) <= lambda^(-2.000000) * (2, 2)"
        );
    }
}
