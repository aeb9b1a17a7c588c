//! A linear program: constraint rows plus a maximization objective.

use crate::num::Scalar;
use crate::relation::LinearRelation;
use std::fmt;

/// Constraint rows and one objective row, interpreted as "maximize".
///
/// Rows may have different widths; the solver widens all of them to the
/// widest row before standardizing.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram<T> {
    rows: Vec<LinearRelation<T>>,
    objective: LinearRelation<T>,
}

impl<T: Scalar> LinearProgram<T> {
    /// Create a program from its rows and objective.
    pub fn new(rows: Vec<LinearRelation<T>>, objective: LinearRelation<T>) -> Self {
        Self { rows, objective }
    }

    /// Constraint rows.
    pub fn rows(&self) -> &[LinearRelation<T>] {
        &self.rows
    }

    /// Objective row.
    pub fn objective(&self) -> &LinearRelation<T> {
        &self.objective
    }

    /// Number of constraint rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the program has no constraint rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the widest row, objective included.
    pub fn variable_count(&self) -> usize {
        self.rows
            .iter()
            .map(LinearRelation::variable_count)
            .fold(self.objective.variable_count(), usize::max)
    }

    /// Split into rows and objective.
    pub fn into_parts(self) -> (Vec<LinearRelation<T>>, LinearRelation<T>) {
        (self.rows, self.objective)
    }

    /// Convert the whole program into another scalar type.
    pub fn try_map<U, F>(&self, mut convert: F) -> Option<LinearProgram<U>>
    where
        U: Scalar,
        F: FnMut(&T) -> Option<U>,
    {
        let rows = self
            .rows
            .iter()
            .map(|row| row.try_map(&mut convert))
            .collect::<Option<Vec<_>>>()?;
        let objective = self.objective.try_map(&mut convert)?;
        Some(LinearProgram::new(rows, objective))
    }
}

impl<T: Scalar> fmt::Display for LinearProgram<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "maximize:")?;
        writeln!(f, "{}", self.objective)?;
        write!(f, "subject to:")?;
        for row in &self.rows {
            write!(f, "\n{}", row)?;
        }
        Ok(())
    }
}
