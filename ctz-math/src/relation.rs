//! Linear relations: `sum(c_i * x_i) <op> b`.
//!
//! A [`LinearRelation`] is a dense row of coefficients indexed by variable id,
//! a scalar bound and a [`Relation`]. Rows combine algebraically as long as
//! both sides point the same way: two `<=`-like rows (or two `>=`-like rows)
//! can be added or subtracted, mixing them is an error. Multiplying by a
//! negative factor flips the relation so the row stays true.

use crate::error::{MathError, MathResult};
use crate::num::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Div, Mul, Neg};

/// Comparison kind, ordered `0..=4` and symmetric around [`Relation::Equal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Relation {
    /// `<`
    Less = 0,
    /// `<=`
    LessOrEqual = 1,
    /// `=`
    Equal = 2,
    /// `>=`
    GreaterOrEqual = 3,
    /// `>`
    Greater = 4,
}

impl Relation {
    /// All relations in index order.
    pub const ALL: [Relation; 5] = [
        Relation::Less,
        Relation::LessOrEqual,
        Relation::Equal,
        Relation::GreaterOrEqual,
        Relation::Greater,
    ];

    /// Position in the total order.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Relation::index`].
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Mirror around `Equal`: `flip(r) = 4 - r`.
    pub fn flip(self) -> Self {
        match self {
            Relation::Less => Relation::Greater,
            Relation::LessOrEqual => Relation::GreaterOrEqual,
            Relation::Equal => Relation::Equal,
            Relation::GreaterOrEqual => Relation::LessOrEqual,
            Relation::Greater => Relation::Less,
        }
    }

    /// `Equal` is compatible with both categories.
    pub fn is_same_category(self, other: Relation) -> bool {
        (self.index() <= 2 && other.index() <= 2) || (self.index() >= 2 && other.index() >= 2)
    }

    /// Negation of [`Relation::is_same_category`].
    pub fn is_different_category(self, other: Relation) -> bool {
        !self.is_same_category(other)
    }

    /// Whether this is `=`.
    pub fn is_equality(self) -> bool {
        self == Relation::Equal
    }

    /// Whether this is any relation except `=`.
    pub fn is_inequality(self) -> bool {
        self != Relation::Equal
    }

    /// Whether this is `<` or `>`.
    pub fn is_strict(self) -> bool {
        matches!(self, Relation::Less | Relation::Greater)
    }

    /// Whether this is `<` or `<=`.
    pub fn is_less(self) -> bool {
        matches!(self, Relation::Less | Relation::LessOrEqual)
    }

    /// Whether this is `>` or `>=`.
    pub fn is_greater(self) -> bool {
        matches!(self, Relation::Greater | Relation::GreaterOrEqual)
    }

    /// Operator symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Less => "<",
            Relation::LessOrEqual => "<=",
            Relation::Equal => "=",
            Relation::GreaterOrEqual => ">=",
            Relation::Greater => ">",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A row `sum(coefficients[i] * x_i) <relation> bound`.
///
/// Absent variables are represented by zero coefficients; the row's width is
/// simply the length of its coefficient vector.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRelation<T> {
    coefficients: Vec<T>,
    bound: T,
    relation: Relation,
}

impl<T: Scalar> LinearRelation<T> {
    /// Create a new relation.
    pub fn new(coefficients: Vec<T>, bound: T, relation: Relation) -> Self {
        Self {
            coefficients,
            bound,
            relation,
        }
    }

    /// Coefficients indexed by variable id.
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Mutable access to the coefficients.
    pub fn coefficients_mut(&mut self) -> &mut [T] {
        &mut self.coefficients
    }

    /// Coefficient of variable `var`, zero past the row's width.
    pub fn coefficient(&self, var: usize) -> T {
        self.coefficients.get(var).cloned().unwrap_or_else(T::zero)
    }

    /// Right-hand side.
    pub fn bound(&self) -> &T {
        &self.bound
    }

    /// Replace the right-hand side.
    pub fn set_bound(&mut self, bound: T) {
        self.bound = bound;
    }

    /// Comparison kind.
    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// Replace the comparison kind.
    pub fn set_relation(&mut self, relation: Relation) {
        self.relation = relation;
    }

    /// Width of the coefficient row.
    pub fn variable_count(&self) -> usize {
        self.coefficients.len()
    }

    /// Widen (or truncate) the row to `width`, zero-filling new positions.
    pub fn resize(&mut self, width: usize) {
        self.coefficients.resize(width, T::zero());
    }

    /// Zero every coefficient and the bound; the relation is kept.
    pub fn clear(&mut self) {
        for coefficient in &mut self.coefficients {
            *coefficient = T::zero();
        }
        self.bound = T::zero();
    }

    /// See [`Relation::is_same_category`].
    pub fn is_same_category(&self, other: &Self) -> bool {
        self.relation.is_same_category(other.relation)
    }

    /// See [`Relation::is_different_category`].
    pub fn is_different_category(&self, other: &Self) -> bool {
        self.relation.is_different_category(other.relation)
    }

    /// Whether the row is an equation.
    pub fn is_equality(&self) -> bool {
        self.relation.is_equality()
    }

    /// Whether the row is an inequality.
    pub fn is_inequality(&self) -> bool {
        self.relation.is_inequality()
    }

    /// Whether the row is a strict inequality.
    pub fn is_strict(&self) -> bool {
        self.relation.is_strict()
    }

    /// Whether the row is `<` or `<=`.
    pub fn is_less(&self) -> bool {
        self.relation.is_less()
    }

    /// Whether the row is `>` or `>=`.
    pub fn is_greater(&self) -> bool {
        self.relation.is_greater()
    }

    fn check_category(&self, rhs: Relation) -> MathResult<()> {
        if self.relation.is_same_category(rhs) {
            Ok(())
        } else {
            Err(MathError::IncompatibleRelation {
                lhs: self.relation,
                rhs,
            })
        }
    }

    /// `self += rhs`.
    ///
    /// Only the first `min(self.len, rhs.len)` coefficients are combined: a
    /// longer `self` keeps its tail untouched, a longer `rhs` has its tail
    /// ignored. The relation of `self` is kept.
    pub fn add_assign_checked(&mut self, rhs: &Self) -> MathResult<()> {
        self.check_category(rhs.relation)?;
        for (lhs, rhs) in self.coefficients.iter_mut().zip(&rhs.coefficients) {
            *lhs = lhs.clone() + rhs.clone();
        }
        self.bound = self.bound.clone() + rhs.bound.clone();
        Ok(())
    }

    /// `self -= rhs`, with the same width rule as [`Self::add_assign_checked`].
    pub fn sub_assign_checked(&mut self, rhs: &Self) -> MathResult<()> {
        self.check_category(rhs.relation)?;
        for (lhs, rhs) in self.coefficients.iter_mut().zip(&rhs.coefficients) {
            *lhs = lhs.clone() - rhs.clone();
        }
        self.bound = self.bound.clone() - rhs.bound.clone();
        Ok(())
    }

    /// `self + rhs`.
    pub fn checked_add(&self, rhs: &Self) -> MathResult<Self> {
        let mut sum = self.clone();
        sum.add_assign_checked(rhs)?;
        Ok(sum)
    }

    /// `self - rhs`.
    pub fn checked_sub(&self, rhs: &Self) -> MathResult<Self> {
        let mut difference = self.clone();
        difference.sub_assign_checked(rhs)?;
        Ok(difference)
    }

    /// Fused `self -= rhs * factor` without materializing the scaled row.
    ///
    /// Equivalent to `self.sub_assign_checked(&rhs.scaled(factor, threshold))`.
    pub fn sub_scaled_assign(&mut self, rhs: &Self, factor: &T, threshold: &T) -> MathResult<()> {
        let scaled_relation = if factor < threshold {
            rhs.relation.flip()
        } else {
            rhs.relation
        };
        self.check_category(scaled_relation)?;
        for (lhs, rhs) in self.coefficients.iter_mut().zip(&rhs.coefficients) {
            *lhs = lhs.clone() - rhs.clone() * factor.clone();
        }
        self.bound = self.bound.clone() - rhs.bound.clone() * factor.clone();
        Ok(())
    }

    /// Multiply every coefficient and the bound by `factor`.
    ///
    /// The relation flips iff `factor < threshold`.
    pub fn scale(&mut self, factor: &T, threshold: &T) {
        for coefficient in &mut self.coefficients {
            *coefficient = coefficient.clone() * factor.clone();
        }
        self.bound = self.bound.clone() * factor.clone();
        if factor < threshold {
            self.relation = self.relation.flip();
        }
    }

    /// Divide every coefficient and the bound by `divisor`.
    ///
    /// The relation flips iff `divisor < threshold`.
    pub fn divide(&mut self, divisor: &T, threshold: &T) {
        for coefficient in &mut self.coefficients {
            *coefficient = coefficient.clone() / divisor.clone();
        }
        self.bound = self.bound.clone() / divisor.clone();
        if divisor < threshold {
            self.relation = self.relation.flip();
        }
    }

    /// Copy of `self` scaled by `factor`.
    pub fn scaled(&self, factor: &T, threshold: &T) -> Self {
        let mut scaled = self.clone();
        scaled.scale(factor, threshold);
        scaled
    }

    /// Convert every coefficient and the bound into another scalar type.
    ///
    /// Returns `None` as soon as one value fails to convert.
    pub fn try_map<U, F>(&self, mut convert: F) -> Option<LinearRelation<U>>
    where
        U: Scalar,
        F: FnMut(&T) -> Option<U>,
    {
        let coefficients = self
            .coefficients
            .iter()
            .map(&mut convert)
            .collect::<Option<Vec<U>>>()?;
        let bound = convert(&self.bound)?;
        Some(LinearRelation::new(coefficients, bound, self.relation))
    }
}

impl<T: Scalar> Neg for LinearRelation<T> {
    type Output = Self;

    fn neg(mut self) -> Self {
        for coefficient in &mut self.coefficients {
            *coefficient = -coefficient.clone();
        }
        self.bound = -self.bound;
        self.relation = self.relation.flip();
        self
    }
}

impl<T: Scalar> Mul<T> for LinearRelation<T> {
    type Output = Self;

    /// Scale with a zero threshold: only negative factors flip the relation.
    fn mul(mut self, factor: T) -> Self {
        self.scale(&factor, &T::zero());
        self
    }
}

impl<T: Scalar> Div<T> for LinearRelation<T> {
    type Output = Self;

    fn div(mut self, divisor: T) -> Self {
        self.divide(&divisor, &T::zero());
        self
    }
}

impl<T: Scalar> fmt::Display for LinearRelation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coefficient) in self.coefficients.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "({})*x{}", coefficient, i)?;
        }
        write!(f, " {} {}", self.relation, self.bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(coefficients: &[f64], bound: f64, relation: Relation) -> LinearRelation<f64> {
        LinearRelation::new(coefficients.to_vec(), bound, relation)
    }

    #[test]
    fn test_flip_is_involution() {
        for relation in Relation::ALL {
            assert_eq!(relation.flip().flip(), relation);
            assert_eq!(relation.flip().index(), 4 - relation.index());
        }
        assert_eq!(Relation::Equal.flip(), Relation::Equal);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Relation::from_index(3), Some(Relation::GreaterOrEqual));
        assert_eq!(Relation::from_index(5), None);
    }

    #[test]
    fn test_categories() {
        assert!(Relation::Less.is_same_category(Relation::Equal));
        assert!(Relation::Greater.is_same_category(Relation::Equal));
        assert!(Relation::LessOrEqual.is_different_category(Relation::GreaterOrEqual));
        assert!(Relation::Equal.is_same_category(Relation::Equal));
        assert!(!Relation::Equal.is_different_category(Relation::Less));
    }

    #[test]
    fn test_classification() {
        assert!(Relation::Less.is_strict());
        assert!(!Relation::LessOrEqual.is_strict());
        assert!(Relation::LessOrEqual.is_less());
        assert!(!Relation::Equal.is_less());
        assert!(!Relation::Equal.is_greater());
        assert!(Relation::Greater.is_greater());
        assert!(Relation::Equal.is_equality());
        assert!(Relation::GreaterOrEqual.is_inequality());
    }

    #[test]
    fn test_add_same_category() {
        let a = row(&[1.0, 2.0], 3.0, Relation::LessOrEqual);
        let b = row(&[4.0, -1.0], 1.0, Relation::Less);
        let sum = a.checked_add(&b).unwrap();
        assert_eq!(sum.coefficients(), &[5.0, 1.0]);
        assert_eq!(*sum.bound(), 4.0);
        assert_eq!(sum.relation(), Relation::LessOrEqual);
    }

    #[test]
    fn test_add_incompatible() {
        let a = row(&[1.0], 3.0, Relation::LessOrEqual);
        let b = row(&[1.0], 1.0, Relation::GreaterOrEqual);
        assert_eq!(
            a.checked_add(&b),
            Err(MathError::IncompatibleRelation {
                lhs: Relation::LessOrEqual,
                rhs: Relation::GreaterOrEqual,
            })
        );
        assert!(a.checked_sub(&b).is_err());
    }

    #[test]
    fn test_sub_same_category() {
        let a = row(&[3.0, 2.0], 5.0, Relation::GreaterOrEqual);
        let b = row(&[1.0, 2.0], 1.0, Relation::Equal);
        let difference = a.checked_sub(&b).unwrap();
        assert_eq!(difference.coefficients(), &[2.0, 0.0]);
        assert_eq!(*difference.bound(), 4.0);
        assert_eq!(difference.relation(), Relation::GreaterOrEqual);
    }

    #[test]
    fn test_add_truncates_to_shorter_operand() {
        // longer lhs keeps its tail
        let long = row(&[1.0, 1.0, 1.0], 0.0, Relation::Equal);
        let short = row(&[2.0], 1.0, Relation::Equal);
        let sum = long.checked_add(&short).unwrap();
        assert_eq!(sum.coefficients(), &[3.0, 1.0, 1.0]);

        // longer rhs has its tail dropped
        let sum = short.checked_add(&long).unwrap();
        assert_eq!(sum.coefficients(), &[3.0]);
        assert_eq!(*sum.bound(), 1.0);
    }

    #[test]
    fn test_scale_flips_on_negative() {
        let a = row(&[1.0, -2.0], 4.0, Relation::Less);
        let scaled = a.clone() * -2.0;
        assert_eq!(scaled.coefficients(), &[-2.0, 4.0]);
        assert_eq!(*scaled.bound(), -8.0);
        assert_eq!(scaled.relation(), Relation::Greater);

        let scaled = a.clone() * 3.0;
        assert_eq!(scaled.relation(), Relation::Less);

        let back = (a.clone() * -4.0) / -4.0;
        assert_eq!(back, a);
    }

    #[test]
    fn test_scale_threshold() {
        let mut a = row(&[1.0], 1.0, Relation::LessOrEqual);
        a.scale(&1e-9, &1e-6);
        assert_eq!(a.relation(), Relation::GreaterOrEqual);

        let mut b = row(&[1.0], 1.0, Relation::LessOrEqual);
        b.scale(&1e-9, &0.0);
        assert_eq!(b.relation(), Relation::LessOrEqual);
    }

    #[test]
    fn test_negate() {
        let a = row(&[1.0, 0.5], 2.0, Relation::GreaterOrEqual);
        let negated = -a;
        assert_eq!(negated.coefficients(), &[-1.0, -0.5]);
        assert_eq!(*negated.bound(), -2.0);
        assert_eq!(negated.relation(), Relation::LessOrEqual);
    }

    #[test]
    fn test_sub_scaled_matches_unfused() {
        let mut fused = row(&[1.0, 2.0, 3.0], 6.0, Relation::Equal);
        let pivot = row(&[0.5, 1.0, 0.0], 2.0, Relation::Equal);
        let expected = fused.checked_sub(&pivot.scaled(&4.0, &1e-6)).unwrap();
        fused.sub_scaled_assign(&pivot, &4.0, &1e-6).unwrap();
        assert_eq!(fused, expected);
    }

    #[test]
    fn test_clear_and_resize() {
        let mut a = row(&[1.0, 2.0], 3.0, Relation::Greater);
        a.resize(4);
        assert_eq!(a.coefficients(), &[1.0, 2.0, 0.0, 0.0]);
        assert_eq!(a.coefficient(7), 0.0);
        a.clear();
        assert_eq!(a.coefficients(), &[0.0; 4]);
        assert_eq!(*a.bound(), 0.0);
        assert_eq!(a.relation(), Relation::Greater);
    }

    #[test]
    fn test_display() {
        let a = row(&[1.0, -0.5], 0.0, Relation::LessOrEqual);
        assert_eq!(a.to_string(), "(1)*x0 + (-0.5)*x1 <= 0");
    }

    #[test]
    fn test_try_map() {
        let a = row(&[1.0, 2.5], 3.0, Relation::Equal);
        let mapped = a.try_map(|v| Some(*v as f32)).unwrap();
        assert_eq!(mapped.coefficients(), &[1.0f32, 2.5]);
        assert!(a.try_map::<f32, _>(|_| None).is_none());
    }
}
