//! Numeric abstraction shared by the relation algebra and the solver.

use num_traits::{FromPrimitive, One, Zero};
use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};

#[cfg(feature = "rational")]
pub use num_bigint::BigInt;
#[cfg(feature = "rational")]
pub use num_rational::BigRational;

/// A field-like value the solver can pivot over.
///
/// Only the four arithmetic operators, negation, ordering and the constants
/// zero/one are required. [`FromPrimitive`] is used to bring runtime
/// configuration (Big-M, tolerance) into the scalar type.
pub trait Scalar:
    Clone
    + Debug
    + Display
    + PartialOrd
    + Zero
    + One
    + FromPrimitive
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
}

impl<T> Scalar for T where
    T: Clone
        + Debug
        + Display
        + PartialOrd
        + Zero
        + One
        + FromPrimitive
        + Neg<Output = T>
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
{
}
