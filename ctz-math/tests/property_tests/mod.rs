//! Property-based tests for ctz-math
//!
//! This module contains property tests for:
//! - Relation algebra (flip, categories, scaling)
//! - Simplex solver optimality and unboundedness detection

mod relation_properties;
mod simplex_properties;
