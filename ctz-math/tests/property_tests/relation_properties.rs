//! Property-based tests for the relation algebra

use ctz_math::{LinearRelation, MathError, Relation};
use proptest::prelude::*;

/// Strategy for any relation kind
fn relation_strategy() -> impl Strategy<Value = Relation> {
    (0u8..5).prop_map(|i| Relation::from_index(i).expect("index in range"))
}

/// Strategy for a row of up to six coefficients
fn row_strategy() -> impl Strategy<Value = LinearRelation<f64>> {
    (
        prop::collection::vec(-100.0f64..100.0, 0..6),
        -100.0f64..100.0,
        relation_strategy(),
    )
        .prop_map(|(coefficients, bound, relation)| {
            LinearRelation::new(coefficients, bound, relation)
        })
}

/// Strategy for factors bounded away from zero
fn factor_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![-50.0f64..-0.01, 0.01f64..50.0]
}

#[cfg(test)]
mod flip_properties {
    use super::*;

    proptest! {
        /// Flipping twice is the identity
        #[test]
        fn flip_is_involution(relation in relation_strategy()) {
            prop_assert_eq!(relation.flip().flip(), relation);
            prop_assert_eq!(relation.flip().index(), 4 - relation.index());
        }

        /// Category compatibility is symmetric and `=` is compatible with all
        #[test]
        fn category_is_symmetric(a in relation_strategy(), b in relation_strategy()) {
            prop_assert_eq!(a.is_same_category(b), b.is_same_category(a));
            prop_assert!(a.is_same_category(Relation::Equal));
            prop_assert_eq!(a.is_same_category(b), !a.is_different_category(b));
        }
    }
}

#[cfg(test)]
mod combination_properties {
    use super::*;

    proptest! {
        /// Addition succeeds exactly when both rows share a category
        #[test]
        fn add_respects_categories(a in row_strategy(), b in row_strategy()) {
            let sum = a.checked_add(&b);
            if a.is_same_category(&b) {
                let sum = sum.expect("same category must combine");
                prop_assert_eq!(sum.relation(), a.relation());
                prop_assert_eq!(sum.variable_count(), a.variable_count());
            } else {
                let is_incompatible = matches!(sum, Err(MathError::IncompatibleRelation { .. }));
                prop_assert!(is_incompatible);
            }
        }

        /// Subtraction follows the same category rule
        #[test]
        fn sub_respects_categories(a in row_strategy(), b in row_strategy()) {
            prop_assert_eq!(a.checked_sub(&b).is_ok(), a.is_same_category(&b));
        }

        /// Only the shared prefix is combined
        #[test]
        fn add_keeps_lhs_tail(a in row_strategy(), b in row_strategy()) {
            prop_assume!(a.is_same_category(&b));
            let sum = a.checked_add(&b).expect("same category");
            let shared = a.variable_count().min(b.variable_count());
            for i in shared..a.variable_count() {
                prop_assert_eq!(sum.coefficients()[i], a.coefficients()[i]);
            }
        }
    }
}

#[cfg(test)]
mod scaling_properties {
    use super::*;

    proptest! {
        /// Negative factors flip, positive factors preserve
        #[test]
        fn scale_flips_iff_negative(a in row_strategy(), factor in factor_strategy()) {
            let scaled = a.clone() * factor;
            if factor < 0.0 {
                prop_assert_eq!(scaled.relation(), a.relation().flip());
            } else {
                prop_assert_eq!(scaled.relation(), a.relation());
            }
        }

        /// Scaling by x then by 1/x restores the row
        #[test]
        fn scale_then_inverse_restores(a in row_strategy(), factor in factor_strategy()) {
            let restored = (a.clone() * factor) * (1.0 / factor);
            prop_assert_eq!(restored.relation(), a.relation());
            for (x, y) in restored.coefficients().iter().zip(a.coefficients()) {
                prop_assert!((x - y).abs() <= 1e-9 * y.abs().max(1.0));
            }
            prop_assert!((restored.bound() - a.bound()).abs() <= 1e-9 * a.bound().abs().max(1.0));
        }

        /// Negation flips the relation and every sign
        #[test]
        fn negation_flips(a in row_strategy()) {
            let negated = -a.clone();
            prop_assert_eq!(negated.relation(), a.relation().flip());
            prop_assert_eq!(*negated.bound(), -*a.bound());
            prop_assert_eq!(-negated, a);
        }
    }
}
