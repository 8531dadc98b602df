//! Property-based tests for the reconciliation arithmetic.
//!
//! These verify the invariants that hold independently of the database:
//! balance deltas commute, and the adjustment clamp never produces a
//! negative quantity or over-applies a decrease.

use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use stockledger_api::entities::product_adjustment::AdjustmentDirection;
use stockledger_api::services::product_adjustments::compute_adjustment;

fn delta_strategy() -> impl Strategy<Value = Decimal> {
    // Cents in a realistic expense/delivery range, both signs
    (-10_000_000i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // The final balance depends only on the multiset of applied deltas,
    // not on their order.
    #[test]
    fn balance_deltas_commute(deltas in prop::collection::vec(delta_strategy(), 0..32)) {
        let initial = Decimal::new(100_000, 2);

        let forward = deltas.iter().fold(initial, |acc, d| acc + d);
        let reversed = deltas.iter().rev().fold(initial, |acc, d| acc + d);

        prop_assert_eq!(forward, reversed);
    }

    // Applying a delta and then its inverse restores the balance exactly.
    #[test]
    fn apply_then_reverse_is_identity(initial in delta_strategy(), amount in delta_strategy()) {
        let after = initial - amount + amount;
        prop_assert_eq!(after, initial);
    }

    // An amount edit applied as one combined delta equals reverse+reapply.
    #[test]
    fn combined_delta_matches_reverse_and_reapply(
        initial in delta_strategy(),
        old_amount in delta_strategy(),
        new_amount in delta_strategy(),
    ) {
        let combined = initial + (old_amount - new_amount);
        let two_step = initial + old_amount - new_amount;
        prop_assert_eq!(combined, two_step);
    }
}

proptest! {
    #[test]
    fn decrease_never_goes_negative(old in 0i32..100_000, requested in 0i32..100_000) {
        let (new_quantity, adjusted) =
            compute_adjustment(old, AdjustmentDirection::Decrease, requested);

        prop_assert!(new_quantity >= 0);
        prop_assert!(adjusted <= requested);
        // The effective magnitude is exactly what left the counter
        prop_assert_eq!(old - new_quantity, adjusted);
        if old >= requested {
            prop_assert_eq!(new_quantity, old - requested);
            prop_assert_eq!(adjusted, requested);
        }
    }

    #[test]
    fn increase_is_never_clamped(old in 0i32..100_000, requested in 0i32..100_000) {
        let (new_quantity, adjusted) =
            compute_adjustment(old, AdjustmentDirection::Increase, requested);

        prop_assert_eq!(new_quantity, old + requested);
        prop_assert_eq!(adjusted, requested);
    }
}

#[rstest]
#[case(5, 8, 0, 5)]
#[case(5, 5, 0, 5)]
#[case(5, 4, 1, 4)]
#[case(0, 3, 0, 0)]
fn decrease_clamp_cases(
    #[case] old: i32,
    #[case] requested: i32,
    #[case] expected_new: i32,
    #[case] expected_adjusted: i32,
) {
    assert_eq!(
        compute_adjustment(old, AdjustmentDirection::Decrease, requested),
        (expected_new, expected_adjusted)
    );
}
