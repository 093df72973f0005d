//! Property-based tests for the split engine.
//!
//! - Equal-mode shares always sum exactly to the total.
//! - Remainder cents go to the first members in stored order, one each.
//! - Custom-mode acceptance implies cent-exact reconstruction.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::money::to_minor_units;

use super::engine::compute_split;
use super::types::{MemberEmail, SplitInput, SplitMode};

/// Strategy to generate non-negative decimal amounts (0.00 to 1,000,000.00).
fn non_negative_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a member list (1 to 50 members).
fn member_list() -> impl Strategy<Value = Vec<MemberEmail>> {
    (1usize..50).prop_map(|n| (0..n).map(|i| format!("member{i}@example.com")).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// For any N >= 1 and non-negative total, equal mode returns exactly
    /// N shares whose cents sum exactly equals the total's cents.
    #[test]
    fn prop_equal_split_sum_invariant(
        members in member_list(),
        total in non_negative_amount(),
    ) {
        let shares = compute_split(&members, total, SplitMode::Equal, None).unwrap();
        prop_assert_eq!(shares.len(), members.len());

        let total_cents = to_minor_units(total).unwrap();
        let sum_cents: i64 = shares
            .iter()
            .map(|s| to_minor_units(s.amount).unwrap())
            .sum();
        prop_assert_eq!(sum_cents, total_cents, "shares must reconstruct the total exactly");
    }

    /// Remainder cents are distributed to the first `remainder` members
    /// in stored order, each receiving exactly one extra cent.
    #[test]
    fn prop_equal_split_remainder_distribution(
        members in member_list(),
        total in non_negative_amount(),
    ) {
        let shares = compute_split(&members, total, SplitMode::Equal, None).unwrap();

        let total_cents = to_minor_units(total).unwrap();
        #[allow(clippy::cast_possible_wrap)]
        let n = members.len() as i64;
        let base = total_cents / n;
        let remainder = total_cents % n;

        for (i, share) in shares.iter().enumerate() {
            let cents = to_minor_units(share.amount).unwrap();
            #[allow(clippy::cast_possible_wrap)]
            let expected = base + i64::from((i as i64) < remainder);
            prop_assert_eq!(cents, expected);
            prop_assert!(cents - base <= 1, "no member gets more than one extra cent");
        }
    }

    /// Equal mode is deterministic: same inputs, same shares.
    #[test]
    fn prop_equal_split_deterministic(
        members in member_list(),
        total in non_negative_amount(),
    ) {
        let first = compute_split(&members, total, SplitMode::Equal, None).unwrap();
        let second = compute_split(&members, total, SplitMode::Equal, None).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Any accepted custom split reconstructs the total exactly and
    /// preserves the caller's entry order.
    #[test]
    fn prop_custom_split_accepted_implies_exact(
        members in member_list(),
        total in non_negative_amount(),
    ) {
        // Build a valid custom split from an equal one, reversed so the
        // caller order differs from the stored order.
        let equal = compute_split(&members, total, SplitMode::Equal, None).unwrap();
        let entries: Vec<SplitInput> = equal
            .iter()
            .rev()
            .map(|s| SplitInput { member: s.member.clone(), amount: s.amount })
            .collect();

        let shares = compute_split(&members, total, SplitMode::Custom, Some(&entries)).unwrap();

        let total_cents = to_minor_units(total).unwrap();
        let sum_cents: i64 = shares
            .iter()
            .map(|s| to_minor_units(s.amount).unwrap())
            .sum();
        prop_assert_eq!(sum_cents, total_cents);

        for (share, entry) in shares.iter().zip(&entries) {
            prop_assert_eq!(&share.member, &entry.member);
        }
    }
}
