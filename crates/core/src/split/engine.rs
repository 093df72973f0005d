//! Split computation using exact minor-unit arithmetic.
//!
//! Equal splits distribute every cent of the total, biased toward earlier
//! members in the group's stored order so the result is deterministic and
//! reproducible. Custom splits are validated against the membership and
//! the expense total before acceptance; validation short-circuits on the
//! first violation so the caller always sees a single, stable error.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::money::{from_minor_units, to_minor_units};

use super::error::SplitError;
use super::types::{MemberEmail, Share, SplitInput, SplitMode};

/// Computes the per-member shares for an expense.
///
/// `members` is the group's current member list in stored order.
/// `custom` is required for [`SplitMode::Custom`] and ignored for
/// [`SplitMode::Equal`]; a missing list is treated as empty and rejected
/// by the completeness check.
///
/// The returned shares sum exactly to `total` at cent granularity.
///
/// # Errors
///
/// Returns a [`SplitError`] describing the first violated rule.
pub fn compute_split(
    members: &[MemberEmail],
    total: Decimal,
    mode: SplitMode,
    custom: Option<&[SplitInput]>,
) -> Result<Vec<Share>, SplitError> {
    // A group always has at least its admin; an empty member list is a
    // caller bug, not an input to handle.
    debug_assert!(!members.is_empty(), "member list must not be empty");

    match mode {
        SplitMode::Equal => split_equal(members, total),
        SplitMode::Custom => split_custom(members, total, custom.unwrap_or(&[])),
    }
}

/// Divides `total` as evenly as possible across the members.
///
/// `base = floor(T / N)` cents each; the first `T mod N` members receive
/// one extra cent.
#[allow(clippy::cast_possible_wrap)]
fn split_equal(members: &[MemberEmail], total: Decimal) -> Result<Vec<Share>, SplitError> {
    if total < Decimal::ZERO {
        return Err(SplitError::InvalidAmount(format!(
            "amount must not be negative: {total}"
        )));
    }
    let total_cents = to_minor_units(total)?;

    let n = members.len() as i64;
    let base = total_cents / n;
    let remainder = total_cents % n;

    Ok(members
        .iter()
        .enumerate()
        .map(|(i, member)| {
            let extra = i64::from((i as i64) < remainder);
            Share {
                member: member.clone(),
                amount: from_minor_units(base + extra),
            }
        })
        .collect())
}

/// Validates caller-supplied shares and normalizes them through cents.
///
/// Check order is fixed: completeness, membership, duplicates, sign,
/// then the cent-exact total. Only the first violation is reported.
fn split_custom(
    members: &[MemberEmail],
    total: Decimal,
    entries: &[SplitInput],
) -> Result<Vec<Share>, SplitError> {
    if entries.len() != members.len() {
        return Err(SplitError::IncompleteSplit {
            expected: members.len(),
            actual: entries.len(),
        });
    }

    let member_set: HashSet<&str> = members.iter().map(String::as_str).collect();
    for entry in entries {
        if !member_set.contains(entry.member.as_str()) {
            return Err(SplitError::UnknownMember(entry.member.clone()));
        }
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.member.as_str()) {
            return Err(SplitError::DuplicateMember(entry.member.clone()));
        }
    }

    for entry in entries {
        if entry.amount < Decimal::ZERO {
            return Err(SplitError::NegativeAmount(entry.member.clone()));
        }
    }

    let total_cents = to_minor_units(total)?;
    let mut share_cents = Vec::with_capacity(entries.len());
    let mut sum: i64 = 0;
    for entry in entries {
        let cents = to_minor_units(entry.amount)?;
        sum = sum
            .checked_add(cents)
            .ok_or_else(|| SplitError::InvalidAmount("split total overflows".to_string()))?;
        share_cents.push(cents);
    }
    if sum != total_cents {
        return Err(SplitError::SplitTotalMismatch {
            expected: total_cents,
            actual: sum,
        });
    }

    // Caller-supplied order is preserved for reproducibility of the
    // persisted record.
    Ok(entries
        .iter()
        .zip(share_cents)
        .map(|(entry, cents)| Share {
            member: entry.member.clone(),
            amount: from_minor_units(cents),
        })
        .collect())
}
