//! The expense recording workflow.
//!
//! Pure function over a group snapshot and a typed request: validates
//! preconditions, runs the split engine, and assembles the immutable
//! expense record. The caller persists the result; either the full
//! expense is appended or nothing is.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use fairshare_shared::types::ExpenseId;

use crate::money::{from_minor_units, to_minor_units};
use crate::split::{SplitError, compute_split};

use super::error::ExpenseError;
use super::types::{Expense, Group, NewExpense};

/// Validates and computes a new expense against the group's current
/// member list.
///
/// The member list snapshot used here must be the same snapshot the
/// caller appends against (read-then-write consistency); holding the
/// group under one lock for both steps is the store's job.
///
/// # Errors
///
/// Returns the first violated precondition or split rule; no partial
/// result is produced.
pub fn record_expense(
    group: &Group,
    input: &NewExpense,
    created_by: &str,
    now: DateTime<Utc>,
) -> Result<Expense, ExpenseError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(ExpenseError::TitleRequired);
    }
    if input.amount <= Decimal::ZERO {
        return Err(ExpenseError::NonPositiveAmount);
    }
    if !group.is_member(&input.paid_by) {
        return Err(ExpenseError::PayerNotMember(input.paid_by.clone()));
    }

    // Normalize the total through cents before splitting so the ledger
    // never records sub-cent precision.
    let total_cents = to_minor_units(input.amount).map_err(SplitError::from)?;
    let amount = from_minor_units(total_cents);

    let shares = compute_split(
        &group.members,
        amount,
        input.split_mode,
        input.splits.as_deref(),
    )?;

    Ok(Expense {
        id: ExpenseId::new(),
        title: title.to_string(),
        amount,
        paid_by: input.paid_by.clone(),
        split_mode: input.split_mode,
        shares,
        created_by: created_by.to_string(),
        created_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use fairshare_shared::types::Currency;

    use crate::split::{SplitInput, SplitMode};

    fn group() -> Group {
        Group::new(
            "Flat".to_string(),
            None,
            "a@x.com".to_string(),
            vec!["b@x.com".to_string(), "c@x.com".to_string()],
            Currency::Inr,
            Utc::now(),
        )
    }

    fn equal_expense(amount: Decimal) -> NewExpense {
        NewExpense {
            title: "Groceries".to_string(),
            amount,
            paid_by: "a@x.com".to_string(),
            split_mode: SplitMode::Equal,
            splits: None,
        }
    }

    #[test]
    fn test_record_equal_expense() {
        let expense =
            record_expense(&group(), &equal_expense(dec!(10.00)), "a@x.com", Utc::now()).unwrap();

        assert_eq!(expense.title, "Groceries");
        assert_eq!(expense.amount, dec!(10.00));
        assert_eq!(expense.shares.len(), 3);
        assert_eq!(expense.shares[0].amount, dec!(3.34));

        let sum: i64 = expense
            .shares
            .iter()
            .map(|s| to_minor_units(s.amount).unwrap())
            .sum();
        assert_eq!(sum, to_minor_units(expense.amount).unwrap());
    }

    #[test]
    fn test_title_is_trimmed_and_required() {
        let mut input = equal_expense(dec!(10.00));
        input.title = "  Dinner  ".to_string();
        let expense = record_expense(&group(), &input, "a@x.com", Utc::now()).unwrap();
        assert_eq!(expense.title, "Dinner");

        input.title = "   ".to_string();
        let result = record_expense(&group(), &input, "a@x.com", Utc::now());
        assert_eq!(result.unwrap_err(), ExpenseError::TitleRequired);
    }

    #[test]
    fn test_amount_must_be_positive() {
        let result = record_expense(&group(), &equal_expense(dec!(0)), "a@x.com", Utc::now());
        assert_eq!(result.unwrap_err(), ExpenseError::NonPositiveAmount);

        let result = record_expense(&group(), &equal_expense(dec!(-5)), "a@x.com", Utc::now());
        assert_eq!(result.unwrap_err(), ExpenseError::NonPositiveAmount);
    }

    #[test]
    fn test_payer_must_be_member() {
        let mut input = equal_expense(dec!(10.00));
        input.paid_by = "stranger@x.com".to_string();
        let result = record_expense(&group(), &input, "a@x.com", Utc::now());
        assert_eq!(
            result.unwrap_err(),
            ExpenseError::PayerNotMember("stranger@x.com".to_string())
        );
    }

    #[test]
    fn test_amount_normalized_to_cents() {
        let expense =
            record_expense(&group(), &equal_expense(dec!(10.005)), "a@x.com", Utc::now()).unwrap();
        assert_eq!(expense.amount, dec!(10.01));
    }

    #[test]
    fn test_custom_split_error_propagates() {
        let input = NewExpense {
            title: "Rent".to_string(),
            amount: dec!(30.00),
            paid_by: "a@x.com".to_string(),
            split_mode: SplitMode::Custom,
            splits: Some(vec![SplitInput {
                member: "a@x.com".to_string(),
                amount: dec!(30.00),
            }]),
        };
        let result = record_expense(&group(), &input, "a@x.com", Utc::now());
        assert_eq!(
            result.unwrap_err(),
            ExpenseError::Split(SplitError::IncompleteSplit {
                expected: 3,
                actual: 1
            })
        );
    }

    #[test]
    fn test_creator_identity_recorded() {
        let expense =
            record_expense(&group(), &equal_expense(dec!(9.99)), "b@x.com", Utc::now()).unwrap();
        assert_eq!(expense.created_by, "b@x.com");
        assert_eq!(expense.paid_by, "a@x.com");
    }
}
