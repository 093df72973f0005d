//! Per-member net balances across a group's ledger.
//!
//! The payer of an expense is credited its full amount; every share
//! debits its member. Because each expense's shares reconstruct its
//! total exactly, the net positions always sum to zero.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{MoneyError, from_minor_units, to_minor_units};

use super::types::Group;

/// A member's net position in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberBalance {
    /// Member email.
    pub member: String,
    /// Net amount: positive means the group owes this member.
    pub amount: Decimal,
}

/// Computes net balances for every member that appears in the ledger or
/// the current member list.
///
/// Output order: current members in stored order, then historical
/// members (removed after participating) in first-appearance order.
/// Arithmetic is integer cents throughout.
///
/// # Errors
///
/// Returns `MoneyError::InvalidAmount` if a ledger amount cannot be
/// converted to minor units or a running balance overflows `i64` cents;
/// recorded expenses are normalized at creation, so either indicates a
/// corrupted ledger.
pub fn compute_balances(group: &Group) -> Result<Vec<MemberBalance>, MoneyError> {
    let mut order: Vec<&str> = group.members.iter().map(String::as_str).collect();
    let mut cents: HashMap<&str, i64> = order.iter().map(|m| (*m, 0i64)).collect();

    for expense in &group.expenses {
        let paid = to_minor_units(expense.amount)?;
        let payer = expense.paid_by.as_str();
        if !cents.contains_key(payer) {
            order.push(payer);
            cents.insert(payer, 0);
        }
        if let Some(balance) = cents.get_mut(payer) {
            *balance = balance
                .checked_add(paid)
                .ok_or_else(|| MoneyError::InvalidAmount(format!("balance overflows for {payer}")))?;
        }

        for share in &expense.shares {
            let member = share.member.as_str();
            let owed = to_minor_units(share.amount)?;
            if !cents.contains_key(member) {
                order.push(member);
                cents.insert(member, 0);
            }
            if let Some(balance) = cents.get_mut(member) {
                *balance = balance.checked_sub(owed).ok_or_else(|| {
                    MoneyError::InvalidAmount(format!("balance overflows for {member}"))
                })?;
            }
        }
    }

    Ok(order
        .iter()
        .map(|member| MemberBalance {
            member: (*member).to_string(),
            amount: from_minor_units(cents.get(member).copied().unwrap_or(0)),
        })
        .collect())
}
