//! Group and expense data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fairshare_shared::types::{Currency, ExpenseId, GroupId};

use crate::split::{MemberEmail, Share, SplitInput, SplitMode};

/// A shared-expense group.
///
/// Owns an ordered, append-only sequence of expenses. The member list is
/// insertion-ordered; that order drives remainder distribution in equal
/// splits, so it is part of the group's observable behavior. Membership
/// can change over time without touching historical expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Group ID.
    pub id: GroupId,
    /// Group name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Email of the member who created the group.
    pub admin: MemberEmail,
    /// Ordered member list; the admin is always the first entry.
    pub members: Vec<MemberEmail>,
    /// Ledger currency, fixed at creation.
    pub currency: Currency,
    /// Append-only expense ledger.
    pub expenses: Vec<Expense>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Creates a new group with the admin as first member.
    ///
    /// Additional member emails are deduplicated preserving
    /// first-appearance order; a repeated admin email is dropped.
    #[must_use]
    pub fn new(
        name: String,
        description: Option<String>,
        admin: MemberEmail,
        members: Vec<MemberEmail>,
        currency: Currency,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut all_members = vec![admin.clone()];
        for email in members {
            if !all_members.contains(&email) {
                all_members.push(email);
            }
        }

        Self {
            id: GroupId::new(),
            name,
            description,
            admin,
            members: all_members,
            currency,
            expenses: Vec::new(),
            created_at,
        }
    }

    /// Returns true if `email` is a current member.
    #[must_use]
    pub fn is_member(&self, email: &str) -> bool {
        self.members.iter().any(|m| m == email)
    }

    /// Appends members, skipping emails already present.
    pub fn add_members<I>(&mut self, emails: I)
    where
        I: IntoIterator<Item = MemberEmail>,
    {
        for email in emails {
            if !self.is_member(&email) {
                self.members.push(email);
            }
        }
    }

    /// Removes members by email. Past expenses keep their shares; the
    /// ledger is immutable history.
    pub fn remove_members<'a, I>(&mut self, emails: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for email in emails {
            self.members.retain(|m| m != email);
        }
    }
}

/// An immutable expense record appended to a group's ledger.
///
/// Invariant: the minor-unit sum of `shares` equals `amount` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Expense title, non-empty.
    pub title: String,
    /// Total amount, normalized to cent precision.
    pub amount: Decimal,
    /// The member who paid.
    pub paid_by: MemberEmail,
    /// How the amount was divided.
    pub split_mode: SplitMode,
    /// One share per member at creation time, ordered.
    pub shares: Vec<Share>,
    /// Email of the member who recorded the expense.
    pub created_by: MemberEmail,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for recording a new expense, already re-validated into typed
/// form at the HTTP boundary.
#[derive(Debug, Clone)]
pub struct NewExpense {
    /// Expense title.
    pub title: String,
    /// Total amount.
    pub amount: Decimal,
    /// The member who paid.
    pub paid_by: MemberEmail,
    /// Split mode.
    pub split_mode: SplitMode,
    /// Custom split entries; required for custom mode.
    pub splits: Option<Vec<SplitInput>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> Group {
        Group::new(
            "Trip".to_string(),
            None,
            "admin@x.com".to_string(),
            vec![
                "b@x.com".to_string(),
                "admin@x.com".to_string(),
                "c@x.com".to_string(),
                "b@x.com".to_string(),
            ],
            Currency::Inr,
            Utc::now(),
        )
    }

    #[test]
    fn test_new_group_dedups_and_puts_admin_first() {
        let group = group();
        assert_eq!(group.members, vec!["admin@x.com", "b@x.com", "c@x.com"]);
    }

    #[test]
    fn test_add_members_preserves_order_and_dedups() {
        let mut group = group();
        group.add_members(vec!["d@x.com".to_string(), "b@x.com".to_string()]);
        assert_eq!(
            group.members,
            vec!["admin@x.com", "b@x.com", "c@x.com", "d@x.com"]
        );
    }

    #[test]
    fn test_remove_members() {
        let mut group = group();
        group.remove_members(["b@x.com", "nobody@x.com"]);
        assert_eq!(group.members, vec!["admin@x.com", "c@x.com"]);
        assert!(!group.is_member("b@x.com"));
    }
}
