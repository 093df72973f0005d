//! In-process group repository.
//!
//! Owns the only shared mutable state in the system: each group's member
//! list and its append-only expense ledger. Expense submission runs the
//! pure recording workflow while holding the group's exclusive map entry,
//! so the member-list snapshot the split engine sees is exactly the
//! snapshot the append lands on (read-then-write consistency). Concurrent
//! submissions against the same group serialize on that entry; different
//! groups do not contend.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use thiserror::Error;

use fairshare_core::group::{Expense, ExpenseError, Group, NewExpense, record_expense};
use fairshare_core::split::MemberEmail;
use fairshare_shared::types::{Currency, GroupId};

/// Errors from repository operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No group with the given id.
    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    /// The recorder is not a current member of the group.
    #[error("You are not a member of this group")]
    NotAMember(MemberEmail),

    /// The expense workflow rejected the submission.
    #[error(transparent)]
    Expense(#[from] ExpenseError),
}

impl StoreError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::GroupNotFound(_) => "GROUP_NOT_FOUND",
            Self::NotAMember(_) => "FORBIDDEN",
            Self::Expense(err) => err.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::GroupNotFound(_) => 404,
            Self::NotAMember(_) => 403,
            Self::Expense(err) => err.http_status_code(),
        }
    }
}

/// Concurrency-safe collection of expense groups.
#[derive(Debug, Default)]
pub struct GroupStore {
    groups: DashMap<GroupId, Group>,
}

impl GroupStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a group and returns a snapshot of it.
    ///
    /// The admin becomes the first member; additional emails are
    /// deduplicated preserving first-appearance order.
    pub fn create_group(
        &self,
        name: String,
        description: Option<String>,
        admin: MemberEmail,
        members: Vec<MemberEmail>,
        currency: Currency,
        now: DateTime<Utc>,
    ) -> Group {
        let group = Group::new(name, description, admin, members, currency, now);
        let snapshot = group.clone();
        self.groups.insert(group.id, group);
        snapshot
    }

    /// Returns a snapshot of a group.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::GroupNotFound` if the id is unknown.
    pub fn group(&self, id: GroupId) -> Result<Group, StoreError> {
        self.groups
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or(StoreError::GroupNotFound(id))
    }

    /// Adds members to a group, returning the updated snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::GroupNotFound` if the id is unknown.
    pub fn add_members(
        &self,
        id: GroupId,
        emails: Vec<MemberEmail>,
    ) -> Result<Group, StoreError> {
        let mut entry = self.groups.get_mut(&id).ok_or(StoreError::GroupNotFound(id))?;
        entry.add_members(emails);
        Ok(entry.clone())
    }

    /// Removes members from a group, returning the updated snapshot.
    ///
    /// Historical expenses are untouched; a removed member's past shares
    /// remain valid ledger records.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::GroupNotFound` if the id is unknown.
    pub fn remove_members(&self, id: GroupId, emails: &[String]) -> Result<Group, StoreError> {
        let mut entry = self.groups.get_mut(&id).ok_or(StoreError::GroupNotFound(id))?;
        entry.remove_members(emails.iter().map(String::as_str));
        Ok(entry.clone())
    }

    /// Validates and appends an expense to a group's ledger.
    ///
    /// The recorder check, the split, and the append all run under the
    /// group's exclusive entry, so a concurrent membership change cannot
    /// invalidate an in-flight submission. Either the full expense is
    /// appended or nothing is.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::GroupNotFound` for an unknown group,
    /// `StoreError::NotAMember` if `created_by` is not a current member,
    /// or the workflow's first validation failure.
    pub fn add_expense(
        &self,
        id: GroupId,
        input: &NewExpense,
        created_by: &str,
        now: DateTime<Utc>,
    ) -> Result<(Expense, Group), StoreError> {
        let mut entry = self.groups.get_mut(&id).ok_or(StoreError::GroupNotFound(id))?;
        if !entry.is_member(created_by) {
            return Err(StoreError::NotAMember(created_by.to_string()));
        }
        let expense = record_expense(&entry, input, created_by, now)?;
        entry.expenses.push(expense.clone());
        Ok((expense, entry.clone()))
    }
}
