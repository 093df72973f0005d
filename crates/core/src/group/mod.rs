//! Expense groups, the recording workflow, and balances.

pub mod balance;
pub mod error;
pub mod types;
pub mod workflow;

pub use balance::{MemberBalance, compute_balances};
pub use error::ExpenseError;
pub use types::{Expense, Group, NewExpense};
pub use workflow::record_expense;
