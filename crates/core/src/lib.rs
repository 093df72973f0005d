//! Core business logic for Fairshare.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `money` - Minor-unit (cent) normalization for monetary amounts
//! - `split` - Expense splitting engine (equal and custom splits)
//! - `group` - Expense groups, the recording workflow, and balances

pub mod group;
pub mod money;
pub mod split;
