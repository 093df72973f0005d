//! Expense splitting engine.
//!
//! Given a group's ordered member list, a total amount, and a split mode,
//! produces a validated list of per-member shares whose minor-unit sum
//! exactly equals the total. Pure, synchronous, and stateless; safe to
//! call concurrently.

pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod props;

pub use engine::compute_split;
pub use error::SplitError;
pub use types::{MemberEmail, Share, SplitInput, SplitMode};
