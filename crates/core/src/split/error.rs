//! Split engine error types.
//!
//! A closed set of tagged variants so callers branch on error kind rather
//! than message text. All variants are local validation failures the
//! caller can recover from by correcting input; none are fatal.

use thiserror::Error;

use crate::money::MoneyError;

/// Errors that can occur while computing or validating a split.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    /// Amount is not a representable, non-negative monetary value.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Custom split entry count does not match the member count.
    #[error("Custom split must include all members: expected {expected} entries, got {actual}")]
    IncompleteSplit {
        /// Current group member count.
        expected: usize,
        /// Supplied entry count.
        actual: usize,
    },

    /// A custom split entry references a non-member.
    #[error("Custom split contains unknown member: {0}")]
    UnknownMember(String),

    /// A member appears more than once in the custom splits.
    #[error("Duplicate member in custom split: {0}")]
    DuplicateMember(String),

    /// A custom split amount is negative.
    #[error("Custom split amount for {0} must be >= 0")]
    NegativeAmount(String),

    /// Custom split cents do not sum to the expense total.
    #[error("Custom splits must total the expense amount: expected {expected} cents, got {actual}")]
    SplitTotalMismatch {
        /// Expense total in minor units.
        expected: i64,
        /// Sum of supplied shares in minor units.
        actual: i64,
    },
}

impl SplitError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::IncompleteSplit { .. } => "INCOMPLETE_SPLIT",
            Self::UnknownMember(_) => "UNKNOWN_MEMBER",
            Self::DuplicateMember(_) => "DUPLICATE_MEMBER",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::SplitTotalMismatch { .. } => "SPLIT_TOTAL_MISMATCH",
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// Every variant is a client-correctable validation failure.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        400
    }
}

impl From<MoneyError> for SplitError {
    fn from(err: MoneyError) -> Self {
        match err {
            MoneyError::InvalidAmount(msg) => Self::InvalidAmount(msg),
        }
    }
}
