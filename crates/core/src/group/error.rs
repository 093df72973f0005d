//! Expense workflow error types.

use thiserror::Error;

use crate::split::SplitError;

/// Errors from the expense recording workflow.
///
/// Precondition failures come first; anything from the split engine is
/// wrapped transparently so callers can still branch on the inner kind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpenseError {
    /// Title is empty after trimming.
    #[error("Title is required")]
    TitleRequired,

    /// Amount is zero or negative.
    #[error("Amount must be greater than 0")]
    NonPositiveAmount,

    /// The payer is not a current group member.
    #[error("Payer must be a group member: {0}")]
    PayerNotMember(String),

    /// Split computation or validation failed.
    #[error(transparent)]
    Split(#[from] SplitError),
}

impl ExpenseError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::TitleRequired => "TITLE_REQUIRED",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::PayerNotMember(_) => "PAYER_NOT_MEMBER",
            Self::Split(err) => err.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::TitleRequired | Self::NonPositiveAmount | Self::PayerNotMember(_) => 400,
            Self::Split(err) => err.http_status_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ExpenseError::TitleRequired.error_code(), "TITLE_REQUIRED");
        assert_eq!(
            ExpenseError::NonPositiveAmount.error_code(),
            "NON_POSITIVE_AMOUNT"
        );
        assert_eq!(
            ExpenseError::PayerNotMember("x@y.z".into()).error_code(),
            "PAYER_NOT_MEMBER"
        );
        assert_eq!(
            ExpenseError::Split(SplitError::UnknownMember("x@y.z".into())).error_code(),
            "UNKNOWN_MEMBER"
        );
    }

    #[test]
    fn test_all_variants_are_client_errors() {
        assert_eq!(ExpenseError::TitleRequired.http_status_code(), 400);
        assert_eq!(
            ExpenseError::Split(SplitError::SplitTotalMismatch {
                expected: 1,
                actual: 2
            })
            .http_status_code(),
            400
        );
    }
}
