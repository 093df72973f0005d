//! Split engine data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A group member identifier (email-like string).
pub type MemberEmail = String;

/// How an expense is divided among group members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Divide as evenly as possible, remainder cents to earlier members.
    Equal,
    /// Caller-specified per-member shares that must reconstruct the total.
    Custom,
}

impl SplitMode {
    /// Returns the mode as a wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for SplitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SplitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equal" => Ok(Self::Equal),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("Split type must be equal or custom, got: {s}")),
        }
    }
}

/// One member's portion of an expense, as computed by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    /// The member this share belongs to.
    pub member: MemberEmail,
    /// Share amount, normalized to cent precision. Always >= 0.
    pub amount: Decimal,
}

/// A caller-supplied custom split entry, order arbitrary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitInput {
    /// The member this entry targets.
    pub member: MemberEmail,
    /// Requested share amount.
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_split_mode_strings() {
        assert_eq!(SplitMode::Equal.as_str(), "equal");
        assert_eq!(SplitMode::Custom.as_str(), "custom");
        assert_eq!(SplitMode::from_str("equal").unwrap(), SplitMode::Equal);
        assert_eq!(SplitMode::from_str("custom").unwrap(), SplitMode::Custom);
        assert!(SplitMode::from_str("even").is_err());
        assert!(SplitMode::from_str("EQUAL").is_err());
    }
}
