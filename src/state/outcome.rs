/// Outcome definitions for resolved articles
///
/// This module defines the terminal result of resolving one article.
use std::fmt;

/// Clicks value written for every failed article in tabulated exports
pub const FAILURE_CLICKS: i64 = -1;

/// Why an article could not be resolved to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureReason {
    /// A page in the chain had no qualifying internal link
    NoLink,

    /// The step budget ran out before reaching the target or a cached article
    BudgetExceeded,

    /// A page in the chain could not be fetched
    FetchFailed,
}

impl FailureReason {
    /// All failure reasons, in report order
    pub const ALL: [FailureReason; 3] = [Self::NoLink, Self::BudgetExceeded, Self::FetchFailed];

    /// Converts the reason to its report string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoLink => "no_link",
            Self::BudgetExceeded => "budget_exceeded",
            Self::FetchFailed => "fetch_failed",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terminal result of resolving one article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The article reaches the target in `distance` hops
    Success { distance: u32 },

    /// The article does not reach the target
    Failure(FailureReason),
}

impl Outcome {
    /// Returns true if the target was reached
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the export value: the distance, or -1 for any failure
    pub fn clicks(&self) -> i64 {
        match self {
            Self::Success { distance } => i64::from(*distance),
            Self::Failure(_) => FAILURE_CLICKS,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { distance } => write!(f, "success({})", distance),
            Self::Failure(reason) => write!(f, "failure({})", reason),
        }
    }
}
