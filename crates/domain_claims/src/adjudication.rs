//! Insurer decisions on a claim

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::claim::ClaimStatus;
use crate::error::ClaimError;

/// Decision an insurer can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
    ManualReview,
}

impl Decision {
    pub const ALL: [Decision; 3] = [Decision::Approve, Decision::Reject, Decision::ManualReview];

    /// Wire form sent to the decision endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
            Decision::ManualReview => "manual_review",
        }
    }

    /// The status the insurer is asking for.
    ///
    /// Only used to notice when the service settled on something else; the
    /// claim shown afterwards is always the re-fetched one.
    pub fn requested_status(&self) -> ClaimStatus {
        match self {
            Decision::Approve => ClaimStatus::Approved,
            Decision::Reject => ClaimStatus::Rejected,
            Decision::ManualReview => ClaimStatus::ManualReview,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "approve" | "approved" => Ok(Decision::Approve),
            "reject" | "rejected" => Ok(Decision::Reject),
            "manual_review" => Ok(Decision::ManualReview),
            _ => Err(ClaimError::UnknownDecision(s.to_string())),
        }
    }
}

/// Body of a decision request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRequest {
    pub decision: Decision,
    pub note: String,
}

impl DecisionRequest {
    pub fn new(decision: Decision, note: impl Into<String>) -> Self {
        Self {
            decision,
            note: note.into().trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_wire_format() {
        let request = DecisionRequest::new(Decision::ManualReview, "  needs itemised bill ");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["decision"], "manual_review");
        assert_eq!(json["note"], "needs itemised bill");
    }

    #[test]
    fn test_decision_parse_variants() {
        assert_eq!("Approve".parse::<Decision>().unwrap(), Decision::Approve);
        assert_eq!("manual-review".parse::<Decision>().unwrap(), Decision::ManualReview);
        assert_eq!("Manual Review".parse::<Decision>().unwrap(), Decision::ManualReview);
        assert!("escalate".parse::<Decision>().is_err());
    }
}
