//! Claims DTOs

use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;
use domain_claims::{ClaimStatus, RiskScore, SubmissionReceipt};

/// Body returned by the intake endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub claim_id: ClaimId,
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub risk_score: Option<RiskScore>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmitResponse {
    /// Receipt shown to the policyholder
    ///
    /// A missing prediction falls back to the returned status, then to
    /// `Processing`.
    pub fn into_receipt(self) -> SubmissionReceipt {
        let prediction = [self.prediction, self.status]
            .into_iter()
            .flatten()
            .map(|p| p.trim().to_string())
            .find(|p| !p.is_empty())
            .unwrap_or_else(|| ClaimStatus::Processing.to_string());

        SubmissionReceipt {
            claim_id: self.claim_id,
            prediction,
            risk_score: self.risk_score,
            reason: self.reason.filter(|r| !r.trim().is_empty()),
        }
    }
}
