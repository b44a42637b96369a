//! Claim detail view
//!
//! Insurers decide from here. The claim shown after a decision is always the
//! one read back from the service; a failed decision leaves it untouched.

use core_kernel::ClaimId;
use domain_claims::{Claim, Decision};
use domain_session::Role;

use super::{absorb, Notice, Outcome};
use crate::flows;
use crate::portal::ClaimsPortal;

#[derive(Debug, Clone)]
pub struct ClaimView {
    pub role: Role,
    pub id: ClaimId,
    pub claim: Option<Claim>,
    /// Note sent with the next decision
    pub note: String,
    pub notice: Option<Notice>,
}

impl ClaimView {
    pub fn new(role: Role, id: ClaimId) -> Self {
        Self {
            role,
            id,
            claim: None,
            note: String::new(),
            notice: None,
        }
    }

    pub async fn load(&mut self, portal: &ClaimsPortal) -> Outcome {
        match flows::fetch_claim(portal, self.role, &self.id).await {
            Ok(claim) => {
                self.claim = Some(claim);
                self.notice = None;
                Outcome::Stay
            }
            Err(err) => absorb(&mut self.notice, err),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.claim.is_none() && self.notice.is_none()
    }

    /// Requests a decision with the current note
    pub async fn decide(&mut self, portal: &ClaimsPortal, decision: Decision) -> Outcome {
        if let Some(claim) = self.claim.as_ref().filter(|c| c.status.is_decided()) {
            tracing::info!(
                claim_id = %self.id,
                status = %claim.status,
                decision = ?decision,
                "Overriding a decided claim"
            );
        }
        match flows::decide(portal, &self.id, decision, &self.note).await {
            Ok(claim) => {
                self.notice = Some(Notice::success(format!(
                    "Decision recorded. Status is now {}.",
                    claim.status
                )));
                self.claim = Some(claim);
                self.note.clear();
                Outcome::Stay
            }
            Err(err) => absorb(&mut self.notice, err),
        }
    }
}
