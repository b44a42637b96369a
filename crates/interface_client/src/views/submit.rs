//! Claim submission view

use domain_claims::{Claim, ClaimForm, SubmissionReceipt, SupportingDocument};
use domain_session::Role;

use super::{absorb, Notice, Outcome};
use crate::flows;
use crate::portal::ClaimsPortal;

#[derive(Debug, Clone, Default)]
pub struct SubmitClaimView {
    pub form: ClaimForm,
    pub document: Option<SupportingDocument>,
    pub notice: Option<Notice>,
    pub receipt: Option<SubmissionReceipt>,
    /// Claim list as re-fetched after the last successful submission
    pub claims: Vec<Claim>,
}

impl SubmitClaimView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, document: SupportingDocument) {
        self.document = Some(document);
    }

    /// Submits the form
    ///
    /// On success the form is cleared and the claim list re-fetched. On any
    /// failure every entered value, including the attachment, is kept.
    pub async fn submit(&mut self, portal: &ClaimsPortal) -> Outcome {
        self.notice = None;
        self.receipt = None;

        let receipt = match flows::submit(portal, &self.form, self.document.as_ref()).await {
            Ok(receipt) => receipt,
            Err(err) => return absorb(&mut self.notice, err),
        };

        self.notice = Some(Notice::success(format!(
            "Claim {} submitted. Prediction: {}.",
            receipt.claim_id, receipt.prediction
        )));
        self.receipt = Some(receipt);
        self.form = ClaimForm::default();
        self.document = None;

        match flows::fetch_claims(portal, Role::Policyholder).await {
            Ok(claims) => {
                self.claims = claims;
                Outcome::Stay
            }
            Err(err) => {
                tracing::warn!(error = %err, "Claim list refresh after submission failed");
                absorb(&mut self.notice, err)
            }
        }
    }
}
