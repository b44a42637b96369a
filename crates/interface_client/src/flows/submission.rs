//! Policyholder claim submission

use domain_claims::{ClaimForm, ClaimSubmission, SubmissionReceipt, SupportingDocument};
use domain_session::{Role, Route};

use crate::error::FlowError;
use crate::portal::ClaimsPortal;

/// Checks the form locally, then uploads it
///
/// Nothing is sent when a local check fails.
pub async fn submit(
    portal: &ClaimsPortal,
    form: &ClaimForm,
    document: Option<&SupportingDocument>,
) -> Result<SubmissionReceipt, FlowError> {
    let session = portal.require_role(Role::Policyholder, &Route::SubmitClaim)?;
    let submission = ClaimSubmission::prepare(form, document)?;

    let result = portal
        .service()
        .submit_claim(Some(&session.token), &submission)
        .await;
    let receipt = portal.authorized(result)?;

    tracing::info!(
        claim_id = %receipt.claim_id,
        prediction = %receipt.prediction,
        "Claim submitted"
    );
    Ok(receipt)
}
