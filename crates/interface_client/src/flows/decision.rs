//! Insurer decisions
//!
//! A decision is only a request. After the service accepts it the claim is
//! read back, and that record is the only result. If the re-fetch fails the
//! caller gets the error and keeps showing what it had.

use core_kernel::ClaimId;
use domain_claims::{Claim, Decision, DecisionRequest};
use domain_session::{Role, Route};

use crate::error::FlowError;
use crate::portal::ClaimsPortal;

pub async fn decide(
    portal: &ClaimsPortal,
    id: &ClaimId,
    decision: Decision,
    note: &str,
) -> Result<Claim, FlowError> {
    let session = portal.require_role(Role::Insurer, &Route::InsurerClaim(id.clone()))?;
    let token = Some(session.token.as_str());
    let request = DecisionRequest::new(decision, note);

    let sent = portal.service().decide_claim(token, id, &request).await;
    portal.authorized(sent)?;
    tracing::info!(claim_id = %id, decision = %decision, "Decision accepted by service");

    let fetched = portal.service().get_claim(token, id).await;
    let claim = portal.authorized(fetched)?;

    if claim.status != decision.requested_status() {
        tracing::info!(
            claim_id = %id,
            requested = %decision.requested_status(),
            actual = %claim.status,
            "Service settled on a different status"
        );
    }
    Ok(claim)
}
