//! Claim reads for dashboards and detail views

use core_kernel::ClaimId;
use domain_claims::Claim;
use domain_session::{Role, Route};

use crate::error::FlowError;
use crate::portal::ClaimsPortal;

/// Detail route for a role
pub(crate) fn claim_route(role: Role, id: &ClaimId) -> Route {
    match role {
        Role::Policyholder => Route::UserClaim(id.clone()),
        Role::Insurer => Route::InsurerClaim(id.clone()),
    }
}

/// Fetches the claim list shown on `viewer`'s dashboard
pub async fn fetch_claims(portal: &ClaimsPortal, viewer: Role) -> Result<Vec<Claim>, FlowError> {
    let session = portal.require_role(viewer, &viewer.home())?;
    let result = portal.service().list_claims(Some(&session.token)).await;
    portal.authorized(result)
}

/// Fetches one claim for `viewer`'s detail view
pub async fn fetch_claim(
    portal: &ClaimsPortal,
    viewer: Role,
    id: &ClaimId,
) -> Result<Claim, FlowError> {
    let session = portal.require_role(viewer, &claim_route(viewer, id))?;
    let result = portal.service().get_claim(Some(&session.token), id).await;
    portal.authorized(result)
}
