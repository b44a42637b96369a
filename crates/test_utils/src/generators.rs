//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating claims, roles, and routes.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimStatus, Decision, RiskScore};
use domain_session::{Role, Route};

/// Strategy for generating roles
pub fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Policyholder), Just(Role::Insurer)]
}

/// Strategy for generating claim statuses
pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop::sample::select(ClaimStatus::ALL.to_vec())
}

/// Strategy for generating decisions
pub fn decision_strategy() -> impl Strategy<Value = Decision> {
    prop::sample::select(Decision::ALL.to_vec())
}

/// Strategy for generating server-style claim ids
pub fn claim_id_strategy() -> impl Strategy<Value = ClaimId> {
    "C-[0-9]{4,10}".prop_map(ClaimId::new)
}

/// Strategy for generating routes that require a role
pub fn gated_route_strategy() -> impl Strategy<Value = Route> {
    prop_oneof![
        Just(Route::UserDashboard),
        Just(Route::SubmitClaim),
        Just(Route::InsurerDashboard),
        claim_id_strategy().prop_map(Route::UserClaim),
        claim_id_strategy().prop_map(Route::InsurerClaim),
    ]
}

/// Strategy for generating public routes
pub fn public_route_strategy() -> impl Strategy<Value = Route> {
    prop_oneof![
        Just(Route::Home),
        Just(Route::Plans),
        Just(Route::Claims),
        Just(Route::Login),
        Just(Route::Register),
        "/missing/[a-z0-9-]{1,12}".prop_map(Route::NotFound),
    ]
}

/// Strategy for generating claim amounts in cents up to one million
pub fn claim_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for generating claims
pub fn claim_strategy() -> impl Strategy<Value = Claim> {
    (
        claim_id_strategy(),
        claim_status_strategy(),
        proptest::option::of(claim_amount_strategy()),
        proptest::option::of(0.0f64..=100.0),
        "[A-Za-z ]{0,24}",
    )
        .prop_map(|(id, status, amount, risk, procedure)| {
            let mut claim = Claim::new(id, status);
            claim.amount = amount;
            claim.risk_score = risk.map(RiskScore::new);
            claim.procedure = Some(procedure).filter(|p| !p.trim().is_empty());
            claim
        })
}
