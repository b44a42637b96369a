//! Custom Test Assertions
//!
//! Assertion helpers for session and claim state that give more meaningful
//! failure messages than bare `assert_eq!`.

use core_kernel::KeyValueStore;
use domain_claims::{Claim, ClaimStatus};
use domain_session::session::keys;
use domain_session::{GateDecision, Role, SessionStore};

/// Asserts the store is signed out and none of its keys survive in storage
pub fn assert_signed_out(store: &SessionStore, storage: &dyn KeyValueStore) {
    assert!(
        !store.is_authenticated(),
        "Expected signed-out store, found role {:?}",
        store.role()
    );
    for key in keys::SESSION {
        let value = storage.get(key).expect("storage read failed");
        assert!(value.is_none(), "Expected key '{}' to be cleared, found {:?}", key, value);
    }
}

/// Asserts the gate silently sent `role` to its own home
pub fn assert_redirected_home(decision: &GateDecision, role: Role) {
    assert_eq!(
        decision,
        &GateDecision::Redirect(role.home()),
        "Expected {} to be redirected to {}",
        role,
        role.home()
    );
}

/// Asserts a claim shows the given status
pub fn assert_claim_status(claim: &Claim, expected: ClaimStatus) {
    assert_eq!(
        claim.status, expected,
        "Claim {} shows status '{}', expected '{}'",
        claim.id, claim.status, expected
    );
}
