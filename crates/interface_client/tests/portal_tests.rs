//! Portal flow and view tests
//!
//! Views run against the in-memory mock service unless a test needs
//! something only the wire can express.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal_macros::dec;
use serde_json::json;

use core_kernel::{ClaimId, Currency, KeyValueStore};
use domain_claims::{ClaimStatus, Decision, StatusFilter};
use domain_session::session::keys;
use domain_session::{GateDecision, Role, Route, SessionStore};
use infra_storage::{FileStore, MemoryStore};
use interface_client::service::{HttpClaimsService, MockClaimsService, RecordedCall};
use interface_client::views::dashboard::{EMPTY_LIST, NO_MATCHES};
use interface_client::views::{ClaimView, DashboardView, LoginView, Outcome, SubmitClaimView};
use interface_client::{flows, ClaimsPortal, ClaimsService, ClientConfig, FlowError, ServiceError};
use test_utils::{
    assert_claim_status, assert_redirected_home, assert_signed_out, claim_strategy,
    gated_route_strategy, public_route_strategy, role_strategy, AccountFixtures, ClaimBuilder,
    ClaimFixtures, ClaimFormBuilder, DocumentFixtures, FakeClaimsServer, TokenFixtures,
};

const INSURER: (&str, &str) = (AccountFixtures::INSURER_EMAIL, AccountFixtures::INSURER_PASSWORD);
const HOLDER: (&str, &str) = (AccountFixtures::HOLDER_EMAIL, AccountFixtures::HOLDER_PASSWORD);

fn mock_service() -> MockClaimsService {
    MockClaimsService::new()
        .with_account(INSURER.0, INSURER.1, Some(Role::Insurer), Some(AccountFixtures::INSURER_TOKEN))
        .with_account(HOLDER.0, HOLDER.1, Some(Role::Policyholder), Some(AccountFixtures::HOLDER_TOKEN))
        .with_claims(ClaimFixtures::all())
}

fn portal_with(service: &MockClaimsService) -> (Arc<MemoryStore>, ClaimsPortal) {
    let storage = Arc::new(MemoryStore::new());
    let session = SessionStore::new(storage.clone());
    let service: Arc<dyn ClaimsService> = Arc::new(service.clone());
    (storage, ClaimsPortal::new(session, service, Currency::USD))
}

async fn signed_in(service: &MockClaimsService, account: (&str, &str)) -> (Arc<MemoryStore>, ClaimsPortal) {
    let (storage, portal) = portal_with(service);
    flows::sign_in(&portal, account.0, account.1).await.unwrap();
    service.reset_calls();
    (storage, portal)
}

fn only_login_calls(service: &MockClaimsService) -> bool {
    service
        .calls()
        .iter()
        .all(|call| matches!(call, RecordedCall::Login { .. }))
}

// ============================================================================
// Login Tests
// ============================================================================

mod login_tests {
    use super::*;

    #[tokio::test]
    async fn test_insurer_login_lands_on_insurer_dashboard() {
        let service = mock_service();
        let (storage, portal) = portal_with(&service);

        let mut view = LoginView::new("a@b.com", "x");
        let outcome = view.submit(&portal).await;

        assert_eq!(outcome, Outcome::Navigate(Route::InsurerDashboard));
        assert!(view.password.is_empty());
        assert_eq!(portal.session().token().as_deref(), Some("t1"));
        assert_eq!(storage.get(keys::ROLE).unwrap().as_deref(), Some("insurer"));
        assert_eq!(storage.get(keys::TOKEN).unwrap().as_deref(), Some("t1"));

        let detail = Route::InsurerClaim(ClaimId::new("C-1002"));
        assert_eq!(portal.navigate(&detail), GateDecision::Render);
        assert_redirected_home(&portal.navigate(&Route::UserDashboard), Role::Insurer);
        assert_redirected_home(&portal.navigate(&Route::SubmitClaim), Role::Insurer);
    }

    #[tokio::test]
    async fn test_login_returns_to_remembered_route() {
        let service = mock_service();
        let (_storage, portal) = portal_with(&service);
        let wanted = Route::InsurerClaim(ClaimId::new("C-1002"));

        assert_eq!(
            portal.navigate(&wanted),
            GateDecision::RedirectToLogin { from: wanted.clone() }
        );

        let outcome = LoginView::new(INSURER.0, INSURER.1).submit(&portal).await;
        assert_eq!(outcome, Outcome::Navigate(wanted));

        // the destination is used once
        assert_eq!(portal.login_destination(), Route::InsurerDashboard);
    }

    #[tokio::test]
    async fn test_remembered_route_of_other_role_is_ignored() {
        let service = mock_service();
        let (_storage, portal) = portal_with(&service);

        portal.navigate(&Route::SubmitClaim);
        let outcome = LoginView::new(INSURER.0, INSURER.1).submit(&portal).await;

        assert_eq!(outcome, Outcome::Navigate(Route::InsurerDashboard));
    }

    #[tokio::test]
    async fn test_bad_credentials_keep_email_and_clear_password() {
        let service = mock_service();
        let (_storage, portal) = portal_with(&service);

        let mut view = LoginView::new(INSURER.0, "wrong");
        let outcome = view.submit(&portal).await;

        assert_eq!(outcome, Outcome::Stay);
        assert_eq!(view.email, INSURER.0);
        assert!(view.password.is_empty());
        let notice = view.notice.unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.text, "Invalid email or password");
        assert!(!portal.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_blank_fields_never_reach_the_service() {
        let service = mock_service();
        let (_storage, portal) = portal_with(&service);

        let err = flows::sign_in(&portal, "   ", "x").await.unwrap_err();

        assert!(matches!(err, FlowError::Validation(_)));
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_role_signs_in_as_policyholder() {
        let service = MockClaimsService::new().with_account("plain@example.com", "pw", None, None);
        let (_storage, portal) = portal_with(&service);

        let session = flows::sign_in(&portal, "plain@example.com", "pw").await.unwrap();

        assert_eq!(session.role, Role::Policyholder);
        assert_eq!(session.token, "session");
        assert_eq!(portal.login_destination(), Route::UserDashboard);
    }

    #[tokio::test]
    async fn test_unknown_role_fails_login() {
        let server = FakeClaimsServer::start().await;
        server.with_login("root@example.com", "pw", json!({"role": "admin", "access_token": "r1"}));
        let storage = Arc::new(MemoryStore::new());
        let service: Arc<dyn ClaimsService> = Arc::new(
            HttpClaimsService::new(&server.base_url(), std::time::Duration::from_secs(5)).unwrap(),
        );
        let portal = ClaimsPortal::new(SessionStore::new(storage.clone()), service, Currency::USD);

        let err = flows::sign_in(&portal, "root@example.com", "pw").await.unwrap_err();

        assert!(matches!(err, FlowError::Authentication(_)));
        assert_signed_out(portal.session(), storage.as_ref());
    }
}

// ============================================================================
// Route Gate Tests
// ============================================================================

mod gate_tests {
    use super::*;

    #[tokio::test]
    async fn test_logout_makes_gated_routes_unreachable() {
        let service = mock_service();
        let (storage, portal) = signed_in(&service, HOLDER).await;

        flows::sign_out(&portal).unwrap();

        assert_signed_out(portal.session(), storage.as_ref());
        assert_eq!(
            portal.navigate(&Route::UserDashboard),
            GateDecision::RedirectToLogin { from: Route::UserDashboard }
        );

        let mut view = DashboardView::new(Role::Policyholder);
        assert_eq!(view.load(&portal).await, Outcome::Navigate(Route::Login));
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_role_is_sent_home_without_a_request() {
        let service = mock_service();
        let (_storage, portal) = signed_in(&service, HOLDER).await;

        assert_redirected_home(&portal.navigate(&Route::InsurerDashboard), Role::Policyholder);

        let mut view = DashboardView::new(Role::Insurer);
        assert_eq!(view.load(&portal).await, Outcome::Navigate(Route::UserDashboard));
        assert!(view.notice.is_none());

        let mut claim = ClaimView::new(Role::Insurer, ClaimId::new("C-1002"));
        assert_eq!(
            claim.decide(&portal, Decision::Approve).await,
            Outcome::Navigate(Route::UserDashboard)
        );
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_insurer_cannot_submit_claims() {
        let service = mock_service();
        let (_storage, portal) = signed_in(&service, INSURER).await;

        let mut view = SubmitClaimView::new();
        view.form = ClaimFormBuilder::new().build();
        view.attach(DocumentFixtures::pdf_bill());

        assert_eq!(view.submit(&portal).await, Outcome::Navigate(Route::InsurerDashboard));
        assert!(service.calls().is_empty());
    }
}

// ============================================================================
// Dashboard Tests
// ============================================================================

mod dashboard_tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_list_shows_empty_state() {
        let service = MockClaimsService::new().with_account(HOLDER.0, HOLDER.1, Some(Role::Policyholder), Some("p1"));
        let (_storage, portal) = signed_in(&service, HOLDER).await;

        let mut view = DashboardView::new(Role::Policyholder);
        assert_eq!(view.empty_state(), None);
        assert_eq!(view.load(&portal).await, Outcome::Stay);

        assert!(view.is_loaded());
        assert_eq!(view.empty_state(), Some(EMPTY_LIST));
    }

    #[tokio::test]
    async fn test_filters_apply_to_loaded_claims() {
        let service = mock_service();
        let (_storage, portal) = signed_in(&service, INSURER).await;

        let mut view = DashboardView::new(Role::Insurer);
        view.load(&portal).await;
        assert_eq!(view.visible().len(), 3);

        view.set_status(StatusFilter::Only(ClaimStatus::ManualReview));
        let visible = view.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.as_str(), "C-1002");

        view.set_query("dental");
        assert_eq!(view.empty_state(), Some(NO_MATCHES));

        let summary = view.summary(&portal);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.high_risk, 1);
    }

    #[tokio::test]
    async fn test_search_matches_id_and_procedure() {
        let service = MockClaimsService::new()
            .with_account(INSURER.0, INSURER.1, Some(Role::Insurer), Some("t1"))
            .with_claims([
                ClaimBuilder::new().with_id("C-5001").with_procedure("Knee X-Ray").build(),
                ClaimBuilder::new()
                    .with_id("C-5002")
                    .with_status(ClaimStatus::Rejected)
                    .with_risk(82.0)
                    .with_reasons(&["Duplicate invoice"])
                    .build(),
                ClaimBuilder::new()
                    .with_id("C-6003")
                    .with_status(ClaimStatus::Approved)
                    .with_amount(dec!(40.00))
                    .with_eob(dec!(40.00), dec!(32.00))
                    .build(),
            ]);
        let (_storage, portal) = signed_in(&service, INSURER).await;

        let mut view = DashboardView::new(Role::Insurer);
        view.load(&portal).await;

        view.set_query("c-50");
        assert_eq!(view.visible().len(), 2);
        view.set_query("x-ray");
        assert_eq!(view.visible()[0].id.as_str(), "C-5001");

        let summary = view.summary(&portal);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.high_risk, 1);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_list() {
        let service = mock_service();
        let (_storage, portal) = signed_in(&service, INSURER).await;

        let mut view = DashboardView::new(Role::Insurer);
        view.load(&portal).await;
        service.fail_next(ServiceError::Transport("connection refused".to_string()));

        assert_eq!(view.load(&portal).await, Outcome::Stay);
        assert_eq!(view.claims.len(), 3);
        let notice = view.notice.clone().unwrap();
        assert!(notice.is_error());
        assert!(notice.text.contains("connection refused"));

        view.load(&portal).await;
        assert!(view.notice.is_none());
    }

    #[tokio::test]
    async fn test_rejected_token_ends_session() {
        let service = mock_service();
        let (storage, portal) = signed_in(&service, INSURER).await;
        service.revoke_tokens();

        let mut view = DashboardView::new(Role::Insurer);
        assert_eq!(view.load(&portal).await, Outcome::Navigate(Route::Login));

        assert_eq!(
            view.notice.unwrap().text,
            "Your session has expired. Please log in again."
        );
        assert_signed_out(portal.session(), storage.as_ref());
    }
}

// ============================================================================
// Decision Tests
// ============================================================================

mod decision_tests {
    use super::*;

    #[tokio::test]
    async fn test_approve_shows_refetched_status() {
        let service = mock_service();
        service.settle_decisions_as(ClaimStatus::ManualReview);
        let (_storage, portal) = signed_in(&service, INSURER).await;

        let mut view = ClaimView::new(Role::Insurer, ClaimId::new("C-1003"));
        view.load(&portal).await;
        view.note = "looks fine".to_string();

        assert_eq!(view.decide(&portal, Decision::Approve).await, Outcome::Stay);

        assert_claim_status(view.claim.as_ref().unwrap(), ClaimStatus::ManualReview);
        assert_eq!(
            view.notice.as_ref().unwrap().text,
            "Decision recorded. Status is now Manual Review."
        );
        assert!(view.note.is_empty());

        let calls = service.calls();
        assert!(matches!(calls[1], RecordedCall::DecideClaim { ref request, .. } if request.note == "looks fine"));
        assert!(matches!(calls[2], RecordedCall::GetClaim { .. }));
    }

    #[tokio::test]
    async fn test_failed_decision_keeps_claim_and_note() {
        let service = mock_service();
        let (_storage, portal) = signed_in(&service, INSURER).await;

        let mut view = ClaimView::new(Role::Insurer, ClaimId::new("C-1002"));
        view.load(&portal).await;
        view.note = "provider verified".to_string();
        service.fail_next(ServiceError::Rejected {
            status: 409,
            message: "Claim is locked".to_string(),
        });

        assert_eq!(view.decide(&portal, Decision::Reject).await, Outcome::Stay);

        assert_claim_status(view.claim.as_ref().unwrap(), ClaimStatus::ManualReview);
        assert_eq!(view.note, "provider verified");
        assert_eq!(view.notice.as_ref().unwrap().text, "Claim is locked");
        assert_eq!(service.claims()[1].status, ClaimStatus::ManualReview);
    }

    #[tokio::test]
    async fn test_view_overrides_decided_claim() {
        let service = mock_service();
        let (_storage, portal) = signed_in(&service, INSURER).await;

        let mut view = ClaimView::new(Role::Insurer, ClaimId::new("C-1001"));
        view.load(&portal).await;
        assert!(view.claim.as_ref().unwrap().status.is_decided());

        assert_eq!(view.decide(&portal, Decision::Reject).await, Outcome::Stay);

        assert_claim_status(view.claim.as_ref().unwrap(), ClaimStatus::Rejected);
        assert_eq!(
            view.notice.as_ref().unwrap().text,
            "Decision recorded. Status is now Rejected."
        );
        assert!(matches!(service.calls().last(), Some(RecordedCall::GetClaim { .. })));
    }

    #[tokio::test]
    async fn test_decided_claims_can_be_decided_again() {
        let service = mock_service();
        let (_storage, portal) = signed_in(&service, INSURER).await;

        let claim = flows::decide(&portal, &ClaimId::new("C-1001"), Decision::Reject, "")
            .await
            .unwrap();

        assert_claim_status(&claim, ClaimStatus::Rejected);
    }

    #[tokio::test]
    async fn test_unauthorized_decision_destroys_session() {
        let service = mock_service();
        let (storage, portal) = signed_in(&service, INSURER).await;
        service.revoke_tokens();

        let mut view = ClaimView::new(Role::Insurer, ClaimId::new("C-1002"));
        assert_eq!(view.decide(&portal, Decision::Approve).await, Outcome::Navigate(Route::Login));

        assert_signed_out(portal.session(), storage.as_ref());
        assert_eq!(
            portal.navigate(&Route::InsurerDashboard),
            GateDecision::RedirectToLogin { from: Route::InsurerDashboard }
        );
    }

    #[tokio::test]
    async fn test_policyholder_reads_own_claim_detail() {
        let service = mock_service();
        let (_storage, portal) = signed_in(&service, HOLDER).await;

        let mut view = ClaimView::new(Role::Policyholder, ClaimId::new("C-1001"));
        assert!(view.is_loading());
        assert_eq!(view.load(&portal).await, Outcome::Stay);

        let claim = view.claim.unwrap();
        assert_eq!(claim.reasons(), Vec::<&str>::new());
        assert!(claim.eob.is_some());
    }
}

// ============================================================================
// Submission Tests
// ============================================================================

mod submission_tests {
    use super::*;

    async fn holder_view(service: &MockClaimsService) -> (ClaimsPortal, SubmitClaimView) {
        let (_storage, portal) = signed_in(service, HOLDER).await;
        let mut view = SubmitClaimView::new();
        view.form = ClaimFormBuilder::new()
            .with_full_name("Grace Hopper")
            .with_email("grace@example.com")
            .with_amount("99.50")
            .build();
        (portal, view)
    }

    #[tokio::test]
    async fn test_missing_document_sends_nothing() {
        let service = mock_service();
        let (portal, mut view) = holder_view(&service).await;
        let before = view.form.clone();

        assert_eq!(view.submit(&portal).await, Outcome::Stay);

        assert_eq!(view.notice.unwrap().text, "Please attach your bill (PDF/JPG/PNG)");
        assert_eq!(view.form, before);
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_rejected_locally() {
        let service = mock_service();
        let (portal, mut view) = holder_view(&service).await;
        view.attach(DocumentFixtures::word_document());

        view.submit(&portal).await;

        let notice = view.notice.unwrap();
        assert!(notice.is_error());
        assert!(notice.text.contains(".docx"));
        assert!(view.document.is_some());
        assert!(only_login_calls(&service));
    }

    #[tokio::test]
    async fn test_missing_full_name_is_reported_first() {
        let service = mock_service();
        let (portal, mut view) = holder_view(&service).await;
        view.form.full_name = "  ".to_string();
        view.form.email = String::new();
        view.attach(DocumentFixtures::pdf_bill());

        view.submit(&portal).await;

        assert_eq!(view.notice.unwrap().text, "Full name is required");
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_server_rejection_keeps_every_value() {
        let service = mock_service();
        let (portal, mut view) = holder_view(&service).await;
        view.form.amount = String::new();
        view.attach(DocumentFixtures::pdf_bill());
        let form = view.form.clone();
        service.fail_next(ServiceError::Rejected {
            status: 400,
            message: "amount required".to_string(),
        });

        assert_eq!(view.submit(&portal).await, Outcome::Stay);

        assert_eq!(view.notice.as_ref().unwrap().text, "amount required");
        assert_eq!(view.form, form);
        assert_eq!(view.document, Some(DocumentFixtures::pdf_bill()));
        assert!(view.receipt.is_none());
    }

    #[tokio::test]
    async fn test_success_clears_form_and_refetches() {
        let service = mock_service();
        let (portal, mut view) = holder_view(&service).await;
        view.attach(DocumentFixtures::jpeg_bill());

        assert_eq!(view.submit(&portal).await, Outcome::Stay);

        let receipt = view.receipt.clone().unwrap();
        assert_eq!(
            view.notice.as_ref().unwrap().text,
            format!("Claim {} submitted. Prediction: Processing.", receipt.claim_id)
        );
        assert_eq!(view.form, Default::default());
        assert!(view.document.is_none());
        assert_eq!(view.claims.len(), 4);
        assert!(view.claims.iter().any(|c| c.id == receipt.claim_id));
        assert!(matches!(service.calls().last(), Some(RecordedCall::ListClaims { .. })));
    }
}

// ============================================================================
// Persistence Tests
// ============================================================================

mod persistence_tests {
    use super::*;

    #[tokio::test]
    async fn test_session_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let service = mock_service();

        {
            let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&path).unwrap());
            let portal = ClaimsPortal::new(
                SessionStore::restore(storage).unwrap(),
                Arc::new(service.clone()),
                Currency::USD,
            );
            flows::sign_in(&portal, INSURER.0, INSURER.1).await.unwrap();
        }

        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&path).unwrap());
        let portal = ClaimsPortal::new(
            SessionStore::restore(storage).unwrap(),
            Arc::new(service.clone()),
            Currency::USD,
        );

        let session = portal.session().current().unwrap();
        assert_eq!(session.role, Role::Insurer);
        assert_eq!(session.token, "t1");
        assert_eq!(session.email.as_deref(), Some(INSURER.0));
        assert_eq!(portal.navigate(&Route::InsurerDashboard), GateDecision::Render);
    }

    #[tokio::test]
    async fn test_expired_token_on_disk_starts_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        {
            let store = FileStore::open(&path).unwrap();
            store.set(keys::TOKEN, &TokenFixtures::expired_jwt()).unwrap();
            store.set(keys::ROLE, "insurer").unwrap();
        }

        let storage = Arc::new(FileStore::open(&path).unwrap());
        let session = SessionStore::restore(storage.clone()).unwrap();
        let portal = ClaimsPortal::new(session, Arc::new(mock_service()), Currency::USD);

        assert_signed_out(portal.session(), storage.as_ref());
        assert_eq!(
            portal.navigate(&Route::InsurerDashboard),
            GateDecision::RedirectToLogin { from: Route::InsurerDashboard }
        );
    }

    #[tokio::test]
    async fn test_portal_from_config_with_mock_provider() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig {
            provider: "mock".to_string(),
            session_path: Some(dir.path().join("nested").join("session.json")),
            currency: "EUR".to_string(),
            ..ClientConfig::default()
        };

        let portal = ClaimsPortal::from_config(&config).unwrap();
        assert_eq!(portal.currency(), Currency::EUR);
        assert!(!portal.session().is_authenticated());

        let outcome = LoginView::new("insurer@example.com", "password").submit(&portal).await;
        assert_eq!(outcome, Outcome::Navigate(Route::InsurerDashboard));
        assert!(dir.path().join("nested").join("session.json").exists());
    }

    #[tokio::test]
    async fn test_corrupt_session_file_starts_signed_out() {
        for body in [r#"{"token":"t1","role":"insurer","email":null}"#, r#"{"token":"t"#] {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("session.json");
            std::fs::write(&path, body).unwrap();
            let config = ClientConfig {
                provider: "mock".to_string(),
                session_path: Some(path.clone()),
                ..ClientConfig::default()
            };

            let portal = ClaimsPortal::from_config(&config).unwrap();
            assert!(!portal.session().is_authenticated());
            assert_eq!(
                portal.navigate(&Route::InsurerDashboard),
                GateDecision::RedirectToLogin { from: Route::InsurerDashboard }
            );

            let outcome = LoginView::new("insurer@example.com", "password").submit(&portal).await;
            assert_eq!(outcome, Outcome::Navigate(Route::InsurerDashboard));

            let reopened = FileStore::open(&path).unwrap();
            assert_eq!(reopened.get(keys::ROLE).unwrap().as_deref(), Some("insurer"));
            assert!(reopened.get(keys::TOKEN).unwrap().is_some());
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod property_tests {
    use super::*;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    proptest! {
        #[test]
        fn prop_signed_out_never_renders_gated_routes(route in gated_route_strategy()) {
            let (_storage, portal) = portal_with(&MockClaimsService::new());
            let decision = portal.navigate(&route);
            prop_assert_eq!(decision, GateDecision::RedirectToLogin { from: route });
        }

        #[test]
        fn prop_public_routes_render_for_everyone(
            route in public_route_strategy(),
            role in role_strategy(),
        ) {
            let (_storage, portal) = portal_with(&MockClaimsService::new());
            prop_assert_eq!(portal.navigate(&route), GateDecision::Render);

            portal.session().login(role, "t", None).unwrap();
            prop_assert_eq!(portal.navigate(&route), GateDecision::Render);
        }

        #[test]
        fn prop_gated_routes_render_only_for_their_role(
            route in gated_route_strategy(),
            role in role_strategy(),
        ) {
            let (_storage, portal) = portal_with(&MockClaimsService::new());
            portal.session().login(role, "t", None).unwrap();

            let allowed = route.allowed_roles().is_some_and(|roles| roles.contains(&role));
            let decision = portal.navigate(&route);
            if allowed {
                prop_assert_eq!(decision, GateDecision::Render);
            } else {
                prop_assert_eq!(decision, GateDecision::Redirect(role.home()));
            }
        }

        #[test]
        fn prop_dashboard_shows_exactly_what_service_returned(
            claims in prop::collection::vec(claim_strategy(), 0..8),
        ) {
            let service = MockClaimsService::new()
                .with_account(INSURER.0, INSURER.1, Some(Role::Insurer), Some("t1"))
                .with_claims(claims.clone());

            let view = runtime().block_on(async {
                let (_storage, portal) = signed_in(&service, INSURER).await;
                let mut view = DashboardView::new(Role::Insurer);
                view.load(&portal).await;
                view
            });

            prop_assert_eq!(&view.claims, &claims);
            prop_assert_eq!(view.empty_state().is_some(), claims.is_empty());
        }
    }
}
