//! Mock claims service
//!
//! Keeps accounts and claims in memory and records every call for test
//! assertions. Thread-safe via `Arc<Mutex<>>`.

use std::sync::{Arc, Mutex, MutexGuard};

use rust_decimal::Decimal;

use core_kernel::ClaimId;
use domain_claims::{
    Claim, ClaimStatus, ClaimSubmission, DecisionRequest, ExplanationOfBenefits, RiskScore,
    SubmissionReceipt,
};
use domain_session::Role;

use super::ClaimsService;
use crate::dto::{LoginRequest, LoginResponse};
use crate::error::ServiceError;

/// Demo policyholder login for the mock provider
pub const DEMO_POLICYHOLDER: (&str, &str) = ("policyholder@example.com", "password");
/// Demo insurer login for the mock provider
pub const DEMO_INSURER: (&str, &str) = ("insurer@example.com", "password");

const HIGH_RISK_AMOUNT: i64 = 1_000;

/// A call the mock received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Login { email: String },
    ListClaims { token: Option<String> },
    GetClaim { token: Option<String>, id: ClaimId },
    SubmitClaim { token: Option<String>, full_name: String, file_name: String },
    DecideClaim { token: Option<String>, id: ClaimId, request: DecisionRequest },
}

#[derive(Debug, Clone)]
struct Account {
    email: String,
    password: String,
    role: Option<Role>,
    token: Option<String>,
}

#[derive(Debug, Default)]
struct MockState {
    accounts: Vec<Account>,
    claims: Vec<Claim>,
    settle_as: Option<ClaimStatus>,
    next_failure: Option<ServiceError>,
    revoked: bool,
    calls: Vec<RecordedCall>,
    next_id: u64,
}

/// In-memory claims service
#[derive(Debug, Clone, Default)]
pub struct MockClaimsService {
    state: Arc<Mutex<MockState>>,
}

impl MockClaimsService {
    /// Creates an empty mock with no accounts or claims
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock with the demo accounts and a few claims
    pub fn with_demo_data() -> Self {
        let service = Self::new()
            .with_account(DEMO_POLICYHOLDER.0, DEMO_POLICYHOLDER.1, Some(Role::Policyholder), Some("demo-policyholder"))
            .with_account(DEMO_INSURER.0, DEMO_INSURER.1, Some(Role::Insurer), Some("demo-insurer"));

        let mut checkup = Claim::new(ClaimId::new("C-1001"), ClaimStatus::Approved);
        checkup.procedure = Some("Annual Check-up".to_string());
        checkup.amount = Some(Decimal::new(25000, 2));
        checkup.risk_score = Some(RiskScore::new(12.0));
        checkup.ai_prediction = Some("Approved".to_string());
        checkup.eob = Some(ExplanationOfBenefits {
            allowed_amount: Decimal::new(22000, 2),
            plan_payable: Decimal::new(17600, 2),
            member_liability: Decimal::new(4400, 2),
        });

        let mut mri = Claim::new(ClaimId::new("C-1002"), ClaimStatus::ManualReview);
        mri.procedure = Some("MRI Scan".to_string());
        mri.amount = Some(Decimal::new(185000, 2));
        mri.risk_score = Some(RiskScore::new(78.0));
        mri.decision_reason = Some("Amount above typical range;Provider not in network".to_string());
        mri.ai_prediction = Some("Manual Review".to_string());
        mri.nlp_extracted_amount = Some(Decimal::new(185000, 2));

        let mut dental = Claim::new(ClaimId::new("C-1003"), ClaimStatus::Processing);
        dental.procedure = Some("Dental Cleaning".to_string());
        dental.amount = Some(Decimal::new(12000, 2));
        dental.risk_score = Some(RiskScore::new(45.0));

        service.with_claims([checkup, mri, dental])
    }

    /// Adds an account; `token: None` mimics a service that issues no token
    pub fn with_account(
        self,
        email: &str,
        password: &str,
        role: Option<Role>,
        token: Option<&str>,
    ) -> Self {
        self.lock().accounts.push(Account {
            email: email.to_string(),
            password: password.to_string(),
            role,
            token: token.map(str::to_string),
        });
        self
    }

    pub fn with_claims(self, claims: impl IntoIterator<Item = Claim>) -> Self {
        self.lock().claims.extend(claims);
        self
    }

    /// Makes every later decision land on `status` regardless of the request
    pub fn settle_decisions_as(&self, status: ClaimStatus) {
        self.lock().settle_as = Some(status);
    }

    /// Fails the next call with `error`
    pub fn fail_next(&self, error: ServiceError) {
        self.lock().next_failure = Some(error);
    }

    /// Answers every authenticated call with 401 from now on
    pub fn revoke_tokens(&self) {
        self.lock().revoked = true;
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn claims(&self) -> Vec<Claim> {
        self.lock().claims.clone()
    }

    pub fn reset_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MockState {
    fn take_failure(&mut self) -> Result<(), ServiceError> {
        match self.next_failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn authorize(&self, token: Option<&str>) -> Result<(), ServiceError> {
        let known = token.is_some_and(|t| {
            self.accounts
                .iter()
                .any(|a| a.token.as_deref().unwrap_or(domain_session::SENTINEL_TOKEN) == t)
        });
        if self.revoked || !known {
            return Err(ServiceError::Unauthorized {
                message: "Token is invalid or expired".to_string(),
            });
        }
        Ok(())
    }

    fn claim_mut(&mut self, id: &ClaimId) -> Result<&mut Claim, ServiceError> {
        self.claims
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| ServiceError::Rejected {
                status: 404,
                message: "Claim not found".to_string(),
            })
    }
}

#[async_trait::async_trait]
impl ClaimsService for MockClaimsService {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ServiceError> {
        let mut state = self.lock();
        state.calls.push(RecordedCall::Login {
            email: request.email.clone(),
        });
        state.take_failure()?;

        let account = state
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(&request.email) && a.password == request.password)
            .ok_or_else(|| ServiceError::Unauthorized {
                message: "Invalid email or password".to_string(),
            })?;

        tracing::debug!(email = %account.email, "Mock claims service: login");
        Ok(LoginResponse {
            role: account.role.map(|r| r.as_str().to_string()),
            access_token: account.token.clone(),
            message: Some("Login successful".to_string()),
        })
    }

    async fn list_claims(&self, token: Option<&str>) -> Result<Vec<Claim>, ServiceError> {
        let mut state = self.lock();
        state.calls.push(RecordedCall::ListClaims {
            token: token.map(str::to_string),
        });
        state.take_failure()?;
        state.authorize(token)?;
        Ok(state.claims.clone())
    }

    async fn get_claim(&self, token: Option<&str>, id: &ClaimId) -> Result<Claim, ServiceError> {
        let mut state = self.lock();
        state.calls.push(RecordedCall::GetClaim {
            token: token.map(str::to_string),
            id: id.clone(),
        });
        state.take_failure()?;
        state.authorize(token)?;
        state.claim_mut(id).map(|c| c.clone())
    }

    async fn submit_claim(
        &self,
        token: Option<&str>,
        submission: &ClaimSubmission,
    ) -> Result<SubmissionReceipt, ServiceError> {
        let mut state = self.lock();
        state.calls.push(RecordedCall::SubmitClaim {
            token: token.map(str::to_string),
            full_name: submission.form.full_name.clone(),
            file_name: submission.document.file_name().to_string(),
        });
        state.take_failure()?;
        state.authorize(token)?;

        state.next_id += 1;
        let id = ClaimId::new(format!("C-{}", 2000 + state.next_id));
        let amount = submission.form.amount.parse::<Decimal>().ok();
        let high_risk = amount.is_some_and(|a| a > Decimal::from(HIGH_RISK_AMOUNT));

        let mut claim = Claim::new(id.clone(), ClaimStatus::Processing);
        claim.procedure = Some(submission.form.description.clone()).filter(|d| !d.is_empty());
        claim.amount = amount;
        claim.risk_score = Some(RiskScore::new(if high_risk { 75.0 } else { 20.0 }));
        if high_risk {
            claim.status = ClaimStatus::ManualReview;
            claim.decision_reason = Some("Amount above typical range".to_string());
        }
        claim.ai_prediction = Some(claim.status.to_string());

        let receipt = SubmissionReceipt {
            claim_id: id,
            prediction: claim.prediction().to_string(),
            risk_score: claim.risk_score,
            reason: claim.decision_reason.clone(),
        };
        state.claims.push(claim);
        Ok(receipt)
    }

    async fn decide_claim(
        &self,
        token: Option<&str>,
        id: &ClaimId,
        request: &DecisionRequest,
    ) -> Result<(), ServiceError> {
        let mut state = self.lock();
        state.calls.push(RecordedCall::DecideClaim {
            token: token.map(str::to_string),
            id: id.clone(),
            request: request.clone(),
        });
        state.take_failure()?;
        state.authorize(token)?;

        let status = state.settle_as.unwrap_or(request.decision.requested_status());
        let claim = state.claim_mut(id)?;
        claim.status = status;
        if !request.note.is_empty() {
            claim.decision_reason = Some(request.note.clone());
        }
        Ok(())
    }
}
