//! Pre-built Test Fixtures
//!
//! Provides ready-to-use claims, tokens, accounts and documents. These
//! fixtures are consistent and predictable for unit tests.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use rust_decimal_macros::dec;
use serde::Serialize;
use serde_json::{json, Value};

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimStatus, ExplanationOfBenefits, RiskScore, SupportingDocument};

/// Fixture for claim records
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// An approved low-risk check-up with an EOB
    pub fn approved_checkup() -> Claim {
        let mut claim = Claim::new(ClaimId::new("C-1001"), ClaimStatus::Approved);
        claim.procedure = Some("Annual Check-up".to_string());
        claim.amount = Some(dec!(250.00));
        claim.risk_score = Some(RiskScore::new(12.0));
        claim.ai_prediction = Some("Approved".to_string());
        claim.eob = Some(ExplanationOfBenefits {
            allowed_amount: dec!(220.00),
            plan_payable: dec!(176.00),
            member_liability: dec!(44.00),
        });
        claim
    }

    /// A high-risk MRI waiting on a human
    pub fn manual_review_mri() -> Claim {
        let mut claim = Claim::new(ClaimId::new("C-1002"), ClaimStatus::ManualReview);
        claim.procedure = Some("MRI Scan".to_string());
        claim.amount = Some(dec!(1850.00));
        claim.risk_score = Some(RiskScore::new(78.0));
        claim.decision_reason = Some("Amount above typical range;Provider not in network".to_string());
        claim
    }

    /// A fresh claim still processing
    pub fn processing_dental() -> Claim {
        let mut claim = Claim::new(ClaimId::new("C-1003"), ClaimStatus::Processing);
        claim.procedure = Some("Dental Cleaning".to_string());
        claim.amount = Some(dec!(120.00));
        claim.risk_score = Some(RiskScore::new(45.0));
        claim
    }

    pub fn all() -> Vec<Claim> {
        vec![
            Self::approved_checkup(),
            Self::manual_review_mri(),
            Self::processing_dental(),
        ]
    }

    /// Wire JSON for the processing claim, as the service would send it
    pub fn processing_json(id: &str) -> Value {
        json!({
            "id": id,
            "procedure": "Physiotherapy",
            "amount": 310.0,
            "status": "Processing",
            "risk_score": 35,
            "decision_reason": null,
            "ai_prediction": "Processing"
        })
    }
}

/// Fixture for access tokens
pub struct TokenFixtures;

#[derive(Serialize)]
struct TokenClaims {
    sub: String,
    role: String,
    exp: i64,
}

impl TokenFixtures {
    /// Signed JWT whose `exp` is `delta` from now
    pub fn jwt_expiring_in(delta: Duration) -> String {
        let claims = TokenClaims {
            sub: AccountFixtures::INSURER_EMAIL.to_string(),
            role: "insurer".to_string(),
            exp: (Utc::now() + delta).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"fixture-secret"),
        )
        .expect("Failed to sign fixture token")
    }

    pub fn expired_jwt() -> String {
        Self::jwt_expiring_in(Duration::minutes(-30))
    }

    pub fn live_jwt() -> String {
        Self::jwt_expiring_in(Duration::hours(1))
    }
}

/// Fixture for login accounts
pub struct AccountFixtures;

impl AccountFixtures {
    pub const INSURER_EMAIL: &'static str = "a@b.com";
    pub const INSURER_PASSWORD: &'static str = "x";
    pub const INSURER_TOKEN: &'static str = "t1";

    pub const HOLDER_EMAIL: &'static str = "holder@example.com";
    pub const HOLDER_PASSWORD: &'static str = "hunter2";
    pub const HOLDER_TOKEN: &'static str = "p1";
}

/// Fixture for supporting documents
pub struct DocumentFixtures;

impl DocumentFixtures {
    pub fn pdf_bill() -> SupportingDocument {
        SupportingDocument::new("bill.pdf", b"%PDF-1.4\n%fixture\n".to_vec())
    }

    pub fn jpeg_bill() -> SupportingDocument {
        SupportingDocument::new("Bill.JPG", vec![0xFF, 0xD8, 0xFF, 0xE0])
    }

    pub fn word_document() -> SupportingDocument {
        SupportingDocument::new("bill.docx", b"PK\x03\x04".to_vec())
    }
}
