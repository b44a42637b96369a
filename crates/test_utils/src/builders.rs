//! Test Data Builders
//!
//! Builder patterns for claims and claim forms with sensible defaults.
//! Tests specify only the fields they care about.

use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimForm, ClaimStatus, ExplanationOfBenefits, RiskScore};

/// Builder for claim records
pub struct ClaimBuilder {
    claim: Claim,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// Creates a processing claim with a random id and a realistic amount
    pub fn new() -> Self {
        let number: u32 = (1000..99999).fake();
        let mut claim = Claim::new(ClaimId::new(format!("C-{}", number)), ClaimStatus::Processing);
        claim.procedure = Some("Outpatient Consultation".to_string());
        claim.amount = Some(dec!(180.00));
        Self { claim }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.claim.id = ClaimId::new(id.into());
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.claim.status = status;
        self
    }

    pub fn with_procedure(mut self, procedure: impl Into<String>) -> Self {
        self.claim.procedure = Some(procedure.into());
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.claim.amount = Some(amount);
        self
    }

    pub fn with_risk(mut self, score: f64) -> Self {
        self.claim.risk_score = Some(RiskScore::new(score));
        self
    }

    pub fn with_reasons(mut self, reasons: &[&str]) -> Self {
        self.claim.decision_reason = Some(reasons.join(";"));
        self
    }

    pub fn with_eob(mut self, allowed: Decimal, plan_payable: Decimal) -> Self {
        self.claim.eob = Some(ExplanationOfBenefits {
            allowed_amount: allowed,
            plan_payable,
            member_liability: allowed - plan_payable,
        });
        self
    }

    pub fn build(self) -> Claim {
        self.claim
    }
}

/// Builder for a filled-in claim form with generated claimant details
pub struct ClaimFormBuilder {
    form: ClaimForm,
}

impl Default for ClaimFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimFormBuilder {
    pub fn new() -> Self {
        Self {
            form: ClaimForm {
                full_name: Name().fake(),
                email: SafeEmail().fake(),
                phone: PhoneNumber().fake(),
                description: "Emergency room visit".to_string(),
                amount: "420.00".to_string(),
            },
        }
    }

    pub fn with_full_name(mut self, name: impl Into<String>) -> Self {
        self.form.full_name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.form.email = email.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.form.description = description.into();
        self
    }

    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.form.amount = amount.into();
        self
    }

    pub fn build(self) -> ClaimForm {
        self.form
    }
}
