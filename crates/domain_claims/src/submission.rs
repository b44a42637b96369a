//! Policyholder claim submission
//!
//! Local checks here are advisory. They catch obvious mistakes before an
//! upload is attempted; the intake endpoint still validates everything.

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ClaimId, Currency, Money};
use crate::claim::RiskScore;
use crate::error::ClaimError;

/// File extensions the intake endpoint accepts
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["pdf", "png", "jpg", "jpeg"];

/// Field order used when reporting validation failures
const FIELD_ORDER: [&str; 2] = ["full_name", "email"];

/// Claimant details as typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ClaimForm {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Enter a valid email address")
    )]
    pub email: String,
    pub phone: String,
    /// Procedure or description of the treatment
    pub description: String,
    pub amount: String,
}

impl ClaimForm {
    /// Copy of the form with surrounding whitespace removed from every field
    pub fn normalized(&self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            description: self.description.trim().to_string(),
            amount: self.amount.trim().to_string(),
        }
    }

    /// Checks required fields, email shape, and the amount when one is given
    pub fn check(&self) -> Result<(), ClaimError> {
        let form = self.normalized();

        if let Err(errors) = form.validate() {
            let field_errors = errors.field_errors();
            for field in FIELD_ORDER {
                if let Some(first) = field_errors.get(field).and_then(|errs| errs.first()) {
                    let message = first
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    return Err(ClaimError::Validation(message));
                }
            }
            return Err(ClaimError::Validation(errors.to_string()));
        }

        if !form.amount.is_empty() {
            Money::parse(&form.amount, Currency::USD)
                .map_err(|_| ClaimError::InvalidAmount(form.amount.clone()))?;
        }

        Ok(())
    }
}

/// The supporting document attached to a claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportingDocument {
    file_name: String,
    content: Vec<u8>,
}

impl SupportingDocument {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Lower-cased extension, if the name has one
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    pub fn is_accepted(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
    }

    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("pdf") => "application/pdf",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            _ => "application/octet-stream",
        }
    }
}

/// A form and document that passed local checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSubmission {
    pub form: ClaimForm,
    pub document: SupportingDocument,
}

impl ClaimSubmission {
    /// Runs every local check; nothing leaves the machine unless this succeeds
    pub fn prepare(
        form: &ClaimForm,
        document: Option<&SupportingDocument>,
    ) -> Result<Self, ClaimError> {
        form.check()?;

        let document = document.ok_or(ClaimError::MissingDocument)?;
        if !document.is_accepted() {
            let shown = document
                .extension()
                .map(|ext| format!(".{}", ext))
                .unwrap_or_else(|| document.file_name().to_string());
            return Err(ClaimError::UnsupportedDocument(shown));
        }

        Ok(Self {
            form: form.normalized(),
            document: document.clone(),
        })
    }
}

/// What the intake endpoint reports for a new claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub claim_id: ClaimId,
    pub prediction: String,
    pub risk_score: Option<RiskScore>,
    pub reason: Option<String>,
}
