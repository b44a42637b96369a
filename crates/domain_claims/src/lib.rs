//! Claims Domain
//!
//! Client-side view of claims owned by the remote claims service.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Processing -> Approved | Rejected | Manual Review
//!                               Manual Review -> (another decision)
//! ```
//!
//! The service is the only authority on status. Nothing in this crate moves a
//! claim from one status to another; decisions are requests, and the next
//! fetched record says what actually happened.

pub mod claim;
pub mod adjudication;
pub mod triage;
pub mod submission;
pub mod error;

pub use claim::{Claim, ClaimStatus, ExplanationOfBenefits, RiskBand, RiskScore};
pub use adjudication::{Decision, DecisionRequest};
pub use triage::{ClaimFilter, ClaimSummary, StatusFilter};
pub use submission::{ClaimForm, ClaimSubmission, SubmissionReceipt, SupportingDocument};
pub use error::ClaimError;
