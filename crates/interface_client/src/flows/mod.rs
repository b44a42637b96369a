//! Session-aware operations behind the views
//!
//! Each flow checks the session locally, calls the service, and reports a
//! typed [`crate::error::FlowError`]. None of them change claim status on
//! their own; whatever the service returns is what the caller gets.

pub mod login;
pub mod claims;
pub mod decision;
pub mod submission;

pub use login::{sign_in, sign_out};
pub use claims::{fetch_claim, fetch_claims};
pub use decision::decide;
pub use submission::submit;
