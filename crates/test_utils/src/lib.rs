//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims portal test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built claims, tokens, accounts and documents
//! - `builders`: Builder patterns for claims and claim forms
//! - `fake_service`: An HTTP claims service on a local port
//! - `assertions`: Custom assertion helpers for session and claim state
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod fake_service;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use fake_service::*;
pub use assertions::*;
pub use generators::*;
