//! Request and response bodies of the claims service

pub mod auth;
pub mod claims;

pub use auth::{LoginRequest, LoginResponse};
pub use claims::SubmitResponse;
