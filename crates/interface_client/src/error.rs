//! Client error handling
//!
//! [`ServiceError`] describes what went wrong talking to the claims service.
//! [`FlowError`] is what a flow reports to a view: transport, authentication,
//! authorization, validation, or a business rejection from the service.

use serde_json::Value;
use thiserror::Error;

use domain_claims::ClaimError;
use domain_session::{Route, SessionError};

/// Errors from a claims service adapter
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Could not reach the claims service: {0}")]
    Transport(String),

    /// The service refused the credentials or token (HTTP 401)
    #[error("{message}")]
    Unauthorized { message: String },

    /// Any other non-2xx response
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from the claims service: {0}")]
    Decode(String),

    #[error("Claims service configuration error: {0}")]
    Configuration(String),
}

impl ServiceError {
    /// Builds the error for a non-2xx response
    pub fn from_status(status: u16, reason: Option<&str>, body: &[u8]) -> Self {
        let message = error_message(status, reason, body);
        if status == 401 {
            ServiceError::Unauthorized { message }
        } else {
            ServiceError::Rejected { status, message }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ServiceError::Unauthorized { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Unauthorized { .. } => Some(401),
            ServiceError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else if err.is_builder() {
            ServiceError::Configuration(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}

/// User-facing message for a failed response
///
/// Prefers the body's `message`, then `error` (a string, or an object with
/// its own `message`), then a generic line built from the status.
pub fn error_message(status: u16, reason: Option<&str>, body: &[u8]) -> String {
    let from_body = serde_json::from_slice::<Value>(body).ok().and_then(|value| {
        non_empty(value.get("message")).or_else(|| match value.get("error") {
            Some(Value::Object(inner)) => non_empty(inner.get("message")),
            other => non_empty(other),
        })
    });

    from_body.unwrap_or_else(|| match reason {
        Some(reason) if !reason.is_empty() => {
            format!("Request failed with status {} {}", status, reason)
        }
        _ => format!("Request failed with status {}", status),
    })
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Errors a flow hands back to its view
#[derive(Debug, Error)]
pub enum FlowError {
    /// No session; the view should send the user to log in
    #[error("Please log in to continue")]
    NotAuthenticated { from: Route },

    /// Signed in with a role that cannot use this view
    #[error("This page is not available for your account")]
    WrongRole { home: Route },

    /// Local checks failed before anything was sent
    #[error("{0}")]
    Validation(String),

    /// The service rejected the credentials
    #[error("{0}")]
    Authentication(String),

    /// The service stopped accepting the session's token
    #[error("Your session has expired. Please log in again.")]
    SessionExpired,

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Could not save your session: {0}")]
    Session(#[from] SessionError),
}

impl From<ClaimError> for FlowError {
    fn from(err: ClaimError) -> Self {
        FlowError::Validation(err.to_string())
    }
}

impl FlowError {
    /// Where the user should be sent instead of seeing a message
    pub fn redirect(&self) -> Option<Route> {
        match self {
            FlowError::NotAuthenticated { .. } | FlowError::SessionExpired => Some(Route::Login),
            FlowError::WrongRole { home } => Some(home.clone()),
            _ => None,
        }
    }
}
