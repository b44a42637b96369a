//! Per-page view state
//!
//! Every async operation on a view returns an [`Outcome`] and never an
//! error. Failures land in the view's inline [`Notice`]; authorization
//! problems become navigation. Operations take `&mut self`, so a view
//! always shows the last response it awaited.

pub mod login;
pub mod dashboard;
pub mod claim;
pub mod submit;

use std::fmt;

use domain_session::Route;

use crate::error::FlowError;

pub use login::LoginView;
pub use dashboard::DashboardView;
pub use claim::ClaimView;
pub use submit::SubmitClaimView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Inline message shown on a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// What the view asks of its host after an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Stay,
    Navigate(Route),
}

/// Turns a flow failure into the view's notice or a navigation
pub(crate) fn absorb(notice: &mut Option<Notice>, err: FlowError) -> Outcome {
    match err.redirect() {
        Some(route) => {
            if matches!(err, FlowError::SessionExpired) {
                *notice = Some(Notice::error(err.to_string()));
            }
            Outcome::Navigate(route)
        }
        None => {
            tracing::debug!(error = %err, "Showing inline error");
            *notice = Some(Notice::error(err.to_string()));
            Outcome::Stay
        }
    }
}
