//! Login view

use super::{absorb, Notice, Outcome};
use crate::flows;
use crate::portal::ClaimsPortal;

#[derive(Debug, Clone, Default)]
pub struct LoginView {
    pub email: String,
    pub password: String,
    pub notice: Option<Notice>,
}

impl LoginView {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            notice: None,
        }
    }

    /// Signs in and navigates to the remembered destination or the role home
    ///
    /// The email is kept on failure; the password is always cleared.
    pub async fn submit(&mut self, portal: &ClaimsPortal) -> Outcome {
        self.notice = None;
        let result = flows::sign_in(portal, &self.email, &self.password).await;
        self.password.clear();

        match result {
            Ok(_) => Outcome::Navigate(portal.login_destination()),
            Err(err) => absorb(&mut self.notice, err),
        }
    }
}
