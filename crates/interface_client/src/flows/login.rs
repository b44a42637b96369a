//! Login and logout

use domain_session::{Role, Session};

use crate::dto::LoginRequest;
use crate::error::{FlowError, ServiceError};
use crate::portal::ClaimsPortal;

/// Authenticates and records the session
///
/// A response without a role is treated as a policyholder; a role outside
/// the known set fails the login.
pub async fn sign_in(
    portal: &ClaimsPortal,
    email: &str,
    password: &str,
) -> Result<Session, FlowError> {
    let request = LoginRequest::new(email, password);
    if request.email.is_empty() || password.is_empty() {
        return Err(FlowError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let response = portal
        .service()
        .login(&request)
        .await
        .map_err(|err| match err {
            ServiceError::Unauthorized { message } => FlowError::Authentication(message),
            other => FlowError::Service(other),
        })?;

    let role = match response.role.as_deref().map(str::trim) {
        None | Some("") => Role::Policyholder,
        Some(raw) => raw.parse::<Role>().map_err(|_| {
            tracing::warn!(role = %raw, "Login returned an unsupported role");
            FlowError::Authentication(format!("Unsupported account role '{}'", raw))
        })?,
    };

    let session = portal.session().login(
        role,
        response.access_token.unwrap_or_default(),
        Some(request.email),
    )?;
    Ok(session)
}

/// Ends the session locally
pub fn sign_out(portal: &ClaimsPortal) -> Result<(), FlowError> {
    portal.session().logout()?;
    Ok(())
}
