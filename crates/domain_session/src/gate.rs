//! Route table and the view gate
//!
//! [`gate`] is a pure function of the current session and the requested
//! route. A role mismatch is never an error; it quietly sends the user to
//! their own home view.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use core_kernel::ClaimId;

use crate::role::Role;
use crate::session::Session;

const POLICYHOLDER_ONLY: &[Role] = &[Role::Policyholder];
const INSURER_ONLY: &[Role] = &[Role::Insurer];

/// A view the portal can show
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Plans,
    Claims,
    Login,
    Register,
    UserDashboard,
    SubmitClaim,
    UserClaim(ClaimId),
    InsurerDashboard,
    InsurerClaim(ClaimId),
    /// Any path outside the route table
    NotFound(String),
}

impl Route {
    /// Parses a path, ignoring any query string, fragment or trailing slash
    pub fn parse(path: &str) -> Route {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["plans"] => Route::Plans,
            ["claims"] => Route::Claims,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["user", "dashboard"] => Route::UserDashboard,
            ["user", "submit"] => Route::SubmitClaim,
            ["user", "claim", id] => Route::UserClaim(ClaimId::new(*id)),
            ["insurer", "dashboard"] => Route::InsurerDashboard,
            ["insurer", "claim", id] => Route::InsurerClaim(ClaimId::new(*id)),
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Plans => "/plans".to_string(),
            Route::Claims => "/claims".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::UserDashboard => "/user/dashboard".to_string(),
            Route::SubmitClaim => "/user/submit".to_string(),
            Route::UserClaim(id) => format!("/user/claim/{}", id),
            Route::InsurerDashboard => "/insurer/dashboard".to_string(),
            Route::InsurerClaim(id) => format!("/insurer/claim/{}", id),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Roles allowed to see the route; `None` means anyone may
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Route::Home
            | Route::Plans
            | Route::Claims
            | Route::Login
            | Route::Register
            | Route::NotFound(_) => None,
            Route::UserDashboard | Route::SubmitClaim | Route::UserClaim(_) => {
                Some(POLICYHOLDER_ONLY)
            }
            Route::InsurerDashboard | Route::InsurerClaim(_) => Some(INSURER_ONLY),
        }
    }

    pub fn is_public(&self) -> bool {
        self.allowed_roles().is_none()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Route::parse(s))
    }
}

/// Outcome of gating a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Render,
    /// Not signed in; `from` is where to return after login
    RedirectToLogin { from: Route },
    /// Signed in with the wrong role
    Redirect(Route),
}

/// True when a session exists and its role is in `allowed_roles`
pub fn can_access(session: Option<&Session>, allowed_roles: &[Role]) -> bool {
    session.is_some_and(|s| allowed_roles.contains(&s.role))
}

/// Decides whether `route` renders for the current session
pub fn gate(session: Option<&Session>, route: &Route) -> GateDecision {
    let Some(allowed) = route.allowed_roles() else {
        return GateDecision::Render;
    };

    match session {
        None => GateDecision::RedirectToLogin { from: route.clone() },
        Some(s) if can_access(Some(s), allowed) => GateDecision::Render,
        Some(s) => {
            tracing::debug!(
                route = %route,
                role = %s.role,
                "Role cannot view route, redirecting home"
            );
            GateDecision::Redirect(s.role.home())
        }
    }
}

/// Where a freshly signed-in user lands
///
/// The preserved destination wins only when the role may see it; a public
/// destination such as `/login` itself is not worth returning to.
pub fn login_destination(role: Role, from: Option<&Route>) -> Route {
    match from {
        Some(route) if route.allowed_roles().is_some_and(|roles| roles.contains(&role)) => {
            route.clone()
        }
        _ => role.home(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_query_and_trailing_slash() {
        assert_eq!(Route::parse("/insurer/dashboard/?tab=open"), Route::InsurerDashboard);
        assert_eq!(Route::parse(""), Route::Home);
    }

    #[test]
    fn test_parse_claim_routes() {
        assert_eq!(
            Route::parse("/user/claim/C-17"),
            Route::UserClaim(ClaimId::new("C-17"))
        );
        assert_eq!(Route::parse("/insurer/claim/C-17").path(), "/insurer/claim/C-17");
    }

    #[test]
    fn test_unknown_path_is_public() {
        let route = Route::parse("/admin");
        assert_eq!(route, Route::NotFound("/admin".to_string()));
        assert!(route.is_public());
    }
}
