//! User roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SessionError;
use crate::gate::Route;

/// Role returned by the service at login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Policyholder,
    Insurer,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Policyholder, Role::Insurer];

    /// Stored and wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Policyholder => "policyholder",
            Role::Insurer => "insurer",
        }
    }

    /// Landing view for the role
    pub fn home(&self) -> Route {
        match self {
            Role::Policyholder => Route::UserDashboard,
            Role::Insurer => Route::InsurerDashboard,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "policyholder" => Ok(Role::Policyholder),
            "insurer" => Ok(Role::Insurer),
            _ => Err(SessionError::UnknownRole(s.to_string())),
        }
    }
}
