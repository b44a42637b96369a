//! Session errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors raised by the session store
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Session storage failed: {0}")]
    Storage(#[from] PortError),
}
