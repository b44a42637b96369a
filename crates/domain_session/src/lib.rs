//! Session Domain
//!
//! Who is signed in, with which role, and which views that role may reach.
//!
//! # Session Lifecycle
//!
//! ```text
//!            login                      logout / 401 / expired token
//! (none) ──────────▶ Authenticated ─────────────────────────────▶ (none)
//! ```
//!
//! The role held here only decides which views render. The claims service
//! authorizes every request on its own.

pub mod role;
pub mod session;
pub mod gate;
pub mod token;
pub mod error;

pub use role::Role;
pub use session::{Session, SessionStore, SENTINEL_TOKEN};
pub use gate::{can_access, gate, login_destination, GateDecision, Route};
pub use error::SessionError;
