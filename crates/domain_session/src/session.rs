//! Session store
//!
//! Holds the signed-in user and keeps durable storage in step with it. Every
//! mutation is written as one storage batch first; memory only changes once
//! that batch has landed, so a reload always reconstructs what was last
//! reported as signed in.

use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use core_kernel::{KeyValueStore, StorageOp};

use crate::error::SessionError;
use crate::gate::Route;
use crate::role::Role;
use crate::token;

/// Token recorded when the service authenticates without issuing one
pub const SENTINEL_TOKEN: &str = "session";

/// Durable storage keys
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const ROLE: &str = "role";
    pub const EMAIL: &str = "email";
    pub const RETURN_TO: &str = "return_to";

    pub const SESSION: [&str; 3] = [TOKEN, ROLE, EMAIL];
    pub const ALL: [&str; 4] = [TOKEN, ROLE, EMAIL, RETURN_TO];
}

/// A signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub email: Option<String>,
    /// Expiry read from the token, when it carries one
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(role: Role, token: impl Into<String>, email: Option<String>) -> Self {
        let token = token.into();
        let token = if token.trim().is_empty() {
            SENTINEL_TOKEN.to_string()
        } else {
            token
        };
        let email = email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        let expires_at = token::token_expiry(&token);

        Self {
            token,
            role,
            email,
            expires_at,
        }
    }

    /// True when the token carries an expiry at or before `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

/// Explicit session context shared by the portal's views
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Creates a signed-out store without reading storage
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            current: RwLock::new(None),
        }
    }

    /// Rebuilds the session persisted by a previous run
    ///
    /// Stale keys (no token, unknown role, expired token) are cleared and
    /// the store starts signed out.
    pub fn restore(storage: Arc<dyn KeyValueStore>) -> Result<Self, SessionError> {
        let store = Self::new(storage);

        let token = store.storage.get(keys::TOKEN)?;
        let role = store.storage.get(keys::ROLE)?;
        let email = store.storage.get(keys::EMAIL)?;

        let session = match (token, role) {
            (None, None) => None,
            (Some(token), Some(role)) => match role.parse::<Role>() {
                Ok(role) => {
                    let session = Session::new(role, token, email);
                    if session.is_expired_at(Utc::now()) {
                        tracing::info!(role = %session.role, "Stored token has expired, signing out");
                        None
                    } else {
                        Some(session)
                    }
                }
                Err(_) => {
                    tracing::warn!(role = %role, "Stored role is not recognised, signing out");
                    None
                }
            },
            _ => {
                tracing::warn!("Stored session is incomplete, signing out");
                None
            }
        };

        match session {
            Some(session) => {
                tracing::debug!(role = %session.role, "Restored session");
                *store.write() = Some(session);
            }
            None => store.clear_keys(&keys::SESSION)?,
        }

        Ok(store)
    }

    /// Records a successful authentication
    ///
    /// Role, token and email are written in one batch. A blank token is
    /// stored as [`SENTINEL_TOKEN`].
    pub fn login(
        &self,
        role: Role,
        token: impl Into<String>,
        email: Option<String>,
    ) -> Result<Session, SessionError> {
        let session = Session::new(role, token, email);

        let mut ops = vec![
            StorageOp::set(keys::TOKEN, session.token.as_str()),
            StorageOp::set(keys::ROLE, role.as_str()),
        ];
        ops.push(match &session.email {
            Some(email) => StorageOp::set(keys::EMAIL, email.as_str()),
            None => StorageOp::delete(keys::EMAIL),
        });
        self.storage.apply(&ops)?;

        *self.write() = Some(session.clone());
        tracing::info!(role = %role, "Signed in");
        Ok(session)
    }

    /// Signs out, clearing every persisted key
    ///
    /// Memory is cleared even when storage fails; the storage error is still
    /// returned so the caller can report it.
    pub fn logout(&self) -> Result<(), SessionError> {
        *self.write() = None;
        self.clear_keys(&keys::ALL)?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Destroys the session after the service refused its token
    pub fn invalidate(&self, reason: &str) -> Result<(), SessionError> {
        tracing::warn!(reason = %reason, "Session invalidated");
        self.logout()
    }

    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.read().as_ref().map(|s| s.role)
    }

    /// Remembers where a login redirect came from
    pub fn remember_destination(&self, route: &Route) -> Result<(), SessionError> {
        self.storage.set(keys::RETURN_TO, &route.path())?;
        Ok(())
    }

    /// Reads and forgets the remembered destination
    pub fn take_destination(&self) -> Result<Option<Route>, SessionError> {
        let stored = self.storage.get(keys::RETURN_TO)?;
        if stored.is_some() {
            self.storage.delete(keys::RETURN_TO)?;
        }
        Ok(stored.map(|path| Route::parse(&path)))
    }

    fn clear_keys(&self, keys: &[&str]) -> Result<(), SessionError> {
        let ops: Vec<StorageOp> = keys.iter().map(|k| StorageOp::delete(*k)).collect();
        self.storage.apply(&ops)?;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("role", &self.role())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
