//! Portal context
//!
//! [`ClaimsPortal`] bundles the session store, the claims service and the
//! display currency. Views receive it explicitly; nothing here is global.

use std::sync::Arc;

use core_kernel::{Currency, KeyValueStore};
use domain_session::{gate, login_destination, GateDecision, Role, Route, Session, SessionStore};
use infra_storage::FileStore;

use crate::config::ClientConfig;
use crate::error::{FlowError, ServiceError};
use crate::service::{ClaimsService, ServiceFactory};

/// Errors building a portal from configuration
#[derive(Debug, thiserror::Error)]
pub enum PortalSetupError {
    #[error("No session path configured and no user config directory found")]
    NoSessionPath,

    #[error(transparent)]
    Storage(#[from] infra_storage::StorageError),

    #[error(transparent)]
    Session(#[from] domain_session::SessionError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Currency(#[from] core_kernel::MoneyError),
}

pub struct ClaimsPortal {
    session: SessionStore,
    service: Arc<dyn ClaimsService>,
    currency: Currency,
}

impl ClaimsPortal {
    pub fn new(session: SessionStore, service: Arc<dyn ClaimsService>, currency: Currency) -> Self {
        Self {
            session,
            service,
            currency,
        }
    }

    /// Builds the portal the binary runs with: file-backed session, service
    /// picked by provider, session restored from the last run.
    /// An unreadable session file is replaced and the user starts signed out.
    pub fn from_config(config: &ClientConfig) -> Result<Self, PortalSetupError> {
        let path = config
            .resolved_session_path()
            .ok_or(PortalSetupError::NoSessionPath)?;
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open_or_reset(path)?);
        let session = SessionStore::restore(storage)?;
        let service = ServiceFactory::create(config)?;
        Ok(Self::new(session, service, config.currency()?))
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn service(&self) -> &dyn ClaimsService {
        self.service.as_ref()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Gates `route`, remembering it when the user must log in first
    pub fn navigate(&self, route: &Route) -> GateDecision {
        let current = self.session.current();
        let decision = gate(current.as_ref(), route);

        if let GateDecision::RedirectToLogin { from } = &decision {
            if let Err(e) = self.session.remember_destination(from) {
                tracing::warn!(error = %e, route = %from, "Could not remember login destination");
            }
        }
        decision
    }

    /// Where to go after a successful login; consumes the remembered route
    pub fn login_destination(&self) -> Route {
        let remembered = self.session.take_destination().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not read login destination");
            None
        });

        match self.session.role() {
            Some(role) => login_destination(role, remembered.as_ref()),
            None => Route::Login,
        }
    }

    /// The current session when it may view `route`
    pub fn require(&self, route: &Route) -> Result<Session, FlowError> {
        match self.navigate(route) {
            GateDecision::Render => self
                .session
                .current()
                .ok_or_else(|| FlowError::NotAuthenticated { from: route.clone() }),
            GateDecision::RedirectToLogin { from } => Err(FlowError::NotAuthenticated { from }),
            GateDecision::Redirect(home) => Err(FlowError::WrongRole { home }),
        }
    }

    /// Like [`ClaimsPortal::require`] for the role's own views
    pub fn require_role(&self, role: Role, route: &Route) -> Result<Session, FlowError> {
        let session = self.require(route)?;
        if session.role != role {
            return Err(FlowError::WrongRole {
                home: session.role.home(),
            });
        }
        Ok(session)
    }

    /// Maps a service result, destroying the session on a 401
    pub(crate) fn authorized<T>(&self, result: Result<T, ServiceError>) -> Result<T, FlowError> {
        match result {
            Err(ServiceError::Unauthorized { message }) => {
                if let Err(e) = self.session.invalidate(&message) {
                    tracing::warn!(error = %e, "Could not clear invalidated session");
                }
                Err(FlowError::SessionExpired)
            }
            other => other.map_err(FlowError::from),
        }
    }
}

impl std::fmt::Debug for ClaimsPortal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimsPortal")
            .field("session", &self.session)
            .field("currency", &self.currency)
            .finish()
    }
}
