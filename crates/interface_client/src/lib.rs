//! Claims Portal Client
//!
//! Everything between the user and the remote claims service.
//!
//! # Architecture
//!
//! - **Service**: the [`service::ClaimsService`] seam with an HTTP adapter
//!   and an in-memory mock, picked by [`service::ServiceFactory`]
//! - **Portal**: [`portal::ClaimsPortal`], the explicit session context
//!   every flow and view is handed
//! - **Flows**: login, claim listing, insurer decisions, and submission,
//!   each returning a typed [`error::FlowError`]
//! - **Views**: per-page state that turns every failure into an inline
//!   notice or a navigation outcome
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_client::{config::ClientConfig, ClaimsPortal};
//!
//! let config = ClientConfig::load()?;
//! let portal = ClaimsPortal::from_config(&config)?;
//! let mut view = LoginView::new("a@b.com", "secret");
//! let outcome = view.submit(&portal).await;
//! ```

pub mod config;
pub mod error;
pub mod dto;
pub mod service;
pub mod portal;
pub mod flows;
pub mod views;
pub mod cli;

pub use config::ClientConfig;
pub use error::{FlowError, ServiceError};
pub use portal::ClaimsPortal;
pub use service::{ClaimsService, ServiceFactory};
