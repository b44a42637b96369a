//! Claims service seam
//!
//! Supports:
//! - the HTTP claims API (`http`)
//! - an in-memory service seeded with demo data (`mock`)

pub mod http;
pub mod mock;

use std::sync::Arc;

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimSubmission, DecisionRequest, SubmissionReceipt};

use crate::config::ClientConfig;
use crate::dto::{LoginRequest, LoginResponse};
use crate::error::ServiceError;

pub use http::HttpClaimsService;
pub use mock::{MockClaimsService, RecordedCall};

/// Operations the remote claims service offers
///
/// `token` is sent as a bearer credential whenever it is present.
#[async_trait::async_trait]
pub trait ClaimsService: Send + Sync {
    /// Exchanges credentials for a role and token
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ServiceError>;

    async fn list_claims(&self, token: Option<&str>) -> Result<Vec<Claim>, ServiceError>;

    async fn get_claim(&self, token: Option<&str>, id: &ClaimId) -> Result<Claim, ServiceError>;

    /// Uploads a claim and its supporting document
    async fn submit_claim(
        &self,
        token: Option<&str>,
        submission: &ClaimSubmission,
    ) -> Result<SubmissionReceipt, ServiceError>;

    /// Requests a decision; whatever the service answers with is discarded
    async fn decide_claim(
        &self,
        token: Option<&str>,
        id: &ClaimId,
        request: &DecisionRequest,
    ) -> Result<(), ServiceError>;
}

/// Factory for creating ClaimsService implementations
pub struct ServiceFactory;

impl ServiceFactory {
    /// Creates the adapter named by `config.provider`
    pub fn create(config: &ClientConfig) -> Result<Arc<dyn ClaimsService>, ServiceError> {
        match config.provider.trim().to_lowercase().as_str() {
            "http" => {
                tracing::info!(api_base = %config.api_base, "Creating HTTP claims service");
                let service = HttpClaimsService::new(&config.api_base, config.request_timeout())?;
                Ok(Arc::new(service))
            }
            "mock" => {
                tracing::info!("Creating mock claims service");
                Ok(Arc::new(MockClaimsService::with_demo_data()))
            }
            provider => Err(ServiceError::Configuration(format!(
                "Unknown claims provider: {}. Supported providers: http, mock",
                provider
            ))),
        }
    }
}
