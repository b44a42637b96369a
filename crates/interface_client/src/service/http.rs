//! HTTP claims service
//!
//! Talks to the claims API over JSON, except submission which is multipart.
//! Path segments are percent-encoded; non-2xx answers become
//! [`ServiceError::Unauthorized`] or [`ServiceError::Rejected`].

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimSubmission, DecisionRequest, SubmissionReceipt};

use super::ClaimsService;
use crate::dto::{LoginRequest, LoginResponse, SubmitResponse};
use crate::error::ServiceError;

/// reqwest-backed claims service
#[derive(Debug, Clone)]
pub struct HttpClaimsService {
    http: reqwest::Client,
    base: Url,
}

impl HttpClaimsService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let base = Url::parse(base_url.trim()).map_err(|e| {
            ServiceError::Configuration(format!("Invalid API base URL '{}': {}", base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(ServiceError::Configuration(format!(
                "API base URL '{}' cannot carry a path",
                base_url
            )));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Base URL with `segments` appended, each percent-encoded
    fn url(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::Configuration("API base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ServiceError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let err = ServiceError::from_status(status.as_u16(), status.canonical_reason(), &body);
        tracing::debug!(status = status.as_u16(), error = %err, "Claims service rejected request");
        Err(err)
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl ClaimsService for HttpClaimsService {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ServiceError> {
        let url = self.url(&["api", "login"])?;
        let response = Self::send(self.http.post(url).json(request)).await?;
        Self::read(response).await
    }

    async fn list_claims(&self, token: Option<&str>) -> Result<Vec<Claim>, ServiceError> {
        let url = self.url(&["api", "claims"])?;
        let response = Self::send(Self::authorized(self.http.get(url), token)).await?;
        let claims: Vec<Claim> = Self::read(response).await?;
        tracing::debug!(count = claims.len(), "Fetched claims");
        Ok(claims)
    }

    async fn get_claim(&self, token: Option<&str>, id: &ClaimId) -> Result<Claim, ServiceError> {
        let url = self.url(&["api", "claims", id.as_str()])?;
        let response = Self::send(Self::authorized(self.http.get(url), token)).await?;
        Self::read(response).await
    }

    async fn submit_claim(
        &self,
        token: Option<&str>,
        submission: &ClaimSubmission,
    ) -> Result<SubmissionReceipt, ServiceError> {
        let url = self.url(&["api", "submit"])?;
        let form = &submission.form;
        let document = &submission.document;

        let file = Part::bytes(document.content().to_vec())
            .file_name(document.file_name().to_string())
            .mime_str(document.mime_type())?;
        let multipart = Form::new()
            .text("fullName", form.full_name.clone())
            .text("email", form.email.clone())
            .text("phone", form.phone.clone())
            .text("description", form.description.clone())
            .text("amount", form.amount.clone())
            .part("file", file);

        let response =
            Self::send(Self::authorized(self.http.post(url).multipart(multipart), token)).await?;
        let body: SubmitResponse = Self::read(response).await?;
        tracing::debug!(claim_id = %body.claim_id, "Intake endpoint accepted claim");
        Ok(body.into_receipt())
    }

    async fn decide_claim(
        &self,
        token: Option<&str>,
        id: &ClaimId,
        request: &DecisionRequest,
    ) -> Result<(), ServiceError> {
        let url = self.url(&["api", "claims", id.as_str(), "decision"])?;
        Self::send(Self::authorized(self.http.post(url).json(request), token)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(base: &str) -> HttpClaimsService {
        HttpClaimsService::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_url_appends_segments() {
        let url = service("http://localhost:5001").url(&["api", "claims"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5001/api/claims");
    }

    #[test]
    fn test_url_keeps_base_path() {
        let url = service("https://example.com/portal/").url(&["api", "login"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/portal/api/login");
    }

    #[test]
    fn test_url_encodes_claim_id() {
        let url = service("http://localhost:5001")
            .url(&["api", "claims", "C 1/2?x", "decision"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5001/api/claims/C%201%2F2%3Fx/decision"
        );
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(matches!(
            HttpClaimsService::new("mailto:claims@example.com", Duration::from_secs(5)),
            Err(ServiceError::Configuration(_))
        ));
    }
}
