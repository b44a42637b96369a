//! Dashboard view for both roles

use domain_claims::{Claim, ClaimFilter, ClaimSummary, StatusFilter};
use domain_session::Role;

use super::{absorb, Notice, Outcome};
use crate::flows;
use crate::portal::ClaimsPortal;

pub const EMPTY_LIST: &str = "No claims yet. Submit one to get started.";
pub const NO_MATCHES: &str = "No matching claims.";

#[derive(Debug, Clone)]
pub struct DashboardView {
    pub role: Role,
    pub claims: Vec<Claim>,
    pub filter: ClaimFilter,
    pub notice: Option<Notice>,
    loaded: bool,
}

impl DashboardView {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            claims: Vec::new(),
            filter: ClaimFilter::default(),
            notice: None,
            loaded: false,
        }
    }

    /// Fetches the claim list; on failure the previous list stays visible
    pub async fn load(&mut self, portal: &ClaimsPortal) -> Outcome {
        match flows::fetch_claims(portal, self.role).await {
            Ok(claims) => {
                self.claims = claims;
                self.notice = None;
                self.loaded = true;
                Outcome::Stay
            }
            Err(err) => absorb(&mut self.notice, err),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    /// Claims passing the current filter
    pub fn visible(&self) -> Vec<&Claim> {
        self.filter.apply(&self.claims)
    }

    /// Text shown in place of the table, if any
    pub fn empty_state(&self) -> Option<&'static str> {
        if !self.loaded {
            return None;
        }
        if self.claims.is_empty() {
            Some(EMPTY_LIST)
        } else if self.visible().is_empty() {
            Some(NO_MATCHES)
        } else {
            None
        }
    }

    pub fn summary(&self, portal: &ClaimsPortal) -> ClaimSummary {
        ClaimSummary::from_claims(&self.claims, portal.currency())
    }
}
