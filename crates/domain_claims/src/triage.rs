//! Dashboard triage: search, status filtering, and summary figures

use std::str::FromStr;

use core_kernel::{Currency, Money};
use crate::claim::{Claim, ClaimStatus, RiskBand};
use crate::error::ClaimError;

/// Status filter on a dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ClaimStatus),
}

impl FromStr for StatusFilter {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

/// Search query plus status filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimFilter {
    pub query: String,
    pub status: StatusFilter,
}

impl ClaimFilter {
    pub fn new(query: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            query: query.into(),
            status,
        }
    }

    /// True when the filter can hide claims
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || self.status != StatusFilter::All
    }

    /// Matches the query against claim id and procedure, case-insensitively
    pub fn matches(&self, claim: &Claim) -> bool {
        let query = self.query.trim();
        let matches_query = query.is_empty()
            || claim.id.contains_ignore_case(query)
            || claim
                .procedure
                .as_deref()
                .is_some_and(|p| p.to_lowercase().contains(&query.to_lowercase()));

        let matches_status = match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => claim.status == status,
        };

        matches_query && matches_status
    }

    pub fn apply<'a>(&self, claims: &'a [Claim]) -> Vec<&'a Claim> {
        claims.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Headline figures for a list of claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSummary {
    pub total: usize,
    pub processing: usize,
    pub approved: usize,
    pub rejected: usize,
    pub manual_review: usize,
    pub high_risk: usize,
    pub claimed: Money,
}

impl ClaimSummary {
    pub fn from_claims(claims: &[Claim], currency: Currency) -> Self {
        let mut summary = Self {
            total: claims.len(),
            processing: 0,
            approved: 0,
            rejected: 0,
            manual_review: 0,
            high_risk: 0,
            claimed: Money::zero(currency),
        };

        for claim in claims {
            match claim.status {
                ClaimStatus::Processing => summary.processing += 1,
                ClaimStatus::Approved => summary.approved += 1,
                ClaimStatus::Rejected => summary.rejected += 1,
                ClaimStatus::ManualReview => summary.manual_review += 1,
            }
            if claim.risk_score.is_some_and(|r| r.band() == RiskBand::High) {
                summary.high_risk += 1;
            }
            summary.claimed = Money::new(
                summary.claimed.amount() + claim.amount.unwrap_or_default(),
                currency,
            );
        }

        summary
    }

    /// Claims still waiting on someone: processing or in manual review
    pub fn open(&self) -> usize {
        self.processing + self.manual_review
    }
}
