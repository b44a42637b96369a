//! Claim record as returned by the claims service

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, Currency, Money};
use crate::error::ClaimError;

/// Claim status
///
/// Wire values are the display strings (`"Manual Review"` has a space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClaimStatus {
    /// Awaiting automated or insurer assessment
    #[default]
    Processing,
    Approved,
    Rejected,
    /// Automated assessment deferred to a human
    ManualReview,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 4] = [
        ClaimStatus::Processing,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
        ClaimStatus::ManualReview,
    ];

    /// Display and wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Processing => "Processing",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::ManualReview => "Manual Review",
        }
    }

    /// True once an insurer has approved or rejected the claim
    pub fn is_decided(&self) -> bool {
        matches!(self, ClaimStatus::Approved | ClaimStatus::Rejected)
    }

    /// Maps a status string from the service.
    ///
    /// Anything unrecognised shows as `Processing`, the same way the portal's
    /// status pill falls back.
    pub fn from_wire(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            tracing::warn!(status = %raw, "Unrecognised claim status from service, showing as Processing");
            ClaimStatus::Processing
        })
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "processing" => Ok(ClaimStatus::Processing),
            "approved" => Ok(ClaimStatus::Approved),
            "rejected" => Ok(ClaimStatus::Rejected),
            "manual review" => Ok(ClaimStatus::ManualReview),
            _ => Err(ClaimError::UnknownStatus(s.to_string())),
        }
    }
}

impl Serialize for ClaimStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClaimStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| ClaimStatus::from_wire(&s)).unwrap_or_default())
    }
}

/// Fraud-likelihood signal, always within 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RiskScore(u8);

/// Display bucket for a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskScore {
    /// Clamps any reported value into range
    pub fn new(score: f64) -> Self {
        if score.is_nan() {
            return Self(0);
        }
        Self(score.round().clamp(0.0, 100.0) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn band(&self) -> RiskBand {
        match self.0 {
            70..=u8::MAX => RiskBand::High,
            40..=69 => RiskBand::Medium,
            _ => RiskBand::Low,
        }
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

impl<'de> Deserialize<'de> for RiskScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(RiskScore::new)
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskBand::Low => f.write_str("low"),
            RiskBand::Medium => f.write_str("medium"),
            RiskBand::High => f.write_str("high"),
        }
    }
}

/// Explanation of Benefits breakdown
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExplanationOfBenefits {
    #[serde(default)]
    pub allowed_amount: Decimal,
    #[serde(default)]
    pub plan_payable: Decimal,
    #[serde(default)]
    pub member_liability: Decimal,
}

/// A claim as last read from the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    #[serde(default)]
    pub procedure: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub status: ClaimStatus,
    #[serde(default)]
    pub risk_score: Option<RiskScore>,
    /// Semicolon-delimited reasons
    #[serde(default)]
    pub decision_reason: Option<String>,
    #[serde(default)]
    pub ai_prediction: Option<String>,
    #[serde(default)]
    pub nlp_extracted_amount: Option<Decimal>,
    #[serde(default)]
    pub eob: Option<ExplanationOfBenefits>,
}

impl Claim {
    /// Creates a bare claim record, mostly useful for tests and the mock service
    pub fn new(id: ClaimId, status: ClaimStatus) -> Self {
        Self {
            id,
            procedure: None,
            amount: None,
            status,
            risk_score: None,
            decision_reason: None,
            ai_prediction: None,
            nlp_extracted_amount: None,
            eob: None,
        }
    }

    /// Claimed amount in the display currency; a missing amount shows as zero
    pub fn amount_in(&self, currency: Currency) -> Money {
        Money::new(self.amount.unwrap_or_default(), currency)
    }

    /// Procedure text, or a dash when the service has none
    pub fn procedure_label(&self) -> &str {
        match self.procedure.as_deref() {
            Some(p) if !p.trim().is_empty() => p,
            _ => "-",
        }
    }

    /// The automated prediction, falling back to the status
    pub fn prediction(&self) -> &str {
        match self.ai_prediction.as_deref() {
            Some(p) if !p.trim().is_empty() => p,
            _ => self.status.as_str(),
        }
    }

    /// Individual decision reasons, trimmed, with empties dropped
    pub fn reasons(&self) -> Vec<&str> {
        self.decision_reason
            .as_deref()
            .map(|raw| {
                raw.split(';')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
