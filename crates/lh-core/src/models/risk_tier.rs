use serde::{Deserialize, Serialize};

/// Three-tier risk classification by probability score.
///
/// Probability is on a 0-100 scale everywhere in this system:
/// below 30 is low, 30 through 69 is medium, 70 and above is high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

/// Lower bound of the medium tier.
pub const MEDIUM_RISK_THRESHOLD: f64 = 30.0;
/// Lower bound of the high tier. Also the dashboard's high-risk cutoff.
pub const HIGH_RISK_THRESHOLD: f64 = 70.0;

impl RiskTier {
    pub fn classify(probability: f64) -> Self {
        if probability < MEDIUM_RISK_THRESHOLD {
            Self::Low
        } else if probability < HIGH_RISK_THRESHOLD {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}
