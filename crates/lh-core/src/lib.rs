pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use models::log_record::LogRecord;
pub use models::risk_tier::{HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD, RiskTier};
pub use models::threat_status::ThreatStatus;

#[cfg(test)]
mod tests;
