pub mod log_record;
pub mod risk_tier;
pub mod threat_status;
