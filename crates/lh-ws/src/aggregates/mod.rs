pub mod analytics;
pub mod dashboard;
pub mod ip_extract;
pub mod threats;
