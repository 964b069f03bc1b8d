use serde::{Deserialize, Serialize};

/// Location and network ownership of a single IP address.
/// Serialized verbatim into the analytics envelope's `geo` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoInfo {
    pub ip: String,
    pub country: String,
    pub city: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub asn: Option<u32>,
    pub organization: Option<String>,
}

impl GeoInfo {
    /// Placeholder entry for an IP whose lookup failed or is disabled.
    pub fn unknown(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            country: "Unknown".to_string(),
            city: "\u{2014}".to_string(),
            lat: None,
            lon: None,
            asn: None,
            organization: None,
        }
    }
}
