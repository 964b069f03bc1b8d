use std::panic::Location;
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use log::debug;
use serde::Deserialize;

use crate::{GeoError, GeoInfo, Result};

/// Looks up location data for an IP address.
///
/// Implementations must be cheap to share across tasks; the analytics
/// builder calls `resolve` once per distinct IP in a snapshot.
#[async_trait]
pub trait GeoResolver: Send + Sync {
    async fn resolve(&self, ip: &str) -> Result<GeoInfo>;

    /// Convenience wrapper that degrades a failed lookup to the
    /// "Unknown" placeholder instead of surfacing the error.
    async fn resolve_or_unknown(&self, ip: &str) -> GeoInfo {
        match self.resolve(ip).await {
            Ok(info) => info,
            Err(error) => {
                debug!("Geo lookup for {ip} degraded to unknown: {error}");
                GeoInfo::unknown(ip)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    country: Option<String>,
    city: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    asn: Option<u32>,
    organization: Option<String>,
}

/// Resolver backed by an HTTP lookup service exposing `GET {base}/{ip}`.
pub struct HttpGeoResolver {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGeoResolver {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    fn url_for(&self, ip: &str) -> String {
        format!("{}/{}", self.base_url, ip)
    }
}

#[async_trait]
impl GeoResolver for HttpGeoResolver {
    async fn resolve(&self, ip: &str) -> Result<GeoInfo> {
        let response = self.client.get(self.url_for(ip)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::Status {
                status: status.as_u16(),
                ip: ip.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let body: GeoResponse = response.json().await?;

        Ok(GeoInfo {
            ip: ip.to_string(),
            country: body.country.unwrap_or_else(|| "Unknown".to_string()),
            city: body.city.unwrap_or_else(|| "\u{2014}".to_string()),
            lat: body.lat,
            lon: body.lon,
            asn: body.asn,
            organization: body.organization,
        })
    }
}

/// Resolver used when no lookup endpoint is configured. Every IP maps
/// to the "Unknown" placeholder.
pub struct DisabledGeoResolver;

#[async_trait]
impl GeoResolver for DisabledGeoResolver {
    async fn resolve(&self, ip: &str) -> Result<GeoInfo> {
        let _ = ip;
        Err(GeoError::Disabled {
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
