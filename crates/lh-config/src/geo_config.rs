use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_GEO_TIMEOUT_SECS: u64 = 1;
pub const MAX_GEO_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_GEO_TIMEOUT_SECS: u64 = 3;

/// Geolocation lookup service settings. No endpoint means geolocation is
/// disabled and analytics entries degrade to unknown values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeoConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: DEFAULT_GEO_TIMEOUT_SECS,
        }
    }
}

impl GeoConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if let Some(ref endpoint) = self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::geo(format!(
                    "geo.endpoint must be an http(s) URL, got {}",
                    endpoint
                )));
            }
        }

        if self.timeout_secs < MIN_GEO_TIMEOUT_SECS || self.timeout_secs > MAX_GEO_TIMEOUT_SECS {
            return Err(ConfigError::geo(format!(
                "geo.timeout_secs must be {}-{}, got {}",
                MIN_GEO_TIMEOUT_SECS, MAX_GEO_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        Ok(())
    }
}
