use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Geo lookup request failed: {source} {location}")]
    Http {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("Geo lookup returned status {status} for {ip} {location}")]
    Status {
        status: u16,
        ip: String,
        location: ErrorLocation,
    },

    #[error("Geo lookup disabled {location}")]
    Disabled { location: ErrorLocation },
}

impl From<reqwest::Error> for GeoError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::Http {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;
