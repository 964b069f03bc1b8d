use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;

use crate::WsError;

/// The three broadcast feeds a client can subscribe to. Each
/// (tenant, topic) pair is an independent registry partition with its
/// own subscriber set and its own aggregate shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Dashboard,
    Threats,
    Analytics,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Dashboard, Topic::Threats, Topic::Analytics];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Dashboard => "dashboard",
            Topic::Threats => "threats",
            Topic::Analytics => "analytics",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = WsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Topic::Dashboard),
            "threats" => Ok(Topic::Threats),
            "analytics" => Ok(Topic::Analytics),
            other => Err(WsError::Internal {
                message: format!("Unknown topic: {}", other),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
