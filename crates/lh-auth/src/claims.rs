use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

const MAX_TENANT_ID_LEN: usize = 128;

/// JWT claims carried by every connection credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,
    /// Tenant identifier
    pub tenant_id: String,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    pub iat: i64,
}

impl Claims {
    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.tenant_id.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "tenant_id".to_string(),
                message: "tenant_id cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.tenant_id.len() > MAX_TENANT_ID_LEN {
            return Err(AuthError::InvalidClaim {
                claim: "tenant_id".to_string(),
                message: "tenant_id exceeds maximum length".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub (user id) cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
