use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

const MIN_SECRET_BYTES: usize = 32;

/// Admission credentials. Exactly one of `jwt_secret` (HS256) or
/// `jwt_public_key_path` (RS256, PEM) must be configured.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub jwt_public_key_path: Option<String>,
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match (&self.jwt_secret, &self.jwt_public_key_path) {
            (None, None) => Err(ConfigError::auth(
                "either auth.jwt_secret or auth.jwt_public_key_path must be set",
            )),
            (Some(_), Some(_)) => Err(ConfigError::auth(
                "auth.jwt_secret and auth.jwt_public_key_path are mutually exclusive",
            )),
            (Some(secret), None) => {
                if secret.len() < MIN_SECRET_BYTES {
                    return Err(ConfigError::auth(format!(
                        "auth.jwt_secret must be at least {} bytes, got {}",
                        MIN_SECRET_BYTES,
                        secret.len()
                    )));
                }
                Ok(())
            }
            (None, Some(path)) => {
                if path.is_empty() {
                    return Err(ConfigError::auth("auth.jwt_public_key_path cannot be empty"));
                }
                Ok(())
            }
        }
    }
}
