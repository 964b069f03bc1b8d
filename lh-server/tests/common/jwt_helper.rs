#![allow(dead_code)]

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

/// JWT claims matching production format (from lh-auth)
#[derive(Debug, Serialize, Deserialize)]
pub struct TestJwtClaims {
    pub sub: String,
    pub tenant_id: String,
    pub exp: u64,
    pub iat: u64,
}

/// Create a valid JWT token for testing
pub fn create_test_token(tenant_id: &str, user_id: &str, jwt_secret: &[u8]) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs();

    let claims = TestJwtClaims {
        sub: user_id.to_string(),
        tenant_id: tenant_id.to_string(),
        exp: now + 3600,
        iat: now,
    };

    encode(
        &Header::default(), // HS256 by default
        &claims,
        &EncodingKey::from_secret(jwt_secret),
    )
    .expect("Failed to encode JWT")
}
