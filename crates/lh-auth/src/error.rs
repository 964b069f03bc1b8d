use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing credential token {location}")]
    MissingToken { location: ErrorLocation },

    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Unknown principal: {user_id} {location}")]
    UnknownPrincipal {
        user_id: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Short reason carried in the policy-violation close frame.
    /// Deliberately vague: refusals must not leak which check failed
    /// beyond what the client already knows.
    pub fn close_reason(&self) -> &'static str {
        match self {
            Self::MissingToken { .. } => "missing token",
            Self::TokenExpired { .. } => "token expired",
            _ => "invalid token",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
