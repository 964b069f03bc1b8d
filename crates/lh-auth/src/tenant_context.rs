use crate::Claims;

/// Validated, trusted identity of an admitted connection.
/// Only constructed after JWT verification and principal resolution.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub tenant_id: String,
    pub user_id: String,
}

impl TenantContext {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            tenant_id: claims.tenant_id,
            user_id: claims.sub,
        }
    }
}
