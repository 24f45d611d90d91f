use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity of the caller, taken from the validated token's `sub` claim.
///
/// Every diary and visited-country operation is scoped to `sub`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub sub: String,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}
