//! Authorization guards for handlers.
//!
//! Authentication itself happens in `core::middleware::auth_middleware`,
//! which attaches an [`AuthenticatedUser`] to requests carrying a valid
//! bearer token. Guards only check for its presence.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for mutating endpoints: anonymous requests get 403.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireUser(user): RequireUser) { ... }
/// ```
pub struct RequireUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireUser)
            .ok_or_else(|| AppError::Forbidden("Authentication required".to_string()))
    }
}
