use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Numeric user id, recorded as an article's author
    pub user_id: i64,
    pub sub: String,
    pub roles: Vec<String>,
}

/// CMS-specific claims carried under the configured namespace claim
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomClaims {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub roles: Vec<String>,
}
