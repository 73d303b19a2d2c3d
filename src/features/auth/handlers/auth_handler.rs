use crate::core::error::Result;
use crate::features::auth::guards::RequireUser;
use crate::features::auth::model::AuthenticatedUser;
use axum::Json;

/// Return the user the bearer token resolves to
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = AuthenticatedUser),
        (status = 401, description = "Invalid token"),
        (status = 403, description = "Not authenticated")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(RequireUser(user): RequireUser) -> Result<Json<AuthenticatedUser>> {
    Ok(Json(user))
}
