use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::admin::dtos::ResetSummaryDto;
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireUser;

/// Delete all articles and categories, then seed the demo content
#[utoipa::path(
    post,
    path = "/api/admin/reset",
    responses(
        (status = 200, description = "Content reset", body = ResetSummaryDto),
        (status = 403, description = "Not authenticated")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn reset_content(
    RequireUser(user): RequireUser,
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ResetSummaryDto>> {
    tracing::warn!(user_id = user.user_id, "Content reset requested");
    let summary = service.reset(user.user_id).await?;
    Ok(Json(summary))
}
