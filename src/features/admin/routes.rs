use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create admin routes, nested under `/api/admin`
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/reset", post(handlers::reset_content))
        .with_state(admin_service)
}
