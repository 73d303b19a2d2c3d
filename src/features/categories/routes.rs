use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
///
/// Reads are public; mutations require an authenticated user.
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/category",
            get(handlers::get_categories)
                .post(handlers::create_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .with_state(service)
}
