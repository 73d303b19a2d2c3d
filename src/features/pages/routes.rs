use axum::{routing::get, Router};

use crate::features::pages::handlers::{self, PageState};

/// Public HTML pages
pub fn routes(state: PageState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/a/{name}", get(handlers::article_page))
        .route("/c/{name}", get(handlers::category_page))
        .with_state(state)
}
