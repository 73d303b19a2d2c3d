use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::articles::handlers::{self, ArticleState};
use crate::features::articles::services::ArticleService;
use crate::features::categories::services::CategoryService;

/// Create routes for the articles feature
///
/// Reads are public; mutations require an authenticated user.
pub fn routes(articles: Arc<ArticleService>, categories: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/article",
            get(handlers::get_articles)
                .post(handlers::create_article)
                .put(handlers::update_article)
                .delete(handlers::delete_article),
        )
        .with_state(ArticleState {
            articles,
            categories,
        })
}
