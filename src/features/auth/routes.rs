use crate::features::auth::handlers;
use axum::{routing::get, Router};

pub fn routes() -> Router {
    Router::new().route("/api/auth/me", get(handlers::get_me))
}
