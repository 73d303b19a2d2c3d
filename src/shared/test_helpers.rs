#[cfg(test)]
pub use self::memory::MemoryStore;

#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn create_test_user(user_id: i64) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id,
        sub: format!("test-sub-{}", user_id),
        roles: vec!["editor".to_string()],
    }
}

/// Wrap `router` so every request arrives as `user`, the way the bearer auth
/// middleware would attach it.
#[cfg(test)]
pub fn with_user_auth(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                let response: Response = next.run(request).await;
                response
            }
        },
    ))
}
