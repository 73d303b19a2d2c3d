use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};

use crate::core::config::SiteConfig;
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::articles::{routes as articles_routes, ArticleService};
use crate::features::auth::routes as auth_routes;
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::pages::handlers::PageState;
use crate::features::pages::{routes as pages_routes, PageError, PageRenderer, SiteContext};
use crate::modules::persistence::{ArticleStore, CategoryStore, ContentStore};

/// Every service the HTTP layer is wired to
pub struct AppServices {
    pub articles: Arc<ArticleService>,
    pub categories: Arc<CategoryService>,
    pub pages: PageState,
    /// Present only when the reset endpoint is enabled
    pub admin: Option<Arc<AdminService>>,
}

impl AppServices {
    pub fn new(
        article_store: Arc<dyn ArticleStore>,
        category_store: Arc<dyn CategoryStore>,
        content_store: Arc<dyn ContentStore>,
        site: &SiteConfig,
        enable_admin_reset: bool,
    ) -> Result<Self, PageError> {
        let categories = Arc::new(CategoryService::new(Arc::clone(&category_store)));
        let articles = Arc::new(ArticleService::new(article_store, category_store));
        tracing::info!("Article and category services initialized");

        let pages = PageState {
            renderer: Arc::new(PageRenderer::new()?),
            site: Arc::new(SiteContext::from_config(site)),
            articles: Arc::clone(&articles),
            categories: Arc::clone(&categories),
        };
        tracing::info!("Page templates compiled");

        let admin = enable_admin_reset.then(|| {
            tracing::warn!("Admin reset endpoint enabled");
            Arc::new(AdminService::new(content_store))
        });

        Ok(Self {
            articles,
            categories,
            pages,
            admin,
        })
    }
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Application routes without the outer layers (auth, CORS, tracing)
pub fn app_router(services: &AppServices) -> Router {
    let mut router = Router::new()
        .merge(articles_routes::routes(
            Arc::clone(&services.articles),
            Arc::clone(&services.categories),
        ))
        .merge(categories_routes::routes(Arc::clone(&services.categories)))
        .merge(auth_routes::routes())
        .merge(pages_routes::routes(services.pages.clone()))
        .route("/health", get(health_check));

    if let Some(admin) = &services.admin {
        router = router.nest("/api/admin", admin_routes::routes(Arc::clone(admin)));
    }

    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_test_user, with_user_auth, MemoryStore};
    use axum_test::TestServer;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;
    use serde_json::{json, Value};

    struct TestApp {
        services: AppServices,
        anonymous: TestServer,
        editor: TestServer,
    }

    fn test_app(enable_admin_reset: bool) -> TestApp {
        let store = Arc::new(MemoryStore::default());
        let site = SiteConfig {
            title: "PantryCMS".to_string(),
            slogan: "JS-Free Content Management System".to_string(),
        };
        let services =
            AppServices::new(store.clone(), store.clone(), store, &site, enable_admin_reset)
                .unwrap();

        TestApp {
            anonymous: TestServer::new(app_router(&services)).unwrap(),
            editor: TestServer::new(with_user_auth(app_router(&services), create_test_user(5)))
                .unwrap(),
            services,
        }
    }

    fn title() -> String {
        Sentence(2..5).fake()
    }

    impl TestApp {
        fn server_for(&self, user_id: i64) -> TestServer {
            let router = with_user_auth(app_router(&self.services), create_test_user(user_id));
            TestServer::new(router).unwrap()
        }

        async fn category(&self, name: &str, parent: i64) -> Value {
            let response = self
                .editor
                .post("/api/category")
                .json(&json!({"name": name, "long_name": name.to_uppercase(), "parent": parent}))
                .await;
            response.assert_status_ok();
            response.json()
        }

        async fn article(&self, body: Value) -> Value {
            let response = self.editor.post("/api/article").json(&body).await;
            response.assert_status_ok();
            response.json()
        }
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(false);
        app.anonymous.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_anonymous_writes_are_forbidden_without_side_effects() {
        let app = test_app(false);
        let existing = app.category("food", 0).await;

        let response = app
            .anonymous
            .post("/api/category")
            .json(&json!({"name": "animals"}))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        assert!(response.text().is_empty());

        app.anonymous
            .put("/api/category")
            .json(&json!({"id": existing["id"], "name": "meals", "long_name": "", "parent": 0}))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        app.anonymous
            .delete("/api/category")
            .add_query_param("id", &existing["id"])
            .await
            .assert_status(StatusCode::FORBIDDEN);

        app.anonymous
            .post("/api/article")
            .json(&json!({"name": "a", "title": "t", "content": "c"}))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let categories: Value = app.anonymous.get("/api/category").await.json();
        assert_eq!(categories, json!([existing]));
        let articles: Value = app.anonymous.get("/api/article").await.json();
        assert_eq!(articles, json!([]));
    }

    #[tokio::test]
    async fn test_category_lifecycle() {
        let app = test_app(false);
        let food = app.category("food", 0).await;
        assert_eq!(food["ctime"], food["mtime"]);
        assert_eq!(food["long_name"], "FOOD");

        let by_name: Value = app
            .anonymous
            .get("/api/category")
            .add_query_param("name", "food")
            .await
            .json();
        assert_eq!(by_name, food);

        let response = app
            .editor
            .put("/api/category")
            .json(&json!({"id": food["id"], "name": "meals", "long_name": "Meals", "parent": 0}))
            .await;
        response.assert_status_ok();
        let updated: Value = response.json();
        assert_eq!(updated["id"], food["id"]);
        assert_eq!(updated["ctime"], food["ctime"]);
        assert!(updated["mtime"].as_i64().unwrap() > food["mtime"].as_i64().unwrap());
        assert_eq!(updated["name"], "meals");

        app.editor
            .delete("/api/category")
            .add_query_param("id", &food["id"])
            .await
            .assert_status(StatusCode::NO_CONTENT);
        app.editor
            .delete("/api/category")
            .add_query_param("id", &food["id"])
            .await
            .assert_status_not_found();
        app.anonymous
            .get("/api/category")
            .add_query_param("id", &food["id"])
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_duplicate_names_return_bare_400() {
        let app = test_app(false);
        app.category("food", 0).await;
        let animals = app.category("animals", 0).await;

        let response = app
            .editor
            .post("/api/category")
            .json(&json!({"name": "food", "long_name": "Other", "parent": 3}))
            .await;
        response.assert_status_bad_request();
        assert!(response.text().is_empty());

        app.editor
            .put("/api/category")
            .json(&json!({"id": animals["id"], "name": "food", "long_name": "", "parent": 0}))
            .await
            .assert_status_bad_request();

        let unchanged: Value = app
            .anonymous
            .get("/api/category")
            .add_query_param("id", &animals["id"])
            .await
            .json();
        assert_eq!(unchanged, animals);
    }

    #[tokio::test]
    async fn test_update_of_missing_entities_is_404() {
        let app = test_app(false);
        app.editor
            .put("/api/category")
            .json(&json!({"id": 404, "name": "x", "long_name": "", "parent": 0}))
            .await
            .assert_status_not_found();
        app.editor
            .put("/api/article")
            .json(&json!({"id": 404, "name": "x", "title": "t", "content": "c", "category": 0}))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_malformed_json_uses_error_envelope() {
        let app = test_app(false);
        let response = app
            .editor
            .post("/api/category")
            .text("{\"name\": ")
            .content_type("application/json")
            .await;
        response.assert_status_bad_request();

        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_bad_query_uses_error_envelope() {
        let app = test_app(false);
        for path in ["/api/category?id=abc", "/api/article?id=abc"] {
            let response = app.anonymous.get(path).await;
            response.assert_status_bad_request();

            let body: Value = response.json();
            assert_eq!(body["success"], false);
        }

        let response = app.editor.delete("/api/category?id=abc").await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_article_author_and_update_author() {
        let app = test_app(false);
        let created = app
            .article(json!({"name": "a", "title": title(), "content": "body"}))
            .await;
        assert_eq!(created["author"], 5);
        assert_eq!(created["category"], 0);
        assert_eq!(created["visible"], true);
        assert_eq!(created["direct_links_only"], false);

        let new_title = title();
        let kept: Value = app
            .editor
            .put("/api/article")
            .json(&json!({
                "id": created["id"], "name": "a", "title": new_title,
                "content": "edited", "category": 0
            }))
            .await
            .json();
        assert_eq!(kept["author"], 5);
        assert_eq!(kept["title"], new_title.as_str());
        assert_eq!(kept["ctime"], created["ctime"]);
        assert!(kept["mtime"].as_i64().unwrap() > created["mtime"].as_i64().unwrap());

        let taken_over: Value = app
            .server_for(9)
            .put("/api/article")
            .json(&json!({
                "id": created["id"], "name": "a", "title": new_title,
                "content": "edited", "category": 0, "update_author": true
            }))
            .await
            .json();
        assert_eq!(taken_over["author"], 9);
    }

    #[tokio::test]
    async fn test_article_listing_and_descendants() {
        let app = test_app(false);
        let food = app.category("food", 0).await;
        let meat = app.category("meat", food["id"].as_i64().unwrap()).await;
        let a1 = app
            .article(json!({"name": "a1", "title": title(), "content": "c", "category": meat["id"]}))
            .await;
        let hidden = app
            .article(json!({
                "name": "hidden", "title": title(), "content": "c",
                "category": meat["id"], "visible": false
            }))
            .await;
        app.article(json!({
            "name": "direct", "title": title(), "content": "c",
            "category": meat["id"], "direct_links_only": true
        }))
        .await;

        let with: Value = app
            .anonymous
            .get("/api/article")
            .add_query_param("category", &food["id"])
            .add_query_param("descendants", "")
            .await
            .json();
        assert_eq!(with, json!([a1]));

        let without: Value = app
            .anonymous
            .get("/api/article")
            .add_query_param("category", &food["id"])
            .await
            .json();
        assert_eq!(without, json!([]));

        let all: Value = app.anonymous.get("/api/article").await.json();
        assert_eq!(all, json!([a1]));

        let direct: Value = app
            .anonymous
            .get("/api/article")
            .add_query_param("id", &hidden["id"])
            .await
            .json();
        assert_eq!(direct, hidden);

        app.anonymous
            .get("/api/article")
            .add_query_param("category", 999)
            .await
            .assert_status_not_found();
        app.anonymous
            .get("/api/article")
            .add_query_param("name", "nope")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_article_delete() {
        let app = test_app(false);
        let article = app
            .article(json!({"name": "gone", "title": title(), "content": "c"}))
            .await;

        app.editor
            .delete("/api/article")
            .add_query_param("id", &article["id"])
            .await
            .assert_status(StatusCode::NO_CONTENT);
        app.editor
            .delete("/api/article")
            .add_query_param("id", &article["id"])
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_me_requires_user() {
        let app = test_app(false);
        app.anonymous
            .get("/api/auth/me")
            .await
            .assert_status(StatusCode::FORBIDDEN);
        app.editor
            .get("/api/auth/me")
            .await
            .assert_json_contains(&json!({"user_id": 5}));
    }

    #[tokio::test]
    async fn test_admin_reset_is_opt_in() {
        let app = test_app(false);
        app.editor
            .post("/api/admin/reset")
            .await
            .assert_status_not_found();

        let app = test_app(true);
        app.anonymous
            .post("/api/admin/reset")
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let response = app.editor.post("/api/admin/reset").await;
        response.assert_status_ok();
        response.assert_json_contains(&json!({"seeded_categories": 4, "seeded_articles": 13}));
    }

    #[tokio::test]
    async fn test_pages_render_seeded_content() {
        let app = test_app(true);
        app.editor.post("/api/admin/reset").await.assert_status_ok();

        let index = app.anonymous.get("/").await;
        index.assert_status_ok();
        let html = index.text();
        assert!(html.contains("JS-Free Content Management System"));
        assert!(html.contains("article 0 title about Food"));

        let about = app.anonymous.get("/a/about").await;
        about.assert_status_ok();
        assert!(about.text().contains("This is about me"));

        let cats = app.anonymous.get("/c/cats").await.text();
        assert!(cats.contains("article 1 title about Cats"));
        assert!(cats.contains("article 2 title about Big Cats"));
        assert!(!cats.contains("about Food"));

        let missing = app.anonymous.get("/a/missing").await;
        missing.assert_status_not_found();
        assert!(missing.text().contains("Not found"));

        app.anonymous
            .get("/c/missing")
            .await
            .assert_status_not_found();
    }
}
