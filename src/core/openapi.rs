use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::articles::{dtos as articles_dtos, handlers as articles_handlers};
use crate::features::auth;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::shared::types::{ErrorResponse, RecordMeta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::get_me,
        // Articles (reads public, writes authenticated)
        articles_handlers::get_articles,
        articles_handlers::create_article,
        articles_handlers::update_article,
        articles_handlers::delete_article,
        // Categories (reads public, writes authenticated)
        categories_handlers::get_categories,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Admin
        admin_handlers::reset_content,
    ),
    components(
        schemas(
            // Shared
            RecordMeta,
            ErrorResponse,
            // Auth
            auth::model::AuthenticatedUser,
            // Articles
            articles_dtos::ArticleResponseDto,
            articles_dtos::CreateArticleDto,
            articles_dtos::UpdateArticleDto,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            // Admin
            admin_dtos::ResetSummaryDto,
        )
    ),
    tags(
        (name = "auth", description = "Current user"),
        (name = "articles", description = "Article management"),
        (name = "categories", description = "Category management"),
        (name = "admin", description = "Content reset, enabled by ENABLE_ADMIN_RESET"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Pantry CMS API",
        version = "0.1.0",
        description = "Articles and categories API",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_cms_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/article",
            "/api/category",
            "/api/auth/me",
            "/api/admin/reset",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn test_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "Docs".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("Docs"));
    }
}
