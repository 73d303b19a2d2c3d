use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::articles::dtos::{
    ArticleQueryParams, ArticleResponseDto, CreateArticleDto, UpdateArticleDto,
};
use crate::features::articles::models::Article;
use crate::features::articles::services::ArticleService;
use crate::features::auth::guards::RequireUser;
use crate::features::categories::services::CategoryService;
use crate::shared::types::IdQuery;

/// Services the article handlers need
#[derive(Clone)]
pub struct ArticleState {
    pub articles: Arc<ArticleService>,
    pub categories: Arc<CategoryService>,
}

fn to_dtos(articles: Vec<Article>) -> Vec<ArticleResponseDto> {
    articles.into_iter().map(ArticleResponseDto::from).collect()
}

/// Read articles.
///
/// `id` or `name` returns that single article regardless of visibility.
/// `category` lists the listed articles of that category (plus descendants
/// with `descendants`). Without parameters every listed article is returned.
#[utoipa::path(
    get,
    path = "/api/article",
    params(ArticleQueryParams),
    responses(
        (status = 200, description = "A single article for `id`/`name` lookups, otherwise a list", body = Vec<ArticleResponseDto>),
        (status = 404, description = "No article with that id or name, or unknown category")
    ),
    tag = "articles"
)]
pub async fn get_articles(
    State(state): State<ArticleState>,
    AppQuery(params): AppQuery<ArticleQueryParams>,
) -> Result<Response> {
    let lookup = match (params.id, params.name.as_deref()) {
        (Some(id), _) => Some(state.articles.get_by_id(id).await?),
        (None, Some(name)) => Some(state.articles.get_by_name(name).await?),
        (None, None) => None,
    };
    if let Some(found) = lookup {
        let article = found.ok_or_else(|| AppError::NotFound("Article not found".to_string()))?;
        return Ok(Json(ArticleResponseDto::from(article)).into_response());
    }

    let articles = match params.category {
        Some(category_id) => {
            let category = state
                .categories
                .get_by_id(category_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Category with id {} not found", category_id))
                })?;
            state
                .articles
                .get_by_category(&category, params.include_descendants())
                .await?
        }
        None => state.articles.get_all().await?,
    };

    Ok(Json(to_dtos(articles)).into_response())
}

/// Create an article authored by the requesting user
#[utoipa::path(
    post,
    path = "/api/article",
    request_body = CreateArticleDto,
    responses(
        (status = 200, description = "Article created", body = ArticleResponseDto),
        (status = 400, description = "Name already taken or invalid payload"),
        (status = 403, description = "Not authenticated")
    ),
    tag = "articles",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_article(
    RequireUser(user): RequireUser,
    State(state): State<ArticleState>,
    AppJson(dto): AppJson<CreateArticleDto>,
) -> Result<Json<ArticleResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let article = state.articles.create(dto.into_fields(user.user_id)).await?;
    Ok(Json(article.into()))
}

/// Replace every field of an existing article
#[utoipa::path(
    put,
    path = "/api/article",
    request_body = UpdateArticleDto,
    responses(
        (status = 200, description = "Article updated", body = ArticleResponseDto),
        (status = 400, description = "Name already taken or invalid payload"),
        (status = 403, description = "Not authenticated"),
        (status = 404, description = "Article not found")
    ),
    tag = "articles",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_article(
    RequireUser(user): RequireUser,
    State(state): State<ArticleState>,
    AppJson(dto): AppJson<UpdateArticleDto>,
) -> Result<Json<ArticleResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let article = state
        .articles
        .get_by_id(dto.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Article with id {} not found", dto.id)))?;

    let article = state
        .articles
        .update(&article, dto.into_update(user.user_id))
        .await?;
    Ok(Json(article.into()))
}

/// Delete an article
#[utoipa::path(
    delete,
    path = "/api/article",
    params(IdQuery),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 403, description = "Not authenticated"),
        (status = 404, description = "Article not found")
    ),
    tag = "articles",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_article(
    RequireUser(_user): RequireUser,
    State(state): State<ArticleState>,
    AppQuery(query): AppQuery<IdQuery>,
) -> Result<StatusCode> {
    if !state.articles.delete(query.id).await? {
        return Err(AppError::NotFound(format!(
            "Article with id {} not found",
            query.id
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
