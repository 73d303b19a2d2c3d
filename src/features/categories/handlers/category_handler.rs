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
use crate::features::auth::guards::RequireUser;
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{IdQuery, LookupQuery};

/// Get one category by `id` or `name`, or list all categories
#[utoipa::path(
    get,
    path = "/api/category",
    params(LookupQuery),
    responses(
        (status = 200, description = "A single category when `id` or `name` is given, otherwise every category", body = Vec<CategoryResponseDto>),
        (status = 404, description = "No category with that id or name")
    ),
    tag = "categories"
)]
pub async fn get_categories(
    State(service): State<Arc<CategoryService>>,
    AppQuery(query): AppQuery<LookupQuery>,
) -> Result<Response> {
    if query.is_lookup() {
        let category = match (query.id, query.name.as_deref()) {
            (Some(id), _) => service.get_by_id(id).await?,
            (None, Some(name)) => service.get_by_name(name).await?,
            (None, None) => None,
        }
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        return Ok(Json(CategoryResponseDto::from(category)).into_response());
    }

    let categories: Vec<CategoryResponseDto> = service
        .get_all()
        .await?
        .into_iter()
        .map(CategoryResponseDto::from)
        .collect();
    Ok(Json(categories).into_response())
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/category",
    request_body = CreateCategoryDto,
    responses(
        (status = 200, description = "Category created", body = CategoryResponseDto),
        (status = 400, description = "Name already taken or invalid payload"),
        (status = 403, description = "Not authenticated")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    RequireUser(_user): RequireUser,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<Json<CategoryResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(dto.into()).await?;
    Ok(Json(category.into()))
}

/// Replace every field of an existing category
#[utoipa::path(
    put,
    path = "/api/category",
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponseDto),
        (status = 400, description = "Name already taken or invalid payload"),
        (status = 403, description = "Not authenticated"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_category(
    RequireUser(_user): RequireUser,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<CategoryResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service
        .get_by_id(dto.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", dto.id)))?;

    let category = service.update(&category, dto.into()).await?;
    Ok(Json(category.into()))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/api/category",
    params(IdQuery),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 403, description = "Not authenticated"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_category(
    RequireUser(_user): RequireUser,
    State(service): State<Arc<CategoryService>>,
    AppQuery(query): AppQuery<IdQuery>,
) -> Result<StatusCode> {
    if !service.delete(query.id).await? {
        return Err(AppError::NotFound(format!(
            "Category with id {} not found",
            query.id
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
