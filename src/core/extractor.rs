use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// JSON body extractor whose rejections go through [`AppError`]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(rejection_to_error)
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        // Well-formed JSON with missing or mistyped fields
        JsonRejection::JsonDataError(err) => {
            AppError::Validation(format!("Invalid JSON data: {}", err.body_text()))
        }
        JsonRejection::JsonSyntaxError(err) => {
            AppError::BadRequest(format!("Invalid JSON syntax: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            AppError::BadRequest("Expected Content-Type: application/json".to_string())
        }
        other => AppError::BadRequest(format!("Failed to read JSON body: {}", other.body_text())),
    }
}

/// Query string extractor with the same error body as [`AppJson`]
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection: QueryRejection| {
                AppError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
            })
    }
}
