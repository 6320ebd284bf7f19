//! Category handlers under `/api/category`.

use crate::dto::CategoryDto;
use crate::error::AppError;
use crate::extractors::{Param, Payload};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.category_service().list().await?))
}

pub async fn read(
    State(state): State<AppState>,
    Param(id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.category_service().get(id).await?))
}

/// GET /api/category/pokemon/:category_id
pub async fn pokemon(
    State(state): State<AppState>,
    Param(category_id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.category_service().pokemon(category_id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(body): Payload<CategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    state.category_service().create(body).await?;
    Ok((StatusCode::OK, "Successfully created"))
}

pub async fn update(
    State(state): State<AppState>,
    Param(id): Param<i32>,
    Payload(body): Payload<CategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    state.category_service().update(id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    Param(id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    state.category_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
