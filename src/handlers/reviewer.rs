//! Reviewer handlers under `/api/reviewer`.

use crate::dto::ReviewerDto;
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
    Ok(Json(state.reviewer_service().list().await?))
}

pub async fn read(
    State(state): State<AppState>,
    Param(id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.reviewer_service().get(id).await?))
}

/// GET /api/reviewer/:id/reviews
pub async fn reviews(
    State(state): State<AppState>,
    Param(id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.reviewer_service().reviews(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(body): Payload<ReviewerDto>,
) -> Result<impl IntoResponse, AppError> {
    state.reviewer_service().create(body).await?;
    Ok((StatusCode::OK, "Successfully created"))
}

pub async fn update(
    State(state): State<AppState>,
    Param(id): Param<i32>,
    Payload(body): Payload<ReviewerDto>,
) -> Result<impl IntoResponse, AppError> {
    state.reviewer_service().update(id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    Param(id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    state.reviewer_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
