//! Review handlers under `/api/review`.

use crate::dto::{ReviewDto, ReviewLinks};
use crate::error::AppError;
use crate::extractors::{Links, Param, Payload};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.review_service().list().await?))
}

pub async fn read(
    State(state): State<AppState>,
    Param(id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.review_service().get(id).await?))
}

/// GET /api/review/pokemon/:poke_id
pub async fn of_pokemon(
    State(state): State<AppState>,
    Param(poke_id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.review_service().of_pokemon(poke_id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Links(links): Links<ReviewLinks>,
    Payload(body): Payload<ReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    state
        .review_service()
        .create(links.reviewer_id, links.poke_id, body)
        .await?;
    Ok((StatusCode::OK, "Successfully created"))
}

pub async fn update(
    State(state): State<AppState>,
    Param(id): Param<i32>,
    Payload(body): Payload<ReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    state.review_service().update(id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    Param(id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    state.review_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
