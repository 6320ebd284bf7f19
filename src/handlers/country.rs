//! Country handlers under `/api/country`.

use crate::dto::CountryDto;
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
    Ok(Json(state.country_service().list().await?))
}

pub async fn read(
    State(state): State<AppState>,
    Param(id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.country_service().get(id).await?))
}

/// GET /api/country/owners/:owner_id returns the country an owner lives in.
pub async fn of_owner(
    State(state): State<AppState>,
    Param(owner_id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.country_service().of_owner(owner_id).await?))
}

/// GET /api/country/:id/owners
pub async fn owners(
    State(state): State<AppState>,
    Param(id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.country_service().owners(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(body): Payload<CountryDto>,
) -> Result<impl IntoResponse, AppError> {
    state.country_service().create(body).await?;
    Ok((StatusCode::OK, "Successfully created"))
}

pub async fn update(
    State(state): State<AppState>,
    Param(id): Param<i32>,
    Payload(body): Payload<CountryDto>,
) -> Result<impl IntoResponse, AppError> {
    state.country_service().update(id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    Param(id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    state.country_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
