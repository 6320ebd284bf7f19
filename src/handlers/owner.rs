//! Owner handlers under `/api/owner`.

use crate::dto::{OwnerDto, OwnerLinks};
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
    Ok(Json(state.owner_service().list().await?))
}

pub async fn read(
    State(state): State<AppState>,
    Param(id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.owner_service().get(id).await?))
}

/// GET /api/owner/:id/pokemon
pub async fn pokemon(
    State(state): State<AppState>,
    Param(id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.owner_service().pokemon(id).await?))
}

/// GET /api/owner/pokemon/:poke_id: owners of one Pokémon.
pub async fn of_pokemon(
    State(state): State<AppState>,
    Param(poke_id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.owner_service().of_pokemon(poke_id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Links(links): Links<OwnerLinks>,
    Payload(body): Payload<OwnerDto>,
) -> Result<impl IntoResponse, AppError> {
    state.owner_service().create(links.country_id, body).await?;
    Ok((StatusCode::OK, "Successfully created"))
}

pub async fn update(
    State(state): State<AppState>,
    Param(id): Param<i32>,
    Payload(body): Payload<OwnerDto>,
) -> Result<impl IntoResponse, AppError> {
    state.owner_service().update(id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    Param(id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    state.owner_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
