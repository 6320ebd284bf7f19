//! Pokémon handlers under `/api/pokemon`.

use crate::dto::{PokemonDto, PokemonLinks};
use crate::error::AppError;
use crate::extractors::{Links, Param, Payload};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/pokemon",
    responses((status = 200, description = "All Pokémon", body = [PokemonDto]))
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.pokemon_service().list().await?))
}

#[utoipa::path(
    get,
    path = "/api/pokemon/{id}",
    params(("id" = i32, Path, description = "Pokémon id")),
    responses(
        (status = 200, description = "The Pokémon", body = PokemonDto),
        (status = 404, description = "Unknown id")
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Param(id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.pokemon_service().get(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/pokemon/{id}/rating",
    params(("id" = i32, Path, description = "Pokémon id")),
    responses(
        (status = 200, description = "Mean review rating, 0 without reviews", body = f64),
        (status = 404, description = "Unknown id")
    )
)]
pub async fn rating(
    State(state): State<AppState>,
    Param(id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.pokemon_service().rating(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/pokemon",
    params(PokemonLinks),
    request_body = PokemonDto,
    responses(
        (status = 200, description = "Successfully created"),
        (status = 400, description = "Missing or malformed body"),
        (status = 422, description = "A Pokémon with that name already exists"),
        (status = 500, description = "Saving failed")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Links(links): Links<PokemonLinks>,
    Payload(body): Payload<PokemonDto>,
) -> Result<impl IntoResponse, AppError> {
    state
        .pokemon_service()
        .create(links.owner_id, links.cat_id, body)
        .await?;
    Ok((StatusCode::OK, "Successfully created"))
}

#[utoipa::path(
    put,
    path = "/api/pokemon/{id}",
    params(("id" = i32, Path, description = "Pokémon id"), PokemonLinks),
    request_body = PokemonDto,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Missing body or id mismatch"),
        (status = 404, description = "Unknown id"),
        (status = 500, description = "Saving failed")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Param(id): Param<i32>,
    Links(links): Links<PokemonLinks>,
    Payload(body): Payload<PokemonDto>,
) -> Result<impl IntoResponse, AppError> {
    state
        .pokemon_service()
        .update(id, links.owner_id, links.cat_id, body)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/pokemon/{id}",
    params(("id" = i32, Path, description = "Pokémon id")),
    responses(
        (status = 204, description = "Deleted, including its reviews"),
        (status = 404, description = "Unknown id")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Param(id): Param<i32>,
) -> Result<impl IntoResponse, AppError> {
    let errors = state.pokemon_service().delete(id).await?;
    if !errors.is_empty() {
        tracing::warn!(id, errors = ?errors, "pokemon delete finished with errors");
    }
    Ok(StatusCode::NO_CONTENT)
}
