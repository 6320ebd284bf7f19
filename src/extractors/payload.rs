//! JSON body, query-string and path extractors.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

/// JSON request body. A `null` body, malformed JSON or a missing
/// `Content-Type: application/json` are all rejected as 400.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Option<T>>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        body.map(Payload)
            .ok_or_else(|| AppError::BadRequest("request body must not be null".into()))
    }
}

/// Query-string ids that link an entity to others (`?ownerId=1&catId=2`).
#[derive(Debug, Clone, Copy)]
pub struct Links<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for Links<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(links) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Links(links))
    }
}

/// Path segments such as the `:id` in `/api/pokemon/:id`.
#[derive(Debug, Clone, Copy)]
pub struct Param<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for Param<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Param(value))
    }
}
