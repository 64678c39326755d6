use axum::{
    async_trait,
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, StatusCode},
    response::IntoResponse,
    Json,
};
use common::types::{Card, CardInput};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{errors::ApiError, state::ServerState};

pub const BASE_PATH: &str = "/api/cards";

/// Card id taken from the path. Anything that is not a UUID does not match the
/// route and gets a bare 404, distinct from the domain "Card not found".
#[derive(Debug, Clone, Copy)]
pub struct CardId(pub Uuid);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CardId {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<Uuid>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(CardId(id)),
            Err(rejection) => {
                debug!(path = %parts.uri.path(), %rejection, "card id rejected");
                Err(StatusCode::NOT_FOUND)
            }
        }
    }
}

pub fn location(id: Uuid) -> String { format!("{}/{}", BASE_PATH, id) }

#[utoipa::path(
    get, path = "/api/cards", tag = "cards",
    responses((status = 200, description = "All cards", body = [crate::openapi::CardDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Card>>, ApiError> {
    let cards = state.cards.list().await?;
    info!(count = cards.len(), "list cards");
    Ok(Json(cards.into_iter().map(Card::from).collect()))
}

#[utoipa::path(
    get, path = "/api/cards/{id}", tag = "cards",
    params(("id" = Uuid, Path, description = "Card ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CardDoc),
        (status = 404, description = "Card not found")
    )
)]
pub async fn get(State(state): State<ServerState>, CardId(id): CardId) -> Result<Json<Card>, ApiError> {
    let card = state.cards.get(id).await?;
    Ok(Json(card.into()))
}

#[utoipa::path(
    post, path = "/api/cards", tag = "cards",
    request_body = crate::openapi::CardInputDoc,
    responses((status = 201, description = "Created", body = crate::openapi::CardDoc))
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<CardInput>) -> Result<impl IntoResponse, ApiError> {
    let card = state.cards.create(&input).await?;
    let loc = location(card.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, loc)], Json(Card::from(card))))
}

#[utoipa::path(
    put, path = "/api/cards/{id}", tag = "cards",
    params(("id" = Uuid, Path, description = "Card ID")),
    request_body = crate::openapi::CardInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CardDoc),
        (status = 404, description = "Card not found")
    )
)]
pub async fn update(State(state): State<ServerState>, CardId(id): CardId, Json(input): Json<CardInput>) -> Result<Json<Card>, ApiError> {
    let card = state.cards.update(id, &input).await?;
    Ok(Json(card.into()))
}

#[utoipa::path(
    delete, path = "/api/cards/{id}", tag = "cards",
    params(("id" = Uuid, Path, description = "Card ID")),
    responses(
        (status = 200, description = "Deleted; body is the record as it was", body = crate::openapi::CardDoc),
        (status = 404, description = "Card not found")
    )
)]
pub async fn delete(State(state): State<ServerState>, CardId(id): CardId) -> Result<Json<Card>, ApiError> {
    let card = state.cards.delete(id).await?;
    Ok(Json(card.into()))
}
