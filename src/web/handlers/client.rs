//! Client handlers.
//!
//! Reads return clients with their room, services and transfers populated;
//! writes return the stored record with plain ids.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::hotel::{Client, ClientDetails, ClientRepository, ClientUpdate, NewClient};
use crate::web::dto::{ApiResponse, Validated};
use crate::web::error::ApiError;

use super::AppState;

/// GET /api/clients - List clients, populated.
pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ClientDetails>>>, ApiError> {
    let clients = ClientRepository::new(state.db.pool()).list_details().await?;
    Ok(Json(ApiResponse::new(clients)))
}

/// POST /api/clients - Register a client.
pub async fn create_client(
    State(state): State<AppState>,
    Validated(req): Validated<NewClient>,
) -> Result<(StatusCode, Json<ApiResponse<Client>>), ApiError> {
    let client = ClientRepository::new(state.db.pool()).create(&req).await?;
    tracing::info!(id = client.id, "Client created");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(client))))
}

/// GET /api/clients/:id - Get a client, populated.
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ClientDetails>>, ApiError> {
    let client = ClientRepository::new(state.db.pool())
        .get_details(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Client not found"))?;
    Ok(Json(ApiResponse::new(client)))
}

/// PUT /api/clients/:id - Update a client.
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Validated(req): Validated<ClientUpdate>,
) -> Result<Json<ApiResponse<Client>>, ApiError> {
    let client = ClientRepository::new(state.db.pool())
        .update(id, &req)
        .await?
        .ok_or_else(|| ApiError::not_found("Client not found"))?;
    Ok(Json(ApiResponse::new(client)))
}

/// DELETE /api/clients/:id - Delete a client.
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !ClientRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Client not found"));
    }
    tracing::info!(id, "Client deleted");
    Ok(StatusCode::NO_CONTENT)
}
