//! Room handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::hotel::{NewRoom, Room, RoomRepository, RoomUpdate};
use crate::web::dto::{ApiResponse, Validated};
use crate::web::error::ApiError;

use super::AppState;

/// GET /api/rooms - List rooms.
pub async fn list_rooms(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Room>>>, ApiError> {
    let rooms = RoomRepository::new(state.db.pool()).list().await?;
    Ok(Json(ApiResponse::new(rooms)))
}

/// POST /api/rooms - Create a room.
pub async fn create_room(
    State(state): State<AppState>,
    Validated(req): Validated<NewRoom>,
) -> Result<(StatusCode, Json<ApiResponse<Room>>), ApiError> {
    let room = RoomRepository::new(state.db.pool()).create(&req).await?;
    tracing::info!(id = room.id, number = %room.room_number, "Room created");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(room))))
}

/// GET /api/rooms/:id - Get a room.
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Room>>, ApiError> {
    let room = RoomRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Room not found"))?;
    Ok(Json(ApiResponse::new(room)))
}

/// PUT /api/rooms/:id - Update a room.
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Validated(req): Validated<RoomUpdate>,
) -> Result<Json<ApiResponse<Room>>, ApiError> {
    let room = RoomRepository::new(state.db.pool())
        .update(id, &req)
        .await?
        .ok_or_else(|| ApiError::not_found("Room not found"))?;
    Ok(Json(ApiResponse::new(room)))
}

/// DELETE /api/rooms/:id - Delete a room.
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !RoomRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Room not found"));
    }
    tracing::info!(id, "Room deleted");
    Ok(StatusCode::NO_CONTENT)
}
