//! Transfer handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::hotel::{NewTransfer, Transfer, TransferRepository, TransferUpdate};
use crate::web::dto::{ApiResponse, Validated};
use crate::web::error::ApiError;

use super::AppState;

/// GET /api/transfers - List transfers.
pub async fn list_transfers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Transfer>>>, ApiError> {
    let transfers = TransferRepository::new(state.db.pool()).list().await?;
    Ok(Json(ApiResponse::new(transfers)))
}

/// POST /api/transfers - Schedule a transfer.
pub async fn create_transfer(
    State(state): State<AppState>,
    Validated(req): Validated<NewTransfer>,
) -> Result<(StatusCode, Json<ApiResponse<Transfer>>), ApiError> {
    let transfer = TransferRepository::new(state.db.pool()).create(&req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(transfer))))
}

/// GET /api/transfers/:id - Get a transfer.
pub async fn get_transfer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Transfer>>, ApiError> {
    let transfer = TransferRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Transfer not found"))?;
    Ok(Json(ApiResponse::new(transfer)))
}

/// PUT /api/transfers/:id - Update a transfer.
pub async fn update_transfer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Validated(req): Validated<TransferUpdate>,
) -> Result<Json<ApiResponse<Transfer>>, ApiError> {
    let transfer = TransferRepository::new(state.db.pool())
        .update(id, &req)
        .await?
        .ok_or_else(|| ApiError::not_found("Transfer not found"))?;
    Ok(Json(ApiResponse::new(transfer)))
}

/// DELETE /api/transfers/:id - Cancel a transfer.
pub async fn delete_transfer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !TransferRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Transfer not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
