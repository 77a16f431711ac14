//! Staff handlers. Mounted behind the manager role gate.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::hotel::{NewStaff, Staff, StaffRepository, StaffUpdate};
use crate::web::dto::{ApiResponse, Validated};
use crate::web::error::ApiError;

use super::AppState;

/// GET /api/staff - List staff members.
pub async fn list_staff(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Staff>>>, ApiError> {
    let staff = StaffRepository::new(state.db.pool()).list().await?;
    Ok(Json(ApiResponse::new(staff)))
}

/// POST /api/staff - Add a staff member.
pub async fn create_staff(
    State(state): State<AppState>,
    Validated(req): Validated<NewStaff>,
) -> Result<(StatusCode, Json<ApiResponse<Staff>>), ApiError> {
    let staff = StaffRepository::new(state.db.pool()).create(&req).await?;
    tracing::info!(id = staff.id, "Staff member created");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(staff))))
}

/// GET /api/staff/:id - Get a staff member.
pub async fn get_staff(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Staff>>, ApiError> {
    let staff = StaffRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Staff not found"))?;
    Ok(Json(ApiResponse::new(staff)))
}

/// PUT /api/staff/:id - Update a staff member.
pub async fn update_staff(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Validated(req): Validated<StaffUpdate>,
) -> Result<Json<ApiResponse<Staff>>, ApiError> {
    let staff = StaffRepository::new(state.db.pool())
        .update(id, &req)
        .await?
        .ok_or_else(|| ApiError::not_found("Staff not found"))?;
    Ok(Json(ApiResponse::new(staff)))
}

/// DELETE /api/staff/:id - Remove a staff member.
pub async fn delete_staff(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !StaffRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Staff not found"));
    }
    tracing::info!(id, "Staff member deleted");
    Ok(StatusCode::NO_CONTENT)
}
