//! Service handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::hotel::{NewService, Service, ServiceRepository, ServiceUpdate};
use crate::web::dto::{ApiResponse, Validated};
use crate::web::error::ApiError;

use super::AppState;

/// GET /api/services - List services.
pub async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Service>>>, ApiError> {
    let services = ServiceRepository::new(state.db.pool()).list().await?;
    Ok(Json(ApiResponse::new(services)))
}

/// POST /api/services - Create a service.
pub async fn create_service(
    State(state): State<AppState>,
    Validated(req): Validated<NewService>,
) -> Result<(StatusCode, Json<ApiResponse<Service>>), ApiError> {
    let service = ServiceRepository::new(state.db.pool()).create(&req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(service))))
}

/// GET /api/services/:id - Get a service.
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Service>>, ApiError> {
    let service = ServiceRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Service not found"))?;
    Ok(Json(ApiResponse::new(service)))
}

/// PUT /api/services/:id - Update a service.
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Validated(req): Validated<ServiceUpdate>,
) -> Result<Json<ApiResponse<Service>>, ApiError> {
    let service = ServiceRepository::new(state.db.pool())
        .update(id, &req)
        .await?
        .ok_or_else(|| ApiError::not_found("Service not found"))?;
    Ok(Json(ApiResponse::new(service)))
}

/// DELETE /api/services/:id - Delete a service.
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !ServiceRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Service not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
