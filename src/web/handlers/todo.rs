//! Todo list handlers.
//!
//! Writes answer with a redirect back to the list.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};

use crate::todo::{Todo, TodoRepository};
use crate::web::dto::{ApiResponse, TodoRequest, Validated};
use crate::web::error::ApiError;
use crate::web::middleware::CurrentSession;

use super::AppState;

/// GET / - List todos, newest first.
pub async fn list_todos(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Todo>>>, ApiError> {
    let todos = TodoRepository::new(state.db.pool()).list().await?;
    Ok(Json(ApiResponse::new(todos)))
}

/// POST / - Add a todo.
pub async fn create_todo(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Validated(req): Validated<TodoRequest>,
) -> Result<Redirect, ApiError> {
    let todo = TodoRepository::new(state.db.pool())
        .create(&req.todo)
        .await?;
    tracing::debug!(id = todo.id, username = %session.username, "Todo created");
    Ok(Redirect::to("/"))
}

/// PUT /:id - Replace a todo's text.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Validated(req): Validated<TodoRequest>,
) -> Result<Redirect, ApiError> {
    TodoRepository::new(state.db.pool())
        .update(id, &req.todo)
        .await?
        .ok_or_else(|| ApiError::not_found("Todo not found"))?;
    Ok(Redirect::to("/"))
}

/// DELETE /:id - Delete a todo.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    if !TodoRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Todo not found"));
    }
    Ok(Redirect::to("/"))
}
