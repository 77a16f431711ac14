//! Router configuration for the web server.
//!
//! `PUT /:id` and `DELETE /:id` on the todo list are for JSON and API
//! callers. There is no `_method` override, so a plain HTML form can only
//! reach `GET /` and `POST /`; a form post to `/:id` gets 405.

use axum::{
    extract::Request,
    middleware::{self, Next},
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::db::Role;

use super::handlers::{
    create_client, create_room, create_service, create_staff, create_todo, create_transfer,
    current_session, delete_client, delete_room, delete_service, delete_staff, delete_todo,
    delete_transfer, get_client, get_room, get_service, get_staff, get_transfer, list_clients,
    list_rooms, list_services, list_staff, list_todos, list_transfers, login, logout, register,
    update_client, update_room, update_service, update_staff, update_todo, update_transfer,
    AppState,
};
use super::middleware::{create_cors_layer, require_role, require_session, require_session_api};

/// Create the main router.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", get(logout));

    let todo_routes = Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/:id", put(update_todo).delete(delete_todo))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    // Manager-only; the session gate on the enclosing router runs first.
    let staff_routes = Router::new()
        .route("/staff", get(list_staff).post(create_staff))
        .route(
            "/staff/:id",
            get(get_staff).put(update_staff).delete(delete_staff),
        )
        .route_layer(middleware::from_fn(|req: Request, next: Next| {
            require_role(Role::Manager, req, next)
        }));

    let api_routes = Router::new()
        .route("/session", get(current_session))
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
        .route("/rooms", get(list_rooms).post(create_room))
        .route(
            "/rooms/:id",
            get(get_room).put(update_room).delete(delete_room),
        )
        .route("/services", get(list_services).post(create_service))
        .route(
            "/services/:id",
            get(get_service).put(update_service).delete(delete_service),
        )
        .route("/transfers", get(list_transfers).post(create_transfer))
        .route(
            "/transfers/:id",
            get(get_transfer).put(update_transfer).delete(delete_transfer),
        )
        .merge(staff_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session_api,
        ));

    Router::new()
        .merge(auth_routes)
        .merge(todo_routes)
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
