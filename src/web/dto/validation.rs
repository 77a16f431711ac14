//! Validation utilities for web API DTOs.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::db::Role;
use crate::web::error::ApiError;

/// A body extractor that validates the request body.
///
/// Accepts `application/x-www-form-urlencoded` and JSON bodies, deserializes
/// them and runs the `validator` schema. Failure short-circuits with a 400
/// carrying the first violation before the handler runs.
///
/// # Example
///
/// ```ignore
/// use hotelier::web::dto::Validated;
///
/// async fn create_client(
///     Validated(payload): Validated<NewClient>,
/// ) -> Result<Json<Client>, ApiError> {
///     // payload is already validated
///     // ...
/// }
/// ```
pub struct Validated<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(format!("Invalid form body: {}", e)))?;
            value
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))?;
            value
        };

        value.validate().map_err(ApiError::from_validation_errors)?;

        Ok(Validated(value))
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

// ============================================================================
// Custom Validators
// ============================================================================

/// Validate that a string does not contain control characters or NULL bytes.
pub fn no_control_chars(value: &str) -> Result<(), validator::ValidationError> {
    if value
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t')
    {
        return Err(validator::ValidationError::new("no_control_chars")
            .with_message("Must not contain control characters".into()));
    }
    Ok(())
}

/// Validate that a string is not empty after trimming whitespace.
pub fn not_empty_trimmed(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("not_empty_trimmed")
            .with_message("Must not be empty".into()));
    }
    Ok(())
}

/// Validate a role name. Empty counts as not supplied.
pub fn valid_role(value: &str) -> Result<(), validator::ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.parse::<Role>().is_ok() {
        return Ok(());
    }
    Err(validator::ValidationError::new("valid_role")
        .with_message(format!("unknown role: {value}").into()))
}
