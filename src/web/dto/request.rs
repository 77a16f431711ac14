//! Request DTOs for the web API.
//!
//! Record bodies are the `New*`/`*Update` types of [`crate::hotel`].

use serde::Deserialize;
use validator::Validate;

use super::validation::{no_control_chars, not_empty_trimmed, valid_role};
use crate::db::Role;
use crate::web::error::ApiError;

/// Login request.
///
/// No field rules: any mismatch, including an empty or oversized field, is
/// reported as invalid credentials.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Password.
    #[serde(default)]
    pub password: String,
}

/// User registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Please fill in all fields"),
        custom(function = "no_control_chars")
    )]
    pub username: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub password: String,
    /// Requested role; empty means not supplied.
    #[serde(default)]
    #[validate(custom(function = "valid_role"))]
    pub role: Option<String>,
}

impl RegisterRequest {
    /// Parsed role, `None` when absent or empty.
    pub fn role(&self) -> Result<Option<Role>, ApiError> {
        match self.role.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(role) => role
                .parse()
                .map(Some)
                .map_err(|_| ApiError::validation(format!("unknown role: {role}"))),
        }
    }
}

/// Todo create/update request.
#[derive(Debug, Deserialize, Validate)]
pub struct TodoRequest {
    /// Todo text.
    #[serde(default)]
    #[validate(
        custom(function = "not_empty_trimmed"),
        length(max = 500, message = "todo must be at most 500 characters")
    )]
    pub todo: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, password: &str, role: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn test_register_request_role() {
        assert_eq!(register("a", "b", None).role().unwrap(), None);
        assert_eq!(register("a", "b", Some("")).role().unwrap(), None);
        assert_eq!(
            register("a", "b", Some("manager")).role().unwrap(),
            Some(Role::Manager)
        );
        assert!(register("a", "b", Some("owner")).role().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        assert!(register("alice", "pw1", None).validate().is_ok());
        assert!(register("", "pw1", None).validate().is_err());
        assert!(register("alice", "", None).validate().is_err());
        assert!(register("alice", "pw1", Some("owner")).validate().is_err());
        assert!(register("alice", "pw1", Some("")).validate().is_ok());
        assert!(register("ali\u{7}ce", "pw1", None).validate().is_err());
    }

    #[test]
    fn test_todo_request_validation() {
        let ok = TodoRequest {
            todo: "Fix lamp".to_string(),
        };
        assert!(ok.validate().is_ok());

        let blank = TodoRequest {
            todo: "  ".to_string(),
        };
        assert!(blank.validate().is_err());

        let long = TodoRequest {
            todo: "x".repeat(501),
        };
        assert!(long.validate().is_err());
    }
}
