//! Todo types for hotelier.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Maximum length for a todo text.
pub const MAX_TODO_LENGTH: usize = 500;

/// A todo entry.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Todo {
    /// Todo ID.
    pub id: i64,
    /// Todo text.
    pub todo: String,
    /// When the entry was created or last edited.
    pub date: DateTime<Utc>,
}
